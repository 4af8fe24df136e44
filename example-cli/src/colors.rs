//! `demo colors`: paint a line in every foreground color.

use std::io::Write;

use anyhow::Result;
use cli_dispatch::{Command, Context, Flag, ValueType};
use example_cli_common::Color;

pub const TEXT_FLAG: &str = "--text";
pub const BOLD_FLAG: &str = "--bold";

pub fn command() -> Command {
    // ---
    Command::new("Print a sample of every foreground color", colors)
        .flag(Flag::new(
            TEXT_FLAG,
            "Text to paint (defaults to each color's name)",
            ValueType::Str,
        ))
        .flag(Flag::new(BOLD_FLAG, "Also make the text bold", ValueType::Bool).default_value(false))
}

fn colors(ctx: &mut Context<'_>) -> Result<()> {
    // ---
    let text: Option<&str> = ctx.flags.get_opt(TEXT_FLAG)?;
    let bold: bool = ctx.flags.get(BOLD_FLAG)?;
    let palette = ctx.palette;

    for color in Color::FOREGROUND {
        let label = text.unwrap_or(color.name());
        let line = if bold {
            palette.paint_all(&[Color::Bold, color], label)
        } else {
            palette.paint(color, label)
        };
        writeln!(ctx.out, "{line}")?;
    }

    Ok(())
}
