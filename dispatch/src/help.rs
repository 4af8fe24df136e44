//! Help text for sections and commands.

use std::io::{self, Write};

use example_cli_common::{Color, Palette};

use crate::command::Command;
use crate::flag::Flag;
use crate::section::Section;

pub(crate) fn write_section_help(
    out: &mut dyn Write,
    palette: Palette,
    path: &str,
    section: &Section,
) -> io::Result<()> {
    // ---
    writeln!(out, "{}: {}", palette.paint(Color::Bold, path), section.help())?;

    let mut commands: Vec<(&str, &str)> = section.commands().map(|(n, c)| (n, c.help())).collect();
    commands.sort_unstable();
    let mut sections: Vec<(&str, &str)> = section.sections().map(|(n, s)| (n, s.help())).collect();
    sections.sort_unstable();

    let width = commands
        .iter()
        .chain(sections.iter())
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);

    for (title, rows) in [("Commands", &commands), ("Sections", &sections)] {
        if rows.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{}:", palette.paint(Color::Underline, title))?;
        for (name, help) in rows.iter() {
            let padded = format!("{name:<width$}");
            writeln!(out, "  {}  {}", palette.paint(Color::FgCyan, &padded), help)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Run `{path} <command> --help` for details.")
}

pub(crate) fn write_command_help(
    out: &mut dyn Write,
    palette: Palette,
    path: &str,
    command: &Command,
    globals: &[Flag],
) -> io::Result<()> {
    // ---
    writeln!(out, "{}: {}", palette.paint(Color::Bold, path), command.help())?;

    let rows: Vec<(String, String)> = command
        .flags()
        .iter()
        .chain(globals.iter())
        .map(|flag| (flag_label(flag), flag_details(flag)))
        .chain(std::iter::once((
            "-h, --help".to_string(),
            "Print help".to_string(),
        )))
        .collect();

    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    writeln!(out)?;
    writeln!(out, "{}:", palette.paint(Color::Underline, "Flags"))?;
    for (label, details) in &rows {
        let padded = format!("{label:<width$}");
        writeln!(out, "  {}  {}", palette.paint(Color::FgCyan, &padded), details)?;
    }

    Ok(())
}

fn flag_label(flag: &Flag) -> String {
    format!("{} <{}>", flag.name(), flag.value_type())
}

fn flag_details(flag: &Flag) -> String {
    // ---
    let mut details = flag.help().to_string();

    if flag.is_required() {
        details.push_str(" (required)");
    }
    if let Some(default) = flag.default() {
        details.push_str(&format!(" [default: {default}]"));
    }
    if !flag.allowed_choices().is_empty() {
        details.push_str(&format!(" [choices: {}]", flag.allowed_choices().join(", ")));
    }
    if let Some(var) = flag.env() {
        details.push_str(&format!(" [env: {var}]"));
    }

    details
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::context::Context;
    use crate::value::ValueType;

    fn noop(_: &mut Context<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    #[test]
    fn section_help_lists_children_sorted() {
        // ---
        let section = Section::new("Example CLI")
            .command("version", Command::new("Print version", noop))
            .command("hello", Command::new("Say hello", noop))
            .section("demo", Section::new("Demos"));

        let mut out = Vec::new();
        write_section_help(&mut out, Palette::plain(), "app", &section).expect("writes");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.starts_with("app: Example CLI\n"));
        let hello = text.find("hello").expect("hello listed");
        let version = text.find("version").expect("version listed");
        assert!(hello < version);
        assert!(text.contains("Sections:\n  demo"));
    }

    #[test]
    fn command_help_describes_flags() {
        // ---
        let command = Command::new("Say hello", noop).flag(
            Flag::new("--name", "Person to greet", ValueType::Str)
                .required()
                .env_var("APP_NAME"),
        );
        let globals = [Flag::new("--color", "Colors", ValueType::Str)
            .default_value("auto")
            .choices(["auto", "always", "never"])];

        let mut out = Vec::new();
        write_command_help(&mut out, Palette::plain(), "app hello", &command, &globals)
            .expect("writes");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.contains("--name <string>"));
        assert!(text.contains("Person to greet (required) [env: APP_NAME]"));
        assert!(text.contains("[default: auto] [choices: auto, always, never]"));
        assert!(text.contains("-h, --help"));
    }
}
