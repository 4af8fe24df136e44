//! Example CLI - command-line binary.
//!
//! Dispatches one command from the process arguments and exits with a
//! code that tells usage mistakes apart from handler failures.

use std::io;
use std::process::ExitCode;

use cli_dispatch::DispatchError;
use example_cli::{build_app, APP_NAME};
use example_cli_common::{init_tracing, Color, ColorWhen, Palette};
use tracing::debug;

/// Capture version number from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    // ---
    let stderr_palette = Palette::new(ColorWhen::Auto.should_color_stderr());

    if let Err(e) = init_tracing(ColorWhen::Auto, "warn") {
        eprintln!("{}: {e:#}", stderr_palette.paint(Color::FgRed, "error"));
        return ExitCode::FAILURE;
    }

    debug!("Starting {APP_NAME} v{VERSION}");

    let result = build_app(VERSION)
        .map_err(DispatchError::from)
        .and_then(|app| app.run(std::env::args(), &mut io::stdout().lock()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}: {}",
                stderr_palette.paint_all(&[Color::Bold, Color::FgRed], "error"),
                describe(&e)
            );
            ExitCode::from(e.exit_code())
        }
    }
}

/// Handler errors carry an `anyhow` context chain; show all of it.
fn describe(err: &DispatchError) -> String {
    // ---
    match err {
        DispatchError::Handler(inner) => format!("{inner:#}"),
        other => other.to_string(),
    }
}
