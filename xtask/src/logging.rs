//! Tracing setup for tasks.
//!
//! Terminal output honors `--log-level`; an optional log file always
//! records everything at debug level without ANSI codes.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use example_cli_common::ColorWhen;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, Layer};

pub fn init(color: ColorWhen, terminal_level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    // ---
    let terminal = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(color.should_color_stderr())
        .with_target(false)
        .with_filter(terminal_level);

    let file = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_filter(LevelFilter::DEBUG);
            Some(layer)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(terminal)
        .with(file)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}
