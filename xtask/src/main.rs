//! Workspace maintenance tasks, run with `cargo xtask <task>`.
//!
//! - `rename`: copy this template into a new, renamed project
//! - `diff-file`: compare a shared file across sibling projects

mod diff_file;
mod logging;
mod process;
mod rename;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use example_cli_common::ColorWhen;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

use diff_file::{DiffOptions, Group};
use process::CommandFailed;
use rename::RenameOptions;

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorWhen {
    fn from(v: ColorArg) -> Self {
        match v {
            ColorArg::Auto => ColorWhen::Auto,
            ColorArg::Always => ColorWhen::Always,
            ColorArg::Never => ColorWhen::Never,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(v: LogLevel) -> Self {
        match v {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// Maintenance tasks for the example-cli workspace
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    // ---
    /// Terminal log level
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Coloring
    #[arg(long, value_enum, default_value = "auto", global = true)]
    color: ColorArg,

    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand, Debug)]
enum Task {
    /// Copy this template into a sibling directory under a new name
    Rename {
        /// New project name (prompted for when omitted)
        #[arg(long)]
        name: Option<String>,

        /// Create the local repository only; skip GitHub
        #[arg(long)]
        local_only: bool,

        /// Debug-level log file (defaults to a timestamped file in the temp dir)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Compare a file with the same-named file in sibling projects
    DiffFile {
        /// File to compare
        #[arg(long)]
        src: PathBuf,

        /// Which projects to compare against
        #[arg(long, value_enum, default_value = "all")]
        group: Group,

        /// Directory holding the projects (defaults to this workspace's parent)
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    // ---
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            match e.downcast_ref::<CommandFailed>() {
                Some(failed) => ExitCode::from(u8::try_from(failed.code).unwrap_or(1)),
                None => ExitCode::FAILURE,
            }
        }
    }
}

fn run(args: Args) -> Result<()> {
    // ---
    let color = ColorWhen::from(args.color);
    let level = LevelFilter::from(args.log_level);
    let template_dir = workspace_root()?;

    match args.task {
        Task::Rename {
            name,
            local_only,
            log_file,
        } => {
            let log_file = log_file.unwrap_or_else(default_log_file);
            logging::init(color, level, Some(&log_file))?;
            info!("Logging to {}", log_file.display());

            let name = match name {
                Some(name) => name,
                None => rename::prompt_name()?,
            };

            rename::rename(&RenameOptions {
                template_dir,
                name,
                local_only,
            })
        }
        Task::DiffFile { src, group, root } => {
            logging::init(color, level, None)?;

            let root = match root {
                Some(root) => root,
                None => template_dir
                    .parent()
                    .context("workspace has no parent directory")?
                    .to_path_buf(),
            };

            diff_file::diff_file(&DiffOptions {
                src,
                group,
                root,
                exclude: Some(template_dir),
            })?;
            Ok(())
        }
    }
}

/// The workspace root is the parent of this crate's manifest directory.
fn workspace_root() -> Result<PathBuf> {
    // ---
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

fn default_log_file() -> PathBuf {
    // ---
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    std::env::temp_dir().join(format!("xtask-rename-{stamp}.log"))
}
