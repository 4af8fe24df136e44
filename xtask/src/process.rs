//! Running external tools (git, gh, diff viewers).

use std::path::Path;
use std::process::{Command, ExitStatus, Output};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, error, info};

/// An external command ran but exited unsuccessfully.
#[derive(Debug, Error)]
#[error("`{command}` exited with code {code}")]
pub struct CommandFailed {
    pub command: String,
    pub code: i32,
}

fn render(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs a command with captured output, logging both streams.
///
/// Output is logged at debug level, or at error level when the command
/// fails. A failing exit status is still `Ok`; see `run_checked`.
pub fn run_cmd(cwd: &Path, program: &str, args: &[&str]) -> Result<Output> {
    // ---
    let rendered = render(program, args);
    info!("Running command: {}", rendered);

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .with_context(|| format!("failed to run `{rendered}`"))?;

    let failed = !output.status.success();
    if failed {
        error!("Command failed with {}", output.status);
    }

    log_stream("stdout", &output.stdout, failed);
    log_stream("stderr", &output.stderr, failed);

    Ok(output)
}

/// Like `run_cmd`, but a non-zero exit becomes `CommandFailed`.
pub fn run_checked(cwd: &Path, program: &str, args: &[&str]) -> Result<()> {
    // ---
    let output = run_cmd(cwd, program, args)?;
    if output.status.success() {
        return Ok(());
    }

    Err(CommandFailed {
        command: render(program, args),
        code: output.status.code().unwrap_or(1),
    }
    .into())
}

/// Runs a command attached to the terminal (for pagers and diff viewers).
pub fn run_attached(cwd: &Path, program: &str, args: &[&str]) -> Result<ExitStatus> {
    // ---
    let rendered = render(program, args);
    info!("Running command: {}", rendered);

    Command::new(program)
        .args(args)
        .current_dir(cwd)
        .status()
        .with_context(|| format!("failed to run `{rendered}`"))
}

/// True when `err` means the program itself could not be found.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

fn log_stream(name: &str, bytes: &[u8], failed: bool) {
    // ---
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim_end();

    match (text.is_empty(), failed) {
        (true, true) => error!("no {}", name),
        (true, false) => debug!("no {}", name),
        (false, true) => error!("{}:\n{}", name, text),
        (false, false) => debug!("{}:\n{}", name, text),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn render_joins_program_and_args() {
        // ---
        assert_eq!(render("git", &["commit", "-m", "msg"]), "git commit -m msg");
        assert_eq!(render("git", &[]), "git");
    }

    #[test]
    fn missing_program_is_detected() {
        // ---
        let dir = std::env::temp_dir();
        let err = run_cmd(&dir, "definitely-not-a-real-program-xyz", &[])
            .expect_err("program does not exist");
        assert!(is_not_found(&err));
    }
}
