//! `cargo xtask diff-file`: compare one file across sibling projects.
//!
//! Every Cargo project next to this one (optionally only libraries or
//! only binaries) is checked for a file with the same name. Missing
//! files are reported, identical ones are noted, and differing ones are
//! shown with `delta`, or `diff -u` when `delta` is not installed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::{error, info, warn};

use crate::process::{is_not_found, run_attached};

/// Which sibling projects to compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Group {
    All,
    Libs,
    Clis,
}

/// What a project directory builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectKind {
    pub lib: bool,
    pub bin: bool,
}

impl Group {
    fn includes(self, kind: ProjectKind) -> bool {
        match self {
            Group::All => true,
            Group::Libs => kind.lib,
            Group::Clis => kind.bin,
        }
    }
}

/// Classify `dir`, or `None` when it is not a Cargo project.
pub fn project_kind(dir: &Path) -> Option<ProjectKind> {
    // ---
    if !dir.join("Cargo.toml").is_file() {
        return None;
    }

    Some(ProjectKind {
        lib: dir.join("src/lib.rs").is_file(),
        bin: dir.join("src/main.rs").is_file() || dir.join("src/bin").is_dir(),
    })
}

/// Cargo projects directly under `root` that belong to `group`, sorted by name.
///
/// `exclude` (usually the workspace running the task) is left out.
pub fn sibling_projects(root: &Path, group: Group, exclude: Option<&Path>) -> Result<Vec<PathBuf>> {
    // ---
    let exclude = exclude.and_then(|dir| fs::canonicalize(dir).ok());
    let mut projects = Vec::new();

    for entry in fs::read_dir(root).with_context(|| format!("failed to list {}", root.display()))? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        if exclude.is_some() && fs::canonicalize(&path).ok() == exclude {
            continue;
        }
        if let Some(kind) = project_kind(&path) {
            if group.includes(kind) {
                projects.push(path);
            }
        }
    }

    projects.sort();
    Ok(projects)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Missing,
    Identical,
    Different,
}

pub fn compare(src_contents: &[u8], target: &Path) -> Result<Comparison> {
    // ---
    if !target.is_file() {
        return Ok(Comparison::Missing);
    }

    let target_contents =
        fs::read(target).with_context(|| format!("failed to read {}", target.display()))?;

    if target_contents == src_contents {
        Ok(Comparison::Identical)
    } else {
        Ok(Comparison::Different)
    }
}

#[derive(Debug, Clone)]
pub struct DiffOptions {
    pub src: PathBuf,
    pub group: Group,
    pub root: PathBuf,
    pub exclude: Option<PathBuf>,
}

/// Per-outcome counts from one `diff_file` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub identical: usize,
    pub different: usize,
    pub missing: usize,
    pub failed: usize,
}

/// Compare `opts.src` with the same-named file in every selected project.
///
/// Problems with a single project are logged, counted as `failed`, and
/// the loop moves on.
///
/// # Errors
///
/// Fails only when the source file or the root directory cannot be read.
pub fn diff_file(opts: &DiffOptions) -> Result<DiffSummary> {
    // ---
    // Diff tools run from `root`, so a relative source must be pinned first.
    let src = fs::canonicalize(&opts.src)
        .with_context(|| format!("failed to resolve {}", opts.src.display()))?;
    let src_contents =
        fs::read(&src).with_context(|| format!("failed to read {}", src.display()))?;
    let file_name = src
        .file_name()
        .with_context(|| format!("{} has no file name", src.display()))?;

    let projects = sibling_projects(&opts.root, opts.group, opts.exclude.as_deref())?;
    info!("Comparing against {} projects in {}", projects.len(), opts.root.display());

    let mut summary = DiffSummary::default();

    for project in projects {
        let target = project.join(file_name);
        let label = project
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match compare(&src_contents, &target) {
            Ok(Comparison::Missing) => {
                error!("Target file {} does not exist.", target.display());
                summary.missing += 1;
            }
            Ok(Comparison::Identical) => {
                info!("No differences found in {}.", label);
                summary.identical += 1;
            }
            Ok(Comparison::Different) => {
                info!("Showing differences for {}", label);
                summary.different += 1;
                if let Err(e) = show_diff(&opts.root, &src, &target) {
                    error!("Could not diff {}: {:#}", target.display(), e);
                    summary.failed += 1;
                }
            }
            Err(e) => {
                error!("{:#}", e);
                summary.failed += 1;
            }
        }
    }

    info!(
        "{} identical, {} different, {} missing, {} failed",
        summary.identical, summary.different, summary.missing, summary.failed
    );
    Ok(summary)
}

fn show_diff(cwd: &Path, src: &Path, target: &Path) -> Result<()> {
    // ---
    let src = src.to_string_lossy();
    let target = target.to_string_lossy();

    let status = match run_attached(cwd, "delta", &["--paging", "never", &src, &target]) {
        Ok(status) => status,
        Err(e) if is_not_found(&e) => {
            warn!("delta not found, falling back to diff");
            run_attached(cwd, "diff", &["-u", &src, &target])?
        }
        Err(e) => return Err(e),
    };

    // Diff tools exit 1 when the inputs differ.
    match status.code() {
        Some(0) | Some(1) => Ok(()),
        _ => anyhow::bail!("diff tool exited with {status}"),
    }
}
