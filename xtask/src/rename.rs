//! `cargo xtask rename`: turn this template into a new project.
//!
//! The workspace is copied next to itself under the new name, its git
//! history is dropped, every text file has the template name replaced,
//! and a fresh repository is committed (and pushed with `gh` unless
//! `--local-only` is given).

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::process::run_checked;

/// Name the template ships with; replaced everywhere on rename.
pub const TEMPLATE_NAME: &str = "example-cli";

/// Directories never copied into or rewritten in the new project.
const SKIPPED_DIRS: [&str; 2] = [".git", "target"];

const TOPIC: &str = "rust";

#[derive(Debug, Clone)]
pub struct RenameOptions {
    pub template_dir: PathBuf,
    pub name: String,
    pub local_only: bool,
}

/// Run the whole rename flow.
///
/// # Errors
///
/// Fails if the destination already exists, on any filesystem error,
/// or with `CommandFailed` when git or gh exits unsuccessfully.
pub fn rename(opts: &RenameOptions) -> Result<()> {
    // ---
    validate_name(&opts.name)?;

    let parent = opts
        .template_dir
        .parent()
        .context("template directory has no parent")?;
    let dest = parent.join(&opts.name);

    if dest.exists() {
        bail!("destination {} already exists", dest.display());
    }

    info!("Copying: {} to {}", opts.template_dir.display(), dest.display());
    let copied = copy_tree(&opts.template_dir, &dest)?;
    debug!("Copied {} files", copied);

    if dest.join(".git").is_dir() {
        run_checked(&dest, "git", &["clean", "-fdx"])?;
        fs::remove_dir_all(dest.join(".git"))
            .with_context(|| format!("failed to remove {}/.git", dest.display()))?;
    }

    let changed = replace_in_tree(&dest, &replacements(&opts.name))?;
    info!("Replaced '{}' with '{}' in {} files", TEMPLATE_NAME, opts.name, changed);

    let message = format!("Initial commit for {}", opts.name);
    run_checked(&dest, "git", &["init"])?;
    run_checked(&dest, "git", &["add", "."])?;
    run_checked(&dest, "git", &["commit", "-m", &message])?;

    if opts.local_only {
        info!("Local only, skipping GitHub repository creation");
        return Ok(());
    }

    run_checked(
        &dest,
        "gh",
        &["repo", "create", &opts.name, "--private", "--source", ".", "--remote", "origin"],
    )?;
    run_checked(&dest, "gh", &["repo", "edit", "--add-topic", TOPIC])?;
    run_checked(&dest, "git", &["push", "-u", "origin", "HEAD"])?;

    info!("Project {} is ready at {}", opts.name, dest.display());
    Ok(())
}

/// Package names plus the crate identifiers Rust derives from them.
pub fn replacements(name: &str) -> Vec<(String, String)> {
    // ---
    vec![
        (TEMPLATE_NAME.to_string(), name.to_string()),
        (TEMPLATE_NAME.replace('-', "_"), name.replace('-', "_")),
    ]
}

/// A project name must be usable as a directory and crate name.
pub fn validate_name(name: &str) -> Result<()> {
    // ---
    if name.is_empty() {
        bail!("project name must not be empty");
    }
    if name.starts_with('-') {
        bail!("project name {name:?} must not start with '-'");
    }
    if name == TEMPLATE_NAME {
        bail!("project name must differ from the template name");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        bail!("project name {name:?} may only contain letters, digits, '-' and '_'");
    }
    Ok(())
}

/// Ask for the project name on stdin.
pub fn prompt_name() -> Result<String> {
    // ---
    print!("Enter the new name for the project: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn is_skipped(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

/// Copy `src` into `dest`, leaving out build output.
///
/// `.git` is copied so that `git clean` can run in the copy.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<usize> {
    // ---
    let mut copied = 0;

    let walker = WalkDir::new(src)
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == "target"));

    for entry in walker {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src)?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("failed to create {}", target.display()))?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("failed to copy {}", entry.path().display()))?;
            copied += 1;
        } else {
            debug!("Skipping non-regular file {}", entry.path().display());
        }
    }

    Ok(copied)
}

/// Apply every `(from, to)` replacement to each UTF-8 file under `root`.
///
/// Files that are not valid UTF-8 are left alone. Returns how many
/// files were rewritten.
pub fn replace_in_tree(root: &Path, replacements: &[(String, String)]) -> Result<usize> {
    // ---
    let mut changed = 0;

    for entry in WalkDir::new(root).into_iter().filter_entry(|e| !is_skipped(e)) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let Ok(text) = String::from_utf8(bytes) else {
            debug!("Skipping binary file {}", path.display());
            continue;
        };

        let updated = replacements
            .iter()
            .fold(text.clone(), |acc, (from, to)| acc.replace(from.as_str(), to));
        if updated == text {
            continue;
        }

        debug!("Updating {}", path.display());
        fs::write(path, updated)
            .with_context(|| format!("failed to write {}", path.display()))?;
        changed += 1;
    }

    Ok(changed)
}
