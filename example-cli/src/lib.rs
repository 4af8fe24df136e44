//! Example CLI Library
//!
//! Builds the command tree for the `example-cli` binary. Kept separate
//! from the binary so tests can dispatch without spawning a process.

pub mod colors;
pub mod hello;

use cli_dispatch::{App, DefinitionError, Section};

/// Program name shown in help and error messages.
pub const APP_NAME: &str = "example-cli";

/// Builds the application.
///
/// # Arguments
///
/// * `version` - Version string reported by the `version` command
///
/// # Errors
///
/// Returns error if the command tree is malformed.
pub fn build_app(version: &str) -> Result<App, DefinitionError> {
    // ---
    let root = Section::new("Example CLI: greet people, in color")
        .command("hello", hello::command())
        .section(
            "demo",
            Section::new("Demos of the terminal color helper")
                .command("colors", colors::command()),
        );

    App::new(APP_NAME, version, root)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn tree_has_expected_commands() {
        // ---
        let app = build_app("0.0.0-test").expect("tree is valid");
        let root = app.root();

        assert!(root.find_command("hello").is_some());
        assert!(root.find_command("version").is_some());
        let demo = root.find_section("demo").expect("demo section");
        assert!(demo.find_command("colors").is_some());
        assert_eq!(app.version(), "0.0.0-test");
    }
}
