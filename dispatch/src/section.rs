//! Grouping nodes of the command tree.

use crate::command::Command;

/// A named group of commands and nested sections.
///
/// Children are kept in declaration order; help output sorts them.
#[derive(Debug, Clone)]
pub struct Section {
    help: String,
    commands: Vec<(String, Command)>,
    sections: Vec<(String, Section)>,
}

impl Section {
    // ---
    pub fn new(help: impl Into<String>) -> Self {
        // ---
        Self {
            help: help.into(),
            commands: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn command(mut self, name: impl Into<String>, command: Command) -> Self {
        self.commands.push((name.into(), command));
        self
    }

    pub fn section(mut self, name: impl Into<String>, section: Section) -> Self {
        self.sections.push((name.into(), section));
        self
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn commands(&self) -> impl Iterator<Item = (&str, &Command)> {
        self.commands.iter().map(|(name, cmd)| (name.as_str(), cmd))
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, sec)| (name.as_str(), sec))
    }

    pub fn find_command(&self, name: &str) -> Option<&Command> {
        self.commands().find(|(n, _)| *n == name).map(|(_, c)| c)
    }

    pub fn find_section(&self, name: &str) -> Option<&Section> {
        self.sections().find(|(n, _)| *n == name).map(|(_, s)| s)
    }

    /// Names of every child, sorted.
    pub fn child_names(&self) -> Vec<String> {
        // ---
        let mut names: Vec<String> = self
            .commands()
            .map(|(n, _)| n)
            .chain(self.sections().map(|(n, _)| n))
            .map(str::to_string)
            .collect();
        names.sort();
        names
    }

    pub(crate) fn has_child(&self, name: &str) -> bool {
        self.find_command(name).is_some() || self.find_section(name).is_some()
    }

    pub(crate) fn push_command(&mut self, name: &str, command: Command) {
        self.commands.push((name.to_string(), command));
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::context::Context;

    fn noop(_: &mut Context<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    #[test]
    fn finds_children_by_name() {
        // ---
        let section = Section::new("root")
            .command("hello", Command::new("say hello", noop))
            .section("demo", Section::new("demos").command("colors", Command::new("", noop)));

        assert!(section.find_command("hello").is_some());
        assert!(section.find_command("demo").is_none());
        let demo = section.find_section("demo").expect("demo section");
        assert!(demo.find_command("colors").is_some());
        assert_eq!(section.child_names(), vec!["demo", "hello"]);
    }
}
