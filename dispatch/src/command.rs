//! Leaf commands.

use std::fmt;

use crate::context::Context;
use crate::flag::Flag;

/// The function run when a command is dispatched.
pub type Action = fn(&mut Context<'_>) -> anyhow::Result<()>;

/// A leaf of the command tree: help text, declared flags, and a handler.
///
/// The command's name lives on its parent section.
#[derive(Clone)]
pub struct Command {
    help: String,
    action: Action,
    flags: Vec<Flag>,
}

impl Command {
    // ---
    pub fn new(help: impl Into<String>, action: Action) -> Self {
        // ---
        Self {
            help: help.into(),
            action,
            flags: Vec::new(),
        }
    }

    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn action(&self) -> Action {
        self.action
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("help", &self.help)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
