//! Error taxonomy for building and dispatching a command tree.
//!
//! Every variant is terminal: the dispatcher never retries or recovers.

use crate::value::ValueType;
use thiserror::Error;

/// Anything `App::run` can fail with.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Flag(#[from] FlagError),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// The handler's own error, passed through untouched.
    #[error(transparent)]
    Handler(anyhow::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl DispatchError {
    // ---
    /// Process exit code for this failure.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Handler(_) => 1,
            Self::Resolve(_) | Self::Flag(_) => 2,
            Self::Definition(_) => 3,
            Self::Io(_) => 4,
        }
    }

    /// True for mistakes in the arguments rather than in the program.
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Resolve(_) | Self::Flag(_))
    }
}

/// The argument list does not name a command in the tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unknown command {name:?} under `{path}` (available: {available})", available = .available.join(", "))]
    UnknownCommand {
        path: String,
        name: String,
        available: Vec<String>,
    },

    #[error("`{path}` needs a command (available: {available}); try `{path} --help`", available = .available.join(", "))]
    MissingCommand { path: String, available: Vec<String> },
}

/// The arguments after the command do not satisfy its flags.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlagError {
    #[error("unknown flag {flag} for `{command}`")]
    Unknown { command: String, flag: String },

    #[error("flag {flag} needs a value")]
    MissingValue { flag: String },

    #[error("flag {flag} given more than once")]
    Repeated { flag: String },

    #[error("missing required flag {flag} for `{command}`")]
    MissingRequired { command: String, flag: String },

    #[error("invalid value {value:?} for flag {flag} (expected {expected}): {reason}")]
    InvalidValue {
        flag: String,
        value: String,
        expected: ValueType,
        reason: String,
    },

    #[error("invalid value {value:?} for flag {flag} (choices: {choices})", choices = .choices.join(", "))]
    NotAChoice {
        flag: String,
        value: String,
        choices: Vec<String>,
    },

    #[error("unexpected argument {token:?} for `{command}`")]
    UnexpectedArgument { command: String, token: String },
}

/// A handler asked for a flag in a way the declaration does not allow.
///
/// `Unregistered` is a programming error in the handler; it is reported
/// like any other handler failure and never recovered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("flag {flag} is not registered on this command")]
    Unregistered { flag: String },

    #[error("flag {flag} holds a {found} value, not {expected}")]
    TypeMismatch {
        flag: String,
        expected: ValueType,
        found: ValueType,
    },

    #[error("flag {flag} has no value")]
    Absent { flag: String },
}

/// The command tree itself is malformed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("invalid name {name:?} under `{path}`")]
    InvalidName { path: String, name: String },

    #[error("duplicate name {name:?} under `{path}`")]
    DuplicateName { path: String, name: String },

    #[error("invalid flag name {flag:?} on `{command}` (must start with '-')")]
    InvalidFlagName { command: String, flag: String },

    #[error("flag {flag} declared more than once on `{command}`")]
    DuplicateFlag { command: String, flag: String },

    #[error("flag {flag} is reserved")]
    ReservedFlag { flag: String },

    #[error("default for flag {flag} is a {found}, but the flag is declared as {expected}")]
    DefaultTypeMismatch {
        flag: String,
        expected: ValueType,
        found: ValueType,
    },

    #[error("default {value:?} for flag {flag} is not one of its choices")]
    DefaultNotAChoice { flag: String, value: String },

    #[error("flag {flag} is required and also has a default")]
    RequiredWithDefault { flag: String },
}
