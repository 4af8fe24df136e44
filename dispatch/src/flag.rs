//! Flag declarations.

use crate::value::{Value, ValueType};

/// A named, typed input declared on a command (or globally on the app).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    name: String,
    help: String,
    value_type: ValueType,
    required: bool,
    default: Option<Value>,
    choices: Vec<String>,
    env_var: Option<String>,
}

impl Flag {
    // ---
    /// Declares an optional flag with no default.
    ///
    /// `name` includes its dashes, e.g. `--name`.
    pub fn new(name: impl Into<String>, help: impl Into<String>, value_type: ValueType) -> Self {
        // ---
        Self {
            name: name.into(),
            help: help.into(),
            value_type,
            required: false,
            default: None,
            choices: Vec::new(),
            env_var: None,
        }
    }

    /// Resolution fails if no source provides a value.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Restricts accepted values to the given spellings.
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Environment variable consulted when the flag is not on the command line.
    pub fn env_var(mut self, var: impl Into<String>) -> Self {
        self.env_var = Some(var.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn allowed_choices(&self) -> &[String] {
        &self.choices
    }

    pub fn env(&self) -> Option<&str> {
        self.env_var.as_deref()
    }

    /// Whether `value` is acceptable under this flag's choices.
    pub(crate) fn accepts(&self, value: &Value) -> bool {
        self.choices.is_empty() || self.choices.iter().any(|c| *c == value.to_string())
    }
}
