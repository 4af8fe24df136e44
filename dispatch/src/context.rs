//! Per-invocation context handed to a command handler.

use std::collections::BTreeMap;
use std::io::Write;

use example_cli_common::Palette;

use crate::error::AccessError;
use crate::value::{FromValue, Value, ValueType};

/// Where a resolved flag value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagSource {
    CommandLine,
    Env,
    Default,
}

#[derive(Debug, Clone)]
struct Slot {
    value_type: ValueType,
    value: Option<(Value, FlagSource)>,
}

/// Resolved flag values for one invocation, keyed by flag name.
///
/// Every flag declared on the command (and every global flag) has a slot,
/// even when no value was supplied; that is how an absent optional flag
/// is told apart from one that was never registered.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    slots: BTreeMap<String, Slot>,
}

impl Flags {
    // ---
    pub(crate) fn register(&mut self, name: &str, value_type: ValueType) {
        // ---
        self.slots.insert(
            name.to_string(),
            Slot {
                value_type,
                value: None,
            },
        );
    }

    pub(crate) fn set(&mut self, name: &str, value: Value, source: FlagSource) {
        // ---
        if let Some(slot) = self.slots.get_mut(name) {
            slot.value = Some((value, source));
        }
    }

    /// Reads a flag that must have a value (required, or with a default).
    pub fn get<'a, T: FromValue<'a>>(&'a self, name: &str) -> Result<T, AccessError> {
        // ---
        self.get_opt(name)?.ok_or_else(|| AccessError::Absent {
            flag: name.to_string(),
        })
    }

    /// Reads an optional flag; `Ok(None)` when no source supplied it.
    pub fn get_opt<'a, T: FromValue<'a>>(&'a self, name: &str) -> Result<Option<T>, AccessError> {
        // ---
        let slot = self
            .slots
            .get(name)
            .ok_or_else(|| AccessError::Unregistered {
                flag: name.to_string(),
            })?;

        let mismatch = |found| AccessError::TypeMismatch {
            flag: name.to_string(),
            expected: T::TYPE,
            found,
        };

        if slot.value_type != T::TYPE {
            return Err(mismatch(slot.value_type));
        }

        match &slot.value {
            None => Ok(None),
            Some((value, _)) => T::from_value(value)
                .map(Some)
                .ok_or_else(|| mismatch(value.value_type())),
        }
    }

    /// The raw tagged value, if any.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.slots
            .get(name)
            .and_then(|slot| slot.value.as_ref())
            .map(|(value, _)| value)
    }

    pub fn source(&self, name: &str) -> Option<FlagSource> {
        self.slots
            .get(name)
            .and_then(|slot| slot.value.as_ref())
            .map(|(_, source)| *source)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Flags that ended up with a value, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.slots
            .iter()
            .filter_map(|(name, slot)| slot.value.as_ref().map(|(v, _)| (name.as_str(), v)))
    }
}

/// Everything a handler receives.
///
/// Fields are public so a handler can read `flags` while writing to `out`.
pub struct Context<'a> {
    /// Resolved flag values.
    pub flags: Flags,

    /// Color-formatting capability, already decided from `--color`.
    pub palette: Palette,

    /// Where command output goes (stdout in the binary).
    pub out: &'a mut dyn Write,

    path: Vec<String>,
    version: &'a str,
}

impl<'a> Context<'a> {
    // ---
    pub(crate) fn new(
        flags: Flags,
        palette: Palette,
        out: &'a mut dyn Write,
        path: Vec<String>,
        version: &'a str,
    ) -> Self {
        // ---
        Self {
            flags,
            palette,
            out,
            path,
            version,
        }
    }

    /// Program name followed by the section/command names walked.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn command_path(&self) -> String {
        self.path.join(" ")
    }

    pub fn app_name(&self) -> &str {
        self.path.first().map(String::as_str).unwrap_or_default()
    }

    /// Version string the app was built with.
    pub fn version(&self) -> &str {
        self.version
    }
}
