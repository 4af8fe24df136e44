//! Typed flag values.
//!
//! Every flag declares a `ValueType`; raw command-line text is converted
//! once during resolution and handlers read it back through `FromValue`.

use std::fmt;
use std::path::{Path, PathBuf};

/// The type a flag's value is converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Str,
    Bool,
    Int,
    Path,
}

impl ValueType {
    // ---
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Str => "string",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Path => "path",
        }
    }

    /// Converts raw text into a value of this type.
    ///
    /// The error is a human-readable reason; callers attach the flag name.
    pub fn parse(self, raw: &str) -> Result<Value, String> {
        // ---
        match self {
            ValueType::Str => Ok(Value::Str(raw.to_string())),
            ValueType::Bool => parse_bool(raw).map(Value::Bool),
            ValueType::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| e.to_string()),
            ValueType::Path => {
                if raw.is_empty() {
                    Err("path must not be empty".to_string())
                } else {
                    Ok(Value::Path(PathBuf::from(raw)))
                }
            }
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err(format!("{raw:?} is not a boolean")),
    }
}

/// A resolved flag value, tagged with its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Bool(bool),
    Int(i64),
    Path(PathBuf),
}

impl Value {
    // ---
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Str(_) => ValueType::Str,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Path(_) => ValueType::Path,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<PathBuf> for Value {
    fn from(p: PathBuf) -> Self {
        Value::Path(p)
    }
}

/// Types a handler can read a flag back as.
///
/// `TYPE` is checked against the flag's declared type before conversion,
/// so asking for the wrong type is reported even when the flag is absent.
pub trait FromValue<'a>: Sized {
    const TYPE: ValueType;

    fn from_value(value: &'a Value) -> Option<Self>;
}

impl<'a> FromValue<'a> for &'a str {
    const TYPE: ValueType = ValueType::Str;

    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl<'a> FromValue<'a> for String {
    const TYPE: ValueType = ValueType::Str;

    fn from_value(value: &'a Value) -> Option<Self> {
        <&str>::from_value(value).map(str::to_string)
    }
}

impl<'a> FromValue<'a> for bool {
    const TYPE: ValueType = ValueType::Bool;

    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl<'a> FromValue<'a> for i64 {
    const TYPE: ValueType = ValueType::Int;

    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl<'a> FromValue<'a> for &'a Path {
    const TYPE: ValueType = ValueType::Path;

    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Path(p) => Some(p.as_path()),
            _ => None,
        }
    }
}

impl<'a> FromValue<'a> for PathBuf {
    const TYPE: ValueType = ValueType::Path;

    fn from_value(value: &'a Value) -> Option<Self> {
        <&Path>::from_value(value).map(Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn parses_each_type() {
        // ---
        assert_eq!(ValueType::Str.parse("World"), Ok(Value::from("World")));
        assert_eq!(ValueType::Int.parse("42"), Ok(Value::Int(42)));
        assert_eq!(ValueType::Int.parse("-7"), Ok(Value::Int(-7)));
        assert_eq!(ValueType::Bool.parse("TRUE"), Ok(Value::Bool(true)));
        assert_eq!(ValueType::Bool.parse("no"), Ok(Value::Bool(false)));
        assert_eq!(
            ValueType::Path.parse("a/b.txt"),
            Ok(Value::Path(PathBuf::from("a/b.txt")))
        );
    }

    #[test]
    fn rejects_bad_conversions() {
        // ---
        assert!(ValueType::Int.parse("forty-two").is_err());
        assert!(ValueType::Bool.parse("maybe").is_err());
        assert!(ValueType::Path.parse("").is_err());
    }

    #[test]
    fn from_value_checks_the_tag() {
        // ---
        let value = Value::Int(3);
        assert_eq!(i64::from_value(&value), Some(3));
        assert_eq!(bool::from_value(&value), None);
        assert_eq!(<&str>::from_value(&value), None);
    }

    #[test]
    fn display_matches_command_line_spelling() {
        // ---
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Int(-1).to_string(), "-1");
        assert_eq!(Value::from("auto").to_string(), "auto");
    }
}
