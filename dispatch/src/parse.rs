//! Flag token parsing and value resolution.
//!
//! Two passes: `parse_tokens` splits the arguments after the command into
//! raw `(flag, text)` pairs, then `resolve_flags` applies the precedence
//! command line > environment > default and converts to typed values.

use std::collections::BTreeMap;

use tracing::trace;

use crate::context::{FlagSource, Flags};
use crate::error::FlagError;
use crate::flag::Flag;
use crate::value::{Value, ValueType};

pub(crate) fn is_help(token: &str) -> bool {
    token == "-h" || token == "--help"
}

/// True when `-h`/`--help` appears where a flag name is expected.
///
/// A help token sitting in the value slot of a declared valued flag is a
/// value (`--name -h` greets "-h"). The slot follows the same rule as
/// `parse_tokens`: a following long flag means the value was left out.
pub(crate) fn wants_help(tokens: &[String], decls: &[&Flag]) -> bool {
    // ---
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        if is_help(token) {
            return true;
        }
        if token.contains('=') {
            continue;
        }

        let takes_value = decls
            .iter()
            .any(|f| f.name() == token && f.value_type() != ValueType::Bool);
        if takes_value && iter.peek().is_some_and(|next| !next.starts_with("--")) {
            iter.next();
        }
    }

    false
}

/// Raw flag text taken from the command line.
#[derive(Debug, Default)]
pub(crate) struct RawFlags {
    values: BTreeMap<String, String>,
}

impl RawFlags {
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Splits `--flag value`, `--flag=value` and bare bool `--flag` tokens.
///
/// `command` is only used for error messages.
pub(crate) fn parse_tokens(
    tokens: &[String],
    decls: &[&Flag],
    command: &str,
) -> Result<RawFlags, FlagError> {
    // ---
    let mut raw = RawFlags::default();
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        if !token.starts_with('-') || token == "-" {
            return Err(FlagError::UnexpectedArgument {
                command: command.to_string(),
                token: token.clone(),
            });
        }

        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (token.as_str(), None),
        };

        let flag = decls
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| FlagError::Unknown {
                command: command.to_string(),
                flag: name.to_string(),
            })?;

        let value = match inline {
            Some(value) => value,
            None if flag.value_type() == ValueType::Bool => "true".to_string(),
            None => match iter.next() {
                // A following long flag means the value was left out.
                Some(next) if !next.starts_with("--") => next.clone(),
                _ => {
                    return Err(FlagError::MissingValue {
                        flag: name.to_string(),
                    })
                }
            },
        };

        if raw.values.insert(name.to_string(), value).is_some() {
            return Err(FlagError::Repeated {
                flag: name.to_string(),
            });
        }
    }

    Ok(raw)
}

/// Produces a slot for every declared flag and fills in values.
///
/// `env` looks up an environment variable; empty values count as unset.
pub(crate) fn resolve_flags(
    decls: &[&Flag],
    raw: &RawFlags,
    command: &str,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<Flags, FlagError> {
    // ---
    let mut flags = Flags::default();

    for flag in decls {
        flags.register(flag.name(), flag.value_type());

        let from_env = || {
            flag.env()
                .and_then(|var| env(var))
                .filter(|value| !value.is_empty())
        };

        let (value, source) = if let Some(text) = raw.get(flag.name()) {
            (convert(flag, text)?, FlagSource::CommandLine)
        } else if let Some(text) = from_env() {
            (convert(flag, &text)?, FlagSource::Env)
        } else if let Some(default) = flag.default() {
            (default.clone(), FlagSource::Default)
        } else if flag.is_required() {
            return Err(FlagError::MissingRequired {
                command: command.to_string(),
                flag: flag.name().to_string(),
            });
        } else {
            continue;
        };

        trace!("{} = {} ({:?})", flag.name(), value, source);
        flags.set(flag.name(), value, source);
    }

    Ok(flags)
}

fn convert(flag: &Flag, text: &str) -> Result<Value, FlagError> {
    // ---
    let value = flag
        .value_type()
        .parse(text)
        .map_err(|reason| FlagError::InvalidValue {
            flag: flag.name().to_string(),
            value: text.to_string(),
            expected: flag.value_type(),
            reason,
        })?;

    if !flag.accepts(&value) {
        return Err(FlagError::NotAChoice {
            flag: flag.name().to_string(),
            value: text.to_string(),
            choices: flag.allowed_choices().to_vec(),
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn decls() -> Vec<Flag> {
        vec![
            Flag::new("--name", "person to greet", ValueType::Str).required(),
            Flag::new("--times", "repeat count", ValueType::Int).default_value(1i64),
            Flag::new("--loud", "shout", ValueType::Bool),
            Flag::new("--group", "", ValueType::Str)
                .default_value("all")
                .choices(["all", "libs", "clis"]),
        ]
    }

    fn resolve(tokens: &[&str]) -> Result<Flags, FlagError> {
        // ---
        let owned = decls();
        let refs: Vec<&Flag> = owned.iter().collect();
        let raw = parse_tokens(&args(tokens), &refs, "app hello")?;
        resolve_flags(&refs, &raw, "app hello", &no_env)
    }

    #[test]
    fn separate_and_inline_values() {
        // ---
        let flags = resolve(&["--name", "World", "--times=3"]).expect("resolves");
        assert_eq!(flags.get::<&str>("--name"), Ok("World"));
        assert_eq!(flags.get::<i64>("--times"), Ok(3));
        assert_eq!(flags.source("--times"), Some(FlagSource::CommandLine));
    }

    #[test]
    fn bare_bool_means_true_and_inline_can_clear_it() {
        // ---
        let on = resolve(&["--name", "x", "--loud"]).expect("resolves");
        assert_eq!(on.get::<bool>("--loud"), Ok(true));

        let off = resolve(&["--name", "x", "--loud=false"]).expect("resolves");
        assert_eq!(off.get::<bool>("--loud"), Ok(false));
    }

    #[test]
    fn defaults_fill_missing_flags() {
        // ---
        let flags = resolve(&["--name", "x"]).expect("resolves");
        assert_eq!(flags.get::<i64>("--times"), Ok(1));
        assert_eq!(flags.source("--times"), Some(FlagSource::Default));
        assert_eq!(flags.get_opt::<bool>("--loud"), Ok(None));
    }

    #[test]
    fn missing_required_flag_fails() {
        // ---
        assert_eq!(
            resolve(&["--times", "2"]).unwrap_err(),
            FlagError::MissingRequired {
                command: "app hello".into(),
                flag: "--name".into(),
            }
        );
    }

    #[test]
    fn bad_conversion_fails() {
        // ---
        let err = resolve(&["--name", "x", "--times", "lots"]).unwrap_err();
        assert!(matches!(err, FlagError::InvalidValue { ref flag, .. } if flag == "--times"));
    }

    #[test]
    fn value_outside_choices_fails() {
        // ---
        let err = resolve(&["--name", "x", "--group", "apps"]).unwrap_err();
        assert!(matches!(err, FlagError::NotAChoice { .. }));
    }

    #[test]
    fn token_level_errors() {
        // ---
        assert!(matches!(
            resolve(&["--nme", "x"]).unwrap_err(),
            FlagError::Unknown { .. }
        ));
        assert!(matches!(
            resolve(&["--name"]).unwrap_err(),
            FlagError::MissingValue { .. }
        ));
        assert!(matches!(
            resolve(&["--name", "--times", "2"]).unwrap_err(),
            FlagError::MissingValue { .. }
        ));
        assert!(matches!(
            resolve(&["--name", "a", "--name", "b"]).unwrap_err(),
            FlagError::Repeated { .. }
        ));
        assert!(matches!(
            resolve(&["World"]).unwrap_err(),
            FlagError::UnexpectedArgument { .. }
        ));
    }

    #[test]
    fn help_only_counts_in_flag_name_position() {
        // ---
        let owned = decls();
        let refs: Vec<&Flag> = owned.iter().collect();
        let help = |tokens: &[&str]| wants_help(&args(tokens), &refs);

        assert!(help(&["--help"]));
        assert!(help(&["--name", "x", "-h"]));
        assert!(help(&["--loud", "--help"]));
        assert!(help(&["--name", "--help"]));
        assert!(!help(&["--name", "-h"]));
        assert!(!help(&["--name=--help"]));
        assert!(!help(&["--times", "-h", "--name", "x"]));
    }

    #[test]
    fn negative_numbers_are_values() {
        // ---
        let flags = resolve(&["--name", "x", "--times", "-2"]).expect("resolves");
        assert_eq!(flags.get::<i64>("--times"), Ok(-2));
    }

    #[test]
    fn environment_sits_between_command_line_and_default() {
        // ---
        let owned = vec![
            Flag::new("--name", "", ValueType::Str).required().env_var("APP_NAME"),
        ];
        let refs: Vec<&Flag> = owned.iter().collect();
        let env = |var: &str| (var == "APP_NAME").then(|| "Env".to_string());

        let raw = parse_tokens(&[], &refs, "app").expect("parses");
        let flags = resolve_flags(&refs, &raw, "app", &env).expect("resolves");
        assert_eq!(flags.get::<&str>("--name"), Ok("Env"));
        assert_eq!(flags.source("--name"), Some(FlagSource::Env));

        let raw = parse_tokens(&args(&["--name", "Cli"]), &refs, "app").expect("parses");
        let flags = resolve_flags(&refs, &raw, "app", &env).expect("resolves");
        assert_eq!(flags.get::<&str>("--name"), Ok("Cli"));
    }

    #[test]
    fn empty_environment_value_counts_as_unset() {
        // ---
        let owned = vec![Flag::new("--name", "", ValueType::Str).required().env_var("APP_NAME")];
        let refs: Vec<&Flag> = owned.iter().collect();
        let env = |_: &str| Some(String::new());

        let raw = parse_tokens(&[], &refs, "app").expect("parses");
        assert!(matches!(
            resolve_flags(&refs, &raw, "app", &env),
            Err(FlagError::MissingRequired { .. })
        ));
    }
}
