//! The application: a validated command tree plus its version.
//!
//! `App::run` is the whole dispatcher. It walks sections by name to a leaf
//! command, resolves that command's flags, builds a `Context` and calls
//! the handler once. Every failure is returned, never retried.

use std::collections::BTreeSet;
use std::io::Write;

use example_cli_common::{ColorWhen, Palette};
use tracing::debug;

use crate::command::Command;
use crate::context::Context;
use crate::error::{DefinitionError, DispatchError, ResolveError};
use crate::flag::Flag;
use crate::help;
use crate::parse::{self, is_help};
use crate::section::Section;
use crate::value::ValueType;

/// Name of the built-in global color flag.
pub const COLOR_FLAG: &str = "--color";

/// Name of the built-in version command on the root section.
pub const VERSION_COMMAND: &str = "version";

/// A command tree that has passed validation.
#[derive(Debug, Clone)]
pub struct App {
    name: String,
    version: String,
    root: Section,
    global_flags: Vec<Flag>,
}

/// Collects global flags before validating the tree.
#[derive(Debug, Clone)]
pub struct AppBuilder {
    name: String,
    version: String,
    root: Section,
    global_flags: Vec<Flag>,
}

impl AppBuilder {
    // ---
    /// Adds a flag accepted by every command.
    pub fn global_flag(mut self, flag: Flag) -> Self {
        self.global_flags.push(flag);
        self
    }

    /// Adds the built-ins and validates the whole tree.
    pub fn build(self) -> Result<App, DefinitionError> {
        // ---
        let AppBuilder {
            name,
            version,
            mut root,
            mut global_flags,
        } = self;

        if !root.has_child(VERSION_COMMAND) {
            root.push_command(
                VERSION_COMMAND,
                Command::new("Print the version and exit", print_version),
            );
        }

        global_flags.push(
            Flag::new(COLOR_FLAG, "Use ANSI colors in output", ValueType::Str)
                .default_value(ColorWhen::Auto.as_str())
                .choices(ColorWhen::CHOICES),
        );

        validate_section(&root, &name, &global_flags)?;

        Ok(App {
            name,
            version,
            root,
            global_flags,
        })
    }
}

enum Target<'a> {
    SectionHelp {
        section: &'a Section,
        path: Vec<String>,
        rest: &'a [String],
    },
    Command {
        command: &'a Command,
        path: Vec<String>,
        rest: &'a [String],
    },
}

impl App {
    // ---
    /// Starts building an app.
    ///
    /// `version` is injected by the caller (usually from Cargo) rather than
    /// read from any global.
    pub fn builder(
        name: impl Into<String>,
        version: impl Into<String>,
        root: Section,
    ) -> AppBuilder {
        // ---
        AppBuilder {
            name: name.into(),
            version: version.into(),
            root,
            global_flags: Vec::new(),
        }
    }

    /// Builds an app with no extra global flags.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        root: Section,
    ) -> Result<Self, DefinitionError> {
        // ---
        Self::builder(name, version, root).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn root(&self) -> &Section {
        &self.root
    }

    pub fn global_flags(&self) -> &[Flag] {
        &self.global_flags
    }

    /// Dispatches one invocation.
    ///
    /// `args` is the full process argument list; its first element (the
    /// program name) is skipped. Command output goes to `out`.
    pub fn run<I, S>(&self, args: I, out: &mut dyn Write) -> Result<(), DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        // ---
        let args: Vec<String> = args.into_iter().skip(1).map(Into::into).collect();
        self.run_with_env(&args, out, &|var: &str| std::env::var(var).ok())
    }

    /// `run` with an explicit environment lookup.
    pub fn run_with_env(
        &self,
        args: &[String],
        out: &mut dyn Write,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<(), DispatchError> {
        // ---
        match self.resolve(args)? {
            Target::SectionHelp {
                section,
                path,
                rest,
            } => {
                let palette = palette_hint(rest);
                help::write_section_help(out, palette, &path.join(" "), section)?;
                Ok(())
            }
            Target::Command {
                command,
                path,
                rest,
            } => self.invoke(command, path, rest, out, env),
        }
    }

    fn invoke(
        &self,
        command: &Command,
        path: Vec<String>,
        rest: &[String],
        out: &mut dyn Write,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<(), DispatchError> {
        // ---
        let command_path = path.join(" ");

        let decls: Vec<&Flag> = command
            .flags()
            .iter()
            .chain(self.global_flags.iter())
            .collect();

        if parse::wants_help(rest, &decls) {
            let palette = palette_hint(rest);
            help::write_command_help(out, palette, &command_path, command, &self.global_flags)?;
            return Ok(());
        }

        let raw = parse::parse_tokens(rest, &decls, &command_path)?;
        let flags = parse::resolve_flags(&decls, &raw, &command_path, env)?;

        // `--color` always has a value: it carries a default and its choices
        // are exactly the spellings `ColorWhen` parses.
        let color = flags
            .get::<&str>(COLOR_FLAG)
            .ok()
            .and_then(|s| s.parse::<ColorWhen>().ok())
            .unwrap_or_default();
        let palette = Palette::new(color.should_color_stdout());

        debug!("Dispatching `{}` (color: {})", command_path, color);

        let mut ctx = Context::new(flags, palette, out, path, &self.version);
        (command.action())(&mut ctx).map_err(DispatchError::Handler)?;
        ctx.out.flush()?;

        Ok(())
    }

    fn resolve<'a>(&'a self, args: &'a [String]) -> Result<Target<'a>, ResolveError> {
        // ---
        let mut section = &self.root;
        let mut path = vec![self.name.clone()];

        for (i, token) in args.iter().enumerate() {
            if token.starts_with('-') {
                let rest = &args[i..];
                let globals: Vec<&Flag> = self.global_flags.iter().collect();
                if parse::wants_help(rest, &globals) {
                    return Ok(Target::SectionHelp {
                        section,
                        path,
                        rest,
                    });
                }
                break;
            }

            if let Some(child) = section.find_section(token) {
                debug!("Entering section `{}`", token);
                section = child;
                path.push(token.clone());
                continue;
            }

            if let Some(command) = section.find_command(token) {
                path.push(token.clone());
                return Ok(Target::Command {
                    command,
                    path,
                    rest: &args[i + 1..],
                });
            }

            return Err(ResolveError::UnknownCommand {
                path: path.join(" "),
                name: token.clone(),
                available: section.child_names(),
            });
        }

        Err(ResolveError::MissingCommand {
            path: path.join(" "),
            available: section.child_names(),
        })
    }
}

fn print_version(ctx: &mut Context<'_>) -> anyhow::Result<()> {
    // ---
    let version = ctx.version().to_string();
    writeln!(ctx.out, "{version}")?;
    Ok(())
}

/// Best-effort color choice for help output, read straight from the
/// tokens since help skips flag resolution.
fn palette_hint(tokens: &[String]) -> Palette {
    // ---
    let mut choice = None;
    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        if let Some(value) = token.strip_prefix("--color=") {
            choice = Some(value.to_string());
        } else if token == COLOR_FLAG {
            choice = iter.next().cloned();
        }
    }

    let color = choice
        .and_then(|c| c.parse::<ColorWhen>().ok())
        .unwrap_or_default();
    Palette::new(color.should_color_stdout())
}

fn valid_child_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('-') && !name.chars().any(char::is_whitespace)
}

fn validate_section(
    section: &Section,
    path: &str,
    globals: &[Flag],
) -> Result<(), DefinitionError> {
    // ---
    let mut seen = BTreeSet::new();
    let names = section
        .commands()
        .map(|(n, _)| n)
        .chain(section.sections().map(|(n, _)| n));

    for name in names {
        if !valid_child_name(name) {
            return Err(DefinitionError::InvalidName {
                path: path.to_string(),
                name: name.to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(DefinitionError::DuplicateName {
                path: path.to_string(),
                name: name.to_string(),
            });
        }
    }

    for (name, command) in section.commands() {
        let command_path = format!("{path} {name}");
        validate_flags(command.flags().iter().chain(globals.iter()), &command_path)?;
    }

    for (name, child) in section.sections() {
        validate_section(child, &format!("{path} {name}"), globals)?;
    }

    Ok(())
}

fn validate_flags<'a>(
    flags: impl Iterator<Item = &'a Flag>,
    command: &str,
) -> Result<(), DefinitionError> {
    // ---
    let mut seen = BTreeSet::new();

    for flag in flags {
        let name = flag.name();

        if is_help(name) {
            return Err(DefinitionError::ReservedFlag {
                flag: name.to_string(),
            });
        }
        if name.len() < 2 || !name.starts_with('-') || name.contains('=') {
            return Err(DefinitionError::InvalidFlagName {
                command: command.to_string(),
                flag: name.to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(DefinitionError::DuplicateFlag {
                command: command.to_string(),
                flag: name.to_string(),
            });
        }

        if let Some(default) = flag.default() {
            if flag.is_required() {
                return Err(DefinitionError::RequiredWithDefault {
                    flag: name.to_string(),
                });
            }
            if default.value_type() != flag.value_type() {
                return Err(DefinitionError::DefaultTypeMismatch {
                    flag: name.to_string(),
                    expected: flag.value_type(),
                    found: default.value_type(),
                });
            }
            if !flag.accepts(default) {
                return Err(DefinitionError::DefaultNotAChoice {
                    flag: name.to_string(),
                    value: default.to_string(),
                });
            }
        }
    }

    Ok(())
}
