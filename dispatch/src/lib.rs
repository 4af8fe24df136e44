//! Command tree and dispatcher.
//!
//! An `App` is a static tree of `Section`s whose leaves are `Command`s.
//! Each command declares typed `Flag`s. `App::run` walks the tree by
//! name, resolves flag values (command line, environment, default),
//! and calls the command's handler with a fresh `Context`.
//!
//! ```no_run
//! use cli_dispatch::{App, Command, Context, Flag, Section, ValueType};
//! use std::io::Write;
//!
//! fn hello(ctx: &mut Context<'_>) -> anyhow::Result<()> {
//!     let name: &str = ctx.flags.get("--name")?;
//!     writeln!(ctx.out, "Hello {name}!!")?;
//!     Ok(())
//! }
//!
//! let root = Section::new("Greeter").command(
//!     "hello",
//!     Command::new("Say hello", hello)
//!         .flag(Flag::new("--name", "Person to greet", ValueType::Str).required()),
//! );
//! let app = App::new("greeter", "0.1.0", root)?;
//! app.run(std::env::args(), &mut std::io::stdout())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod app;
pub mod command;
pub mod context;
pub mod error;
pub mod flag;
mod help;
mod parse;
pub mod section;
pub mod value;

pub use app::{App, AppBuilder, COLOR_FLAG, VERSION_COMMAND};
pub use command::{Action, Command};
pub use context::{Context, FlagSource, Flags};
pub use error::{AccessError, DefinitionError, DispatchError, FlagError, ResolveError};
pub use flag::Flag;
pub use section::Section;
pub use value::{FromValue, Value, ValueType};
