//! `hello`: greet someone by name.

use std::io::Write;

use anyhow::Result;
use cli_dispatch::{Command, Context, Flag, ValueType};
use tracing::debug;

pub const NAME_FLAG: &str = "--name";

/// Environment variable consulted when `--name` is not given.
pub const NAME_ENV: &str = "EXAMPLE_CLI_NAME";

pub fn command() -> Command {
    // ---
    Command::new("Say hello", hello).flag(
        Flag::new(NAME_FLAG, "Person to greet", ValueType::Str)
            .required()
            .env_var(NAME_ENV),
    )
}

pub fn greeting(name: &str) -> String {
    format!("Hello {name}!!")
}

fn hello(ctx: &mut Context<'_>) -> Result<()> {
    // ---
    let name: &str = ctx.flags.get(NAME_FLAG)?;
    debug!("Greeting {:?} (from {:?})", name, ctx.flags.source(NAME_FLAG));

    writeln!(ctx.out, "{}", greeting(name))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn greeting_format() {
        // ---
        assert_eq!(greeting("World"), "Hello World!!");
        assert_eq!(greeting(""), "Hello !!");
    }

    #[test]
    fn name_flag_is_required_with_env_fallback() {
        // ---
        let command = command();
        let flag = &command.flags()[0];
        assert_eq!(flag.name(), NAME_FLAG);
        assert!(flag.is_required());
        assert_eq!(flag.env(), Some(NAME_ENV));
    }
}
