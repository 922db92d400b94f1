use crate::app::commands::{menu, place, price, stores};
use crate::core::args::ParsedArgs;
use crate::core::output::{self, Payload};
use crate::domain::ports::OrderingApi;
use crate::utils::error::{CommandError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Stores,
    Menu,
    Price,
    Place,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stores" => Ok(Command::Stores),
            "menu" => Ok(Command::Menu),
            "price" => Ok(Command::Price),
            "place" => Ok(Command::Place),
            other => Err(CommandError::validation(format!("unknown command {}", other))),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Stores => "stores",
            Command::Menu => "menu",
            Command::Price => "price",
            Command::Place => "place",
        };
        f.write_str(name)
    }
}

/// One CLI run: the command name plus its options.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub command: Command,
    pub args: ParsedArgs,
}

impl Invocation {
    /// `argv` excludes the program name.
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Result<Self> {
        // `place` is accepted but not listed here
        let missing = || CommandError::validation("missing command (stores|menu|price)");
        let (name, rest) = argv.split_first().ok_or_else(missing)?;
        let name: &str = name.as_ref();
        if name.is_empty() {
            return Err(missing());
        }

        Ok(Self {
            command: name.parse()?,
            args: ParsedArgs::parse(rest),
        })
    }

    pub async fn run<A: OrderingApi + ?Sized>(&self, api: &A) -> Result<Payload> {
        match self.command {
            Command::Stores => stores::run(&self.args, api).await,
            Command::Menu => menu::run(&self.args, api).await,
            Command::Price => price::run(&self.args, api).await,
            Command::Place => place::run(&self.args, api).await,
        }
    }

    /// Runs the command and renders the single output line.
    pub async fn execute<A: OrderingApi + ?Sized>(&self, api: &A) -> String {
        match self.run(api).await {
            Ok(payload) => {
                tracing::debug!("{} succeeded", self.command);
                output::success(payload)
            }
            Err(e) => {
                tracing::debug!("{} failed ({:?}): {}", self.command, e.category(), e);
                output::failure(&e)
            }
        }
    }
}

/// Parses `argv` and runs it against `api`, always yielding one JSON line.
pub async fn dispatch<S, A>(argv: &[S], api: &A) -> String
where
    S: AsRef<str>,
    A: OrderingApi + ?Sized,
{
    match Invocation::from_argv(argv) {
        Ok(invocation) => invocation.execute(api).await,
        Err(e) => output::failure(&e),
    }
}
