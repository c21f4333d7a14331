use std::str::FromStr;
use thiserror::Error;

/// One console instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Shorten(String),
    Resolve(String),
    List,
    Get(String),
    Delete(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("'{0}' expects one argument")]
    MissingArgument(&'static str),
    #[error("'{command}' takes {expected} argument(s), got extra input: '{extra}'")]
    UnexpectedArgument {
        command: &'static str,
        expected: usize,
        extra: String,
    },
}

pub const USAGE: &[&str] = &[
    "shorten <url>",
    "resolve <code>",
    "list",
    "get <id>",
    "delete <id>",
    "help",
    "quit",
];

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "shorten" => Command::Shorten(one_argument("shorten", &args)?),
            "resolve" => Command::Resolve(one_argument("resolve", &args)?),
            "get" => Command::Get(one_argument("get", &args)?),
            "delete" => Command::Delete(one_argument("delete", &args)?),
            "list" => no_arguments("list", &args).map(|_| Command::List)?,
            "help" => no_arguments("help", &args).map(|_| Command::Help)?,
            "quit" | "exit" => no_arguments("quit", &args).map(|_| Command::Quit)?,
            _ => return Err(CommandError::Unknown(name.to_owned())),
        };
        Ok(command)
    }
}

fn one_argument(command: &'static str, args: &[&str]) -> Result<String, CommandError> {
    match args {
        [] => Err(CommandError::MissingArgument(command)),
        [only] => Ok((*only).to_owned()),
        [_, extra @ ..] => Err(CommandError::UnexpectedArgument {
            command,
            expected: 1,
            extra: extra.join(" "),
        }),
    }
}

fn no_arguments(command: &'static str, args: &[&str]) -> Result<(), CommandError> {
    if args.is_empty() {
        return Ok(());
    }
    Err(CommandError::UnexpectedArgument {
        command,
        expected: 0,
        extra: args.join(" "),
    })
}
