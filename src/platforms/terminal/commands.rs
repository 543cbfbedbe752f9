use thiserror::Error;

use crate::models::VideoId;

/// A video addressed either by its row on the dashboard or by server id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 1-based row of the current dashboard.
    Row(usize),
    Id(VideoId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Register { name: String, email: String, password: String },
    Logout,
    Whoami,
    Refresh,
    Search(String),
    Sort,
    Title(String),
    Description(String),
    Source(String),
    Add,
    Delete(Target),
    Play(Target),
    Back,
    Help,
    Quit,
    Empty,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "login" => match args.as_slice() {
            [email, password] => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            _ => return Err(CommandError::Usage("login <email> <password>")),
        },
        "register" | "signup" => match args.as_slice() {
            [name, email, password] => Command::Register {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
            _ => return Err(CommandError::Usage("register <name> <email> <password>")),
        },
        "logout" => Command::Logout,
        "whoami" => Command::Whoami,
        "refresh" | "r" => Command::Refresh,
        // Free text; an empty argument clears the search.
        "search" | "/" => Command::Search(rest.to_string()),
        "sort" => Command::Sort,
        "title" => Command::Title(rest.to_string()),
        "desc" | "description" => Command::Description(rest.to_string()),
        "source" | "youtube" => Command::Source(rest.to_string()),
        "add" => Command::Add,
        "delete" | "rm" => Command::Delete(target(&args, "delete <row|id>")?),
        "play" | "p" => Command::Play(target(&args, "play <row|id>")?),
        "back" | "b" => Command::Back,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn target(args: &[&str], usage: &'static str) -> Result<Target, CommandError> {
    match args {
        [arg] => Ok(match arg.parse::<usize>() {
            Ok(row) if row > 0 => Target::Row(row),
            _ => Target::Id(VideoId::new(*arg)),
        }),
        _ => Err(CommandError::Usage(usage)),
    }
}
