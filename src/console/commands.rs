//! Console domain: parsing command lines into console commands.

use thiserror::Error;

use crate::tasks::Difficulty;

/// One line typed at the prompt.
///
/// Task and prerequisite references are either the 1-based number shown in
/// the list or the raw id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Add {
        difficulty: Difficulty,
        title: String,
    },
    Toggle {
        task: String,
    },
    Check {
        task: String,
        prerequisite: String,
    },
    Prereq {
        task: String,
    },
    Label {
        task: String,
        prerequisite: String,
        label: String,
    },
    Shop,
    Buy {
        avatar_id: String,
    },
    Equip {
        avatar_id: String,
    },
    Stats,
    History {
        query: Option<String>,
    },
    Help,
    Quit,
    #[cfg(feature = "dev-tools")]
    Grant {
        experience: i64,
        coins: i64,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs {missing}")]
    MissingArgument {
        command: &'static str,
        missing: &'static str,
    },

    #[error("'{value}' is not a valid {expected}")]
    InvalidArgument {
        value: String,
        expected: &'static str,
    },
}

fn missing(command: &'static str, missing: &'static str) -> CommandParseError {
    CommandParseError::MissingArgument { command, missing }
}

/// Split off the first whitespace-delimited word
fn next_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => Some((word, rest.trim_start())),
        None => Some((input, "")),
    }
}

/// Parse a non-blank console line
pub fn parse_command(line: &str) -> Result<ConsoleCommand, CommandParseError> {
    let Some((verb, rest)) = next_word(line) else {
        return Err(CommandParseError::Unknown(String::new()));
    };
    let rest = rest.trim();

    match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" => Ok(ConsoleCommand::List),
        "add" => {
            let (keyword, title) = next_word(rest).ok_or(missing("add", "a difficulty"))?;
            let difficulty =
                Difficulty::from_keyword(keyword).ok_or_else(|| CommandParseError::InvalidArgument {
                    value: keyword.to_string(),
                    expected: "difficulty (easy, medium, hard)",
                })?;
            if title.trim().is_empty() {
                return Err(missing("add", "a title"));
            }
            Ok(ConsoleCommand::Add {
                difficulty,
                title: title.trim().to_string(),
            })
        }
        "toggle" | "t" => {
            let (task, _) = next_word(rest).ok_or(missing("toggle", "a task"))?;
            Ok(ConsoleCommand::Toggle {
                task: task.to_string(),
            })
        }
        "check" | "c" => {
            let (task, rest) = next_word(rest).ok_or(missing("check", "a task"))?;
            let (prerequisite, _) = next_word(rest).ok_or(missing("check", "a prerequisite"))?;
            Ok(ConsoleCommand::Check {
                task: task.to_string(),
                prerequisite: prerequisite.to_string(),
            })
        }
        "prereq" => {
            let (task, _) = next_word(rest).ok_or(missing("prereq", "a task"))?;
            Ok(ConsoleCommand::Prereq {
                task: task.to_string(),
            })
        }
        "label" => {
            let (task, rest) = next_word(rest).ok_or(missing("label", "a task"))?;
            let (prerequisite, label) =
                next_word(rest).ok_or(missing("label", "a prerequisite"))?;
            Ok(ConsoleCommand::Label {
                task: task.to_string(),
                prerequisite: prerequisite.to_string(),
                label: label.trim().to_string(),
            })
        }
        "shop" => Ok(ConsoleCommand::Shop),
        "buy" => {
            let (avatar_id, _) = next_word(rest).ok_or(missing("buy", "an avatar id"))?;
            Ok(ConsoleCommand::Buy {
                avatar_id: avatar_id.to_string(),
            })
        }
        "equip" => {
            let (avatar_id, _) = next_word(rest).ok_or(missing("equip", "an avatar id"))?;
            Ok(ConsoleCommand::Equip {
                avatar_id: avatar_id.to_string(),
            })
        }
        "stats" => Ok(ConsoleCommand::Stats),
        "history" => Ok(ConsoleCommand::History {
            query: (!rest.is_empty()).then(|| rest.to_string()),
        }),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "exit" | "q" => Ok(ConsoleCommand::Quit),
        #[cfg(feature = "dev-tools")]
        "grant" => parse_grant(rest),
        other => Err(CommandParseError::Unknown(other.to_string())),
    }
}

#[cfg(feature = "dev-tools")]
fn parse_grant(rest: &str) -> Result<ConsoleCommand, CommandParseError> {
    let (kind, rest) = next_word(rest).ok_or(missing("grant", "xp or coins"))?;
    let (amount, _) = next_word(rest).ok_or(missing("grant", "an amount"))?;
    let amount: i64 = amount
        .parse()
        .map_err(|_| CommandParseError::InvalidArgument {
            value: amount.to_string(),
            expected: "amount",
        })?;

    match kind.to_ascii_lowercase().as_str() {
        "xp" => Ok(ConsoleCommand::Grant {
            experience: amount,
            coins: 0,
        }),
        "coins" => Ok(ConsoleCommand::Grant {
            experience: 0,
            coins: amount,
        }),
        other => Err(CommandParseError::InvalidArgument {
            value: other.to_string(),
            expected: "grant kind (xp, coins)",
        }),
    }
}
