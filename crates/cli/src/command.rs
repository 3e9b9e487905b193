//! Console command parsing.

use thiserror::Error;

use retailbank_core::Amount;

/// The words the console understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    Login,
    Topup,
    Pay,
    Exit,
}

impl CommandAction {
    pub const ALL: [CommandAction; 4] = [Self::Login, Self::Topup, Self::Pay, Self::Exit];

    pub fn word(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Topup => "topup",
            Self::Pay => "pay",
            Self::Exit => "exit",
        }
    }

    /// Exact, case-sensitive match on the command word.
    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.word() == word)
    }
}

impl core::fmt::Display for CommandAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.word())
    }
}

/// A fully parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { name: String },
    Topup { amount: Amount },
    Pay { target: String, amount: Amount },
    Exit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("input command is empty")]
    Empty,

    #[error("not a correct command: {0}")]
    Unknown(String),

    #[error("not enough arguments for {0}")]
    MissingArgument(CommandAction),

    #[error("input is not a valid number: {0}")]
    InvalidAmount(String),
}

impl Command {
    /// Parse one line of input. Extra trailing words are ignored.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let word = words.next().ok_or(CommandError::Empty)?;
        let action =
            CommandAction::from_word(word).ok_or_else(|| CommandError::Unknown(word.to_string()))?;

        let mut arg = || words.next().ok_or(CommandError::MissingArgument(action));

        match action {
            CommandAction::Login => Ok(Self::Login {
                name: arg()?.to_string(),
            }),
            CommandAction::Topup => Ok(Self::Topup {
                amount: parse_amount(arg()?)?,
            }),
            CommandAction::Pay => {
                let target = arg()?.to_string();
                let amount = parse_amount(arg()?)?;
                Ok(Self::Pay { target, amount })
            }
            CommandAction::Exit => Ok(Self::Exit),
        }
    }
}

fn parse_amount(value: &str) -> Result<Amount, CommandError> {
    value
        .parse::<Amount>()
        .map_err(|_| CommandError::InvalidAmount(value.to_string()))
}
