//! Console line protocol.
//!
//! One host command per line. Keywords are case-insensitive and player
//! numbers are 1-based, the way they are printed on the scoreboard.

use thiserror::Error;
use wheelshow_core::money::Money;
use wheelshow_session::domain::commands::{Direction, HostCommand};

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// A command for the session.
    Command(HostCommand),
    /// Close the console.
    Quit,
}

/// A line that could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// The first word is not a known command.
    #[error("unknown command: {0}")]
    Unknown(String),

    /// A required argument is missing.
    #[error("{command} needs {what}")]
    Missing {
        /// The command word.
        command: &'static str,
        /// What was expected.
        what: &'static str,
    },

    /// The argument is not a player number.
    #[error("not a player number: {0}")]
    BadPlayer(String),

    /// The argument is not a dollar amount.
    #[error("not an amount: {0}")]
    BadAmount(String),

    /// The argument is not a single character.
    #[error("expected a single letter, got: {0}")]
    BadLetter(String),
}

/// Parses one console line. Blank lines parse to `None`.
///
/// # Errors
///
/// Returns `InputError` for an unknown keyword or a bad argument.
pub fn parse_line(line: &str) -> Result<Option<ConsoleInput>, InputError> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };
    let command = match keyword.to_ascii_lowercase().as_str() {
        "quit" | "exit" => return Ok(Some(ConsoleInput::Quit)),
        "next" => HostCommand::AdvancePuzzle,
        "start" => HostCommand::StartTossUp,
        "spin" => HostCommand::RequestSpin,
        "solve" => HostCommand::RequestSolve,
        "up" => HostCommand::Directional(Direction::Up),
        "down" => HostCommand::Directional(Direction::Down),
        "guess" => HostCommand::GuessLetter(letter(words.next())?),
        "correct" => HostCommand::AdjudicateSolve {
            correct: true,
            player: words.next().map(seat).transpose()?,
        },
        "incorrect" => HostCommand::AdjudicateSolve {
            correct: false,
            player: words.next().map(seat).transpose()?,
        },
        "turn" => HostCommand::SetTurn(seat(required(words.next(), "turn", "a player")?)?),
        "score" => HostCommand::OverrideScore {
            player: seat(required(words.next(), "score", "a player")?)?,
            round: amount(required(words.next(), "score", "a round amount")?)?,
            total: amount(required(words.next(), "score", "a total amount")?)?,
        },
        _ => return Err(InputError::Unknown(keyword.to_owned())),
    };
    Ok(Some(ConsoleInput::Command(command)))
}

fn required<'a>(
    word: Option<&'a str>,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, InputError> {
    word.ok_or(InputError::Missing { command, what })
}

fn letter(word: Option<&str>) -> Result<char, InputError> {
    let word = required(word, "guess", "a letter")?;
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(InputError::BadLetter(word.to_owned())),
    }
}

fn seat(word: &str) -> Result<usize, InputError> {
    word.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| InputError::BadPlayer(word.to_owned()))
}

fn amount(word: &str) -> Result<Money, InputError> {
    word.trim_start_matches('$')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Money::from_dollars)
        .ok_or_else(|| InputError::BadAmount(word.to_owned()))
}
