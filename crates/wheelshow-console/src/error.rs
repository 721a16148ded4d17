//! Wheelshow — console error types.

use thiserror::Error;
use wheelshow_core::error::GameError;
use wheelshow_puzzles::application::loader::PuzzleSourceError;

/// Startup and runtime errors for the host console.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading input or writing events failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The puzzle file could not be loaded.
    #[error("puzzle error: {0}")]
    Puzzles(#[from] PuzzleSourceError),

    /// The game could not be set up.
    #[error("game error: {0}")]
    Game(#[from] GameError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_errors_keep_their_message() {
        let err = AppError::from(GameError::EmptyRoster);
        assert_eq!(err.to_string(), "game error: configuration error: roster is empty");
    }

    #[test]
    fn test_puzzle_errors_convert() {
        let err = AppError::from(PuzzleSourceError::UnsupportedFormat("txt".into()));
        assert!(matches!(err, AppError::Puzzles(_)));
    }
}
