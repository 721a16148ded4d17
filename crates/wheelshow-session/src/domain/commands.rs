//! Host commands for the Game Session context.

use serde::Serialize;
use wheelshow_core::command::Command;
use wheelshow_core::money::Money;

/// The two-button presenter remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Confirm, spin, or solve.
    Up,
    /// Reject or move on.
    Down,
}

/// A discrete instruction from the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostCommand {
    /// Draw the next puzzle (also starts the show from setup).
    AdvancePuzzle,
    /// Start the toss-up that is on the board.
    StartTossUp,
    /// Spin the wheel for the current player.
    RequestSpin,
    /// Guess a letter for the current player.
    GuessLetter(char),
    /// A player wants to solve (buzz-in during a toss-up).
    RequestSolve,
    /// The host's verdict on a solve attempt. `player` names the solver;
    /// when absent the current player is used.
    AdjudicateSolve {
        /// Whether the answer was right.
        correct: bool,
        /// Seat of the solver.
        player: Option<usize>,
    },
    /// Give the turn to a seat.
    SetTurn(usize),
    /// Replace a player's scores.
    OverrideScore {
        /// Seat to change.
        player: usize,
        /// New round score.
        round: Money,
        /// New total score.
        total: Money,
    },
    /// A presenter-remote button, mapped to whichever command fits.
    Directional(Direction),
}

impl Command for HostCommand {
    fn command_type(&self) -> &'static str {
        match self {
            Self::AdvancePuzzle => "session.advance_puzzle",
            Self::StartTossUp => "session.start_toss_up",
            Self::RequestSpin => "session.request_spin",
            Self::GuessLetter(_) => "session.guess_letter",
            Self::RequestSolve => "session.request_solve",
            Self::AdjudicateSolve { .. } => "session.adjudicate_solve",
            Self::SetTurn(_) => "session.set_turn",
            Self::OverrideScore { .. } => "session.override_score",
            Self::Directional(_) => "session.directional",
        }
    }
}

/// Why a command left the session unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The command does not apply to the current phase or stage.
    WrongPhase,
    /// The current player already spun this turn.
    AlreadySpun,
    /// The final-spin wheel has already been spun.
    FinalSpinTaken,
    /// The guess is not a letter.
    NotALetter,
    /// The letter was already called for this puzzle.
    LetterAlreadyUsed,
    /// The player cannot afford a vowel.
    VowelUnaffordable,
    /// The bonus contestant has already picked enough of this kind.
    BonusQuotaFull,
    /// No such seat.
    UnknownPlayer,
    /// The remote button has no meaning right now.
    NoRouteForInput,
}

/// What happened to a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command changed the session.
    Applied,
    /// The command was not valid now; nothing changed.
    Ignored(IgnoreReason),
}

impl CommandOutcome {
    /// Returns `true` if the command changed the session.
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_type_names_are_namespaced() {
        assert_eq!(HostCommand::GuessLetter('R').command_type(), "session.guess_letter");
        assert_eq!(
            HostCommand::Directional(Direction::Up).command_type(),
            "session.directional"
        );
    }
}
