//! Session-wide state shared by every part of the controller.

use serde::Serialize;
use wheelshow_core::money::Money;
use wheelshow_puzzles::domain::puzzle::PuzzleType;

/// Top-level phase of the show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Players are seated; no puzzle has been drawn.
    Setup,
    /// A toss-up puzzle is on the board.
    TossUp,
    /// A regular round.
    Main,
    /// The final-spin round.
    FinalSpin,
    /// The bonus round.
    BonusRound,
    /// The show is over.
    GameOver,
}

impl From<PuzzleType> for GamePhase {
    fn from(kind: PuzzleType) -> Self {
        match kind {
            PuzzleType::Main => Self::Main,
            PuzzleType::TossUp => Self::TossUp,
            PuzzleType::FinalSpin => Self::FinalSpin,
            PuzzleType::BonusRound => Self::BonusRound,
        }
    }
}

/// Where the controller is inside the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Nothing in progress (setup and game over).
    Idle,
    /// Toss-up puzzle loaded; waiting for the host to start it.
    TossUpAwaitingStart,
    /// Letters are appearing on their own.
    TossUpRunning,
    /// A player buzzed in; waiting for the verdict.
    TossUpBuzzed,
    /// A wrong answer paused the toss-up; it will resume shortly.
    TossUpResuming,
    /// The current player may spin or ask to solve.
    AwaitingSpin,
    /// The wheel is turning.
    Spinning,
    /// The wheel landed on cash; the current player picks a letter.
    AwaitingLetter,
    /// The current player is attempting to solve.
    SolveAttempt,
    /// The bonus contestant is choosing letters.
    BonusChoosing,
    /// The bonus clock is running.
    BonusCountdown,
    /// The bonus clock ran out; waiting for the verdict.
    BonusVerdict,
    /// The puzzle is solved; waiting for the next one.
    RoundOver,
}

/// The one mutable record of where the show stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    /// Current phase.
    pub phase: GamePhase,
    /// Catalog index of the puzzle on the board.
    pub puzzle_index: Option<usize>,
    /// Seat whose turn it is. `None` during a toss-up until someone buzzes.
    pub player_index: Option<usize>,
    /// Number of non-toss-up rounds started so far.
    pub round_number: u32,
    /// Cash value of the last spin, if a letter may be bought with it.
    pub last_spin_value: Option<Money>,
}

impl SessionState {
    /// State before the first puzzle is drawn.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Setup,
            puzzle_index: None,
            player_index: None,
            round_number: 0,
            last_spin_value: None,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
