//! Domain events for the Game Session context.

use serde::Serialize;
use wheelshow_board::domain::snapshot::BoardSnapshot;
use wheelshow_core::event::{DomainEvent, EventMetadata};
use wheelshow_core::money::Money;
use wheelshow_puzzles::domain::catalog::CatalogSummary;
use wheelshow_rules::domain::ledger::Standing;
use wheelshow_rules::domain::player::Player;
use wheelshow_rules::domain::wheel::{Wedge, WheelSnapshot};

use super::commands::IgnoreReason;
use super::state::{GamePhase, Stage};

/// Named sound effects. Playback is fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioCue {
    LetterReveal,
    Incorrect,
    Bankrupt,
    PuzzleSolve,
    TossupSolve,
    PuzzleReveal,
    SpeedUp,
    Theme,
    Countdown,
    BonusChoose,
    TossUp,
    Beep,
}

/// How a cue should be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CueMode {
    /// Once.
    Play,
    /// Repeatedly until stopped.
    Loop,
    /// Stop a playing or looping cue.
    Stop,
}

/// Event payload variants for the Game Session context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEventKind {
    /// The roster is seated and the puzzle list is known.
    SetupOpened {
        /// Puzzle counts by type.
        summary: CatalogSummary,
        /// Player names in seat order.
        players: Vec<String>,
    },
    /// A new phase began.
    PhaseChanged {
        /// The new phase.
        phase: GamePhase,
        /// Catalog index of the puzzle on the board.
        puzzle_index: Option<usize>,
        /// Rounds started so far.
        round_number: u32,
        /// Category of the puzzle on the board.
        category: Option<String>,
    },
    /// The stage inside the phase changed.
    StageChanged {
        /// The new stage.
        stage: Stage,
    },
    /// A sound cue.
    CuePlayed {
        /// Which sound.
        cue: AudioCue,
        /// How to play it.
        mode: CueMode,
    },
    /// The board changed.
    BoardChanged {
        /// The board after the change.
        board: BoardSnapshot,
    },
    /// The wheel moved.
    WheelMoved {
        /// The wheel after the move.
        wheel: WheelSnapshot,
    },
    /// The wheel stopped.
    SpinResolved {
        /// Who spun.
        player: usize,
        /// Index of the wedge under the pointer.
        index: usize,
        /// The wedge under the pointer.
        wedge: Wedge,
    },
    /// A letter was called.
    LetterGuessed {
        /// Who called it.
        player: usize,
        /// The letter, uppercased.
        letter: char,
        /// Positions it reveals.
        count: usize,
        /// Money it earned; negative for a vowel purchase.
        earned: Money,
    },
    /// The turn moved.
    TurnChanged {
        /// Seat that now has the turn.
        player: usize,
        /// Name of that player.
        name: String,
    },
    /// Scores changed.
    ScoresChanged {
        /// Every player after the change.
        players: Vec<Player>,
    },
    /// Someone asked to solve.
    SolveRequested {
        /// The current player, if any.
        player: Option<usize>,
    },
    /// A solve attempt was judged wrong.
    SolveRejected {
        /// The player who tried.
        player: usize,
    },
    /// The puzzle was solved.
    PuzzleSolved {
        /// Seat of the solver.
        player: usize,
        /// Name of the solver.
        name: String,
        /// Solver's total after banking.
        total_score: Money,
    },
    /// The player who will play the bonus round.
    BonusContestant {
        /// Seat of the contestant.
        player: usize,
        /// Name of the contestant.
        name: String,
    },
    /// The show is over.
    GameOver {
        /// Players ordered by total, highest first.
        standings: Vec<Standing>,
    },
    /// A command had no effect.
    CommandIgnored {
        /// The ignored command's type name.
        command: String,
        /// Why it had no effect.
        reason: IgnoreReason,
    },
}

/// Domain event envelope for the Game Session context.
#[derive(Debug, Clone)]
pub struct GameEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: GameEventKind,
}

impl GameEventKind {
    /// Routing name of the event.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SetupOpened { .. } => "session.setup_opened",
            Self::PhaseChanged { .. } => "session.phase_changed",
            Self::StageChanged { .. } => "session.stage_changed",
            Self::CuePlayed { .. } => "session.cue_played",
            Self::BoardChanged { .. } => "session.board_changed",
            Self::WheelMoved { .. } => "session.wheel_moved",
            Self::SpinResolved { .. } => "session.spin_resolved",
            Self::LetterGuessed { .. } => "session.letter_guessed",
            Self::TurnChanged { .. } => "session.turn_changed",
            Self::ScoresChanged { .. } => "session.scores_changed",
            Self::SolveRequested { .. } => "session.solve_requested",
            Self::SolveRejected { .. } => "session.solve_rejected",
            Self::PuzzleSolved { .. } => "session.puzzle_solved",
            Self::BonusContestant { .. } => "session.bonus_contestant",
            Self::GameOver { .. } => "session.game_over",
            Self::CommandIgnored { .. } => "session.command_ignored",
        }
    }
}

impl DomainEvent for GameEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
