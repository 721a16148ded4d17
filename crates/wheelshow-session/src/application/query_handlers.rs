//! Query handlers for the Game Session context.
//!
//! Read-only views built from the controller for hosts and renderers.

use serde::Serialize;
use wheelshow_board::domain::snapshot::BoardSnapshot;
use wheelshow_rules::domain::ledger::Standing;
use wheelshow_rules::domain::wheel::WheelSnapshot;

use crate::domain::aggregates::GamePhaseController;
use crate::domain::state::{GamePhase, Stage};

/// One scoreboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerLine {
    /// Seat number.
    pub player: usize,
    /// Display name.
    pub name: String,
    /// Round money, formatted.
    pub round: String,
    /// Banked money, formatted.
    pub total: String,
    /// Whether this seat has the turn.
    pub has_turn: bool,
}

/// The scoreboard as the host sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreboardView {
    /// Current phase.
    pub phase: GamePhase,
    /// Current stage.
    pub stage: Stage,
    /// Rounds started so far.
    pub round_number: u32,
    /// Value of the last spin, formatted.
    pub last_spin_value: Option<String>,
    /// One row per seat.
    pub players: Vec<PlayerLine>,
}

/// Everything a renderer draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageView {
    /// The board.
    pub board: BoardSnapshot,
    /// The wheel.
    pub wheel: WheelSnapshot,
}

/// Builds the host scoreboard.
#[must_use]
pub fn get_scoreboard(controller: &GamePhaseController) -> ScoreboardView {
    let state = controller.state();
    let players = controller
        .ledger()
        .players()
        .iter()
        .enumerate()
        .map(|(i, p)| PlayerLine {
            player: i,
            name: p.name.clone(),
            round: p.round_score.to_string(),
            total: p.total_score.to_string(),
            has_turn: state.player_index == Some(i),
        })
        .collect();
    ScoreboardView {
        phase: state.phase,
        stage: controller.stage(),
        round_number: state.round_number,
        last_spin_value: state.last_spin_value.map(|v| v.to_string()),
        players,
    }
}

/// Players ordered by total money, highest first.
#[must_use]
pub fn get_standings(controller: &GamePhaseController) -> Vec<Standing> {
    controller.ledger().standings()
}

/// Board and wheel snapshots.
#[must_use]
pub fn get_stage_view(controller: &GamePhaseController) -> StageView {
    StageView {
        board: controller.board().snapshot(),
        wheel: controller.wheel().snapshot(),
    }
}
