//! Presenter-remote routing.
//!
//! The remote has two buttons. What they mean depends only on the phase
//! and stage, so the mapping is a pure lookup.

use super::commands::{Direction, HostCommand};
use super::state::{GamePhase, Stage};

const fn verdict(correct: bool) -> HostCommand {
    HostCommand::AdjudicateSolve {
        correct,
        player: None,
    }
}

/// The single command a remote button stands for in this phase and stage,
/// if any.
#[must_use]
pub fn route(phase: GamePhase, stage: Stage, direction: Direction) -> Option<HostCommand> {
    use Direction::{Down, Up};

    match (phase, stage, direction) {
        (GamePhase::Setup, _, Up) | (_, Stage::RoundOver, _) => Some(HostCommand::AdvancePuzzle),
        (GamePhase::TossUp, Stage::TossUpAwaitingStart, Up) => Some(HostCommand::StartTossUp),
        (GamePhase::TossUp, Stage::TossUpRunning | Stage::TossUpResuming, Up)
        | (GamePhase::Main | GamePhase::FinalSpin, Stage::AwaitingSpin, Down)
        | (GamePhase::Main | GamePhase::FinalSpin, Stage::AwaitingLetter, Up) => {
            Some(HostCommand::RequestSolve)
        }
        (GamePhase::Main | GamePhase::FinalSpin, Stage::AwaitingSpin, Up) => {
            Some(HostCommand::RequestSpin)
        }
        (_, Stage::TossUpBuzzed | Stage::SolveAttempt | Stage::BonusCountdown | Stage::BonusVerdict, Up) => {
            Some(verdict(true))
        }
        (_, Stage::TossUpBuzzed | Stage::SolveAttempt | Stage::BonusCountdown | Stage::BonusVerdict, Down) => {
            Some(verdict(false))
        }
        _ => None,
    }
}
