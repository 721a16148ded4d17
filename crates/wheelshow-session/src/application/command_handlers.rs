//! Command handlers for the Game Session context.
//!
//! Thin entry points used by hosts: apply a command or let time pass,
//! then hand back the events the controller produced.

use tracing::instrument;
use wheelshow_core::clock::Clock;
use wheelshow_core::rng::DeterministicRng;

use crate::domain::aggregates::GamePhaseController;
use crate::domain::commands::{CommandOutcome, HostCommand};
use crate::domain::events::GameEvent;

/// Applies a host command at `now_ms` and drains the resulting events.
/// Timers due by `now_ms` fire before the command is applied.
#[instrument(skip(controller, clock, rng), fields(phase = ?controller.state().phase))]
pub fn handle_host_command(
    controller: &mut GamePhaseController,
    command: &HostCommand,
    now_ms: u64,
    clock: &dyn Clock,
    rng: &mut dyn DeterministicRng,
) -> (CommandOutcome, Vec<GameEvent>) {
    let outcome = controller.handle(command, now_ms, clock, rng);
    (outcome, controller.take_events())
}

/// Fires every timer due by `now_ms` and drains the resulting events.
#[instrument(level = "trace", skip(controller, clock, rng))]
pub fn handle_tick(
    controller: &mut GamePhaseController,
    now_ms: u64,
    clock: &dyn Clock,
    rng: &mut dyn DeterministicRng,
) -> Vec<GameEvent> {
    controller.advance_to(now_ms, clock, rng);
    controller.take_events()
}

#[cfg(test)]
mod tests {
    use wheelshow_core::event::DomainEvent;
    use wheelshow_puzzles::domain::catalog::PuzzleCatalog;
    use wheelshow_puzzles::domain::puzzle::PuzzleType;
    use wheelshow_test_support::{MockRng, fixed_clock, puzzle, roster};

    use super::*;
    use crate::domain::commands::{Direction, IgnoreReason};
    use crate::domain::config::GameConfig;
    use crate::domain::state::{GamePhase, Stage};

    fn controller() -> GamePhaseController {
        let catalog = PuzzleCatalog::new(vec![puzzle("Thing", "CAT", PuzzleType::Main)]).unwrap();
        GamePhaseController::new(GameConfig::default(), catalog, roster(2), &fixed_clock()).unwrap()
    }

    #[test]
    fn test_handle_host_command_drains_events() {
        // Arrange
        let mut controller = controller();
        controller.take_events();

        // Act
        let (outcome, events) = handle_host_command(
            &mut controller,
            &HostCommand::Directional(Direction::Up),
            0,
            &fixed_clock(),
            &mut MockRng,
        );

        // Assert
        assert!(outcome.is_applied());
        assert_eq!(controller.state().phase, GamePhase::Main);
        assert_eq!(controller.stage(), Stage::AwaitingSpin);
        assert!(events.iter().any(|e| e.event_type() == "session.phase_changed"));
        assert!(controller.uncommitted_events().is_empty());
    }

    #[test]
    fn test_handle_host_command_reports_ignored() {
        // Arrange
        let mut controller = controller();

        // Act
        let (outcome, events) = handle_host_command(
            &mut controller,
            &HostCommand::GuessLetter('A'),
            0,
            &fixed_clock(),
            &mut MockRng,
        );

        // Assert
        assert_eq!(outcome, CommandOutcome::Ignored(IgnoreReason::WrongPhase));
        assert_eq!(events.last().map(|e| e.event_type()), Some("session.command_ignored"));
    }

    #[test]
    fn test_handle_tick_fires_entrance_animation() {
        // Arrange
        let mut controller = controller();
        handle_host_command(
            &mut controller,
            &HostCommand::AdvancePuzzle,
            0,
            &fixed_clock(),
            &mut MockRng,
        );

        // Act
        let events = handle_tick(&mut controller, 300, &fixed_clock(), &mut MockRng);

        // Assert
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.event_type() == "session.board_changed"));
        assert_eq!(controller.next_deadline(), None);
    }
}
