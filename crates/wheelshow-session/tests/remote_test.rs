//! Integration tests for the two-button presenter remote.

mod common;

use common::{Show, cash, one_wedge};
use wheelshow_core::money::Money;
use wheelshow_puzzles::domain::puzzle::PuzzleType;
use wheelshow_session::domain::commands::{CommandOutcome, Direction, HostCommand, IgnoreReason};
use wheelshow_session::domain::events::GameEventKind;
use wheelshow_session::domain::state::{GamePhase, Stage};
use wheelshow_test_support::{prized_puzzle, puzzle};

fn press(show: &mut Show, direction: Direction) -> CommandOutcome {
    show.send(HostCommand::Directional(direction))
}

#[test]
fn test_remote_alone_can_run_a_short_show() {
    // Arrange
    let mut show = Show::new(
        vec![
            prized_puzzle("Thing", "GO", PuzzleType::TossUp, Money::from_cents(100)),
            puzzle("Thing", "CAT", PuzzleType::Main),
        ],
        one_wedge(cash(50)),
        2,
    );

    // Act / Assert
    assert!(press(&mut show, Direction::Up).is_applied());
    assert_eq!(show.controller.stage(), Stage::TossUpAwaitingStart);

    assert!(press(&mut show, Direction::Up).is_applied());
    assert_eq!(show.controller.stage(), Stage::TossUpRunning);

    assert!(press(&mut show, Direction::Up).is_applied());
    assert_eq!(show.controller.stage(), Stage::TossUpBuzzed);

    assert!(press(&mut show, Direction::Up).is_applied());
    assert_eq!(show.controller.stage(), Stage::RoundOver);
    assert_eq!(show.total(0), Money::from_cents(100));

    assert!(press(&mut show, Direction::Down).is_applied());
    assert_eq!(show.controller.state().phase, GamePhase::Main);
    assert_eq!(show.controller.stage(), Stage::AwaitingSpin);

    assert!(press(&mut show, Direction::Up).is_applied());
    assert_eq!(show.controller.stage(), Stage::Spinning);
    show.settle();
    assert_eq!(show.controller.stage(), Stage::AwaitingLetter);

    assert!(press(&mut show, Direction::Up).is_applied());
    assert_eq!(show.controller.stage(), Stage::SolveAttempt);

    assert!(press(&mut show, Direction::Down).is_applied());
    assert_eq!(show.controller.state().player_index, Some(1));
    assert_eq!(show.controller.stage(), Stage::AwaitingSpin);

    assert!(press(&mut show, Direction::Down).is_applied());
    assert!(press(&mut show, Direction::Up).is_applied());
    assert_eq!(show.controller.stage(), Stage::RoundOver);

    assert!(press(&mut show, Direction::Up).is_applied());
    assert_eq!(show.controller.state().phase, GamePhase::GameOver);
}

#[test]
fn test_remote_press_with_no_meaning_is_reported() {
    // Arrange
    let mut show = Show::new(
        vec![puzzle("Thing", "CAT", PuzzleType::Main)],
        one_wedge(cash(50)),
        2,
    );

    // Act
    let outcome = press(&mut show, Direction::Down);

    // Assert
    assert_eq!(outcome, CommandOutcome::Ignored(IgnoreReason::NoRouteForInput));
    assert!(show.events.iter().any(|e| matches!(
        &e.kind,
        GameEventKind::CommandIgnored { command, reason: IgnoreReason::NoRouteForInput }
            if command == "session.directional"
    )));
    assert_eq!(show.controller.state().phase, GamePhase::Setup);
}

#[test]
fn test_remote_is_dead_while_wheel_spins() {
    // Arrange
    let mut show = Show::new(
        vec![puzzle("Thing", "CAT", PuzzleType::Main)],
        one_wedge(cash(50)),
        2,
    );
    press(&mut show, Direction::Up);
    press(&mut show, Direction::Up);

    // Act
    let up = press(&mut show, Direction::Up);
    let down = press(&mut show, Direction::Down);

    // Assert
    assert_eq!(up, CommandOutcome::Ignored(IgnoreReason::NoRouteForInput));
    assert_eq!(down, CommandOutcome::Ignored(IgnoreReason::NoRouteForInput));
    assert_eq!(show.controller.stage(), Stage::Spinning);
}
