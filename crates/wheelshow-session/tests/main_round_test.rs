//! Integration tests for regular rounds: spins, letters, solves.

mod common;

use common::{Show, cash, one_wedge};
use wheelshow_core::money::Money;
use wheelshow_puzzles::domain::puzzle::PuzzleType;
use wheelshow_rules::domain::wheel::Wedge;
use wheelshow_session::domain::commands::{CommandOutcome, HostCommand, IgnoreReason};
use wheelshow_session::domain::config::GameConfig;
use wheelshow_session::domain::events::{AudioCue, CueMode, GameEventKind};
use wheelshow_session::domain::state::{GamePhase, Stage};
use wheelshow_test_support::puzzle;

fn main_show(phrase: &str, config: GameConfig) -> Show {
    let mut show = Show::new(vec![puzzle("Thing", phrase, PuzzleType::Main)], config, 3);
    show.send(HostCommand::AdvancePuzzle);
    show.settle();
    show
}

#[test]
fn test_first_puzzle_starts_main_round_with_first_seat() {
    // Act
    let show = main_show("CAT", GameConfig::default());

    // Assert
    let state = show.controller.state();
    assert_eq!(state.phase, GamePhase::Main);
    assert_eq!(state.round_number, 1);
    assert_eq!(state.player_index, Some(0));
    assert_eq!(show.controller.stage(), Stage::AwaitingSpin);
    assert!(show.cues().contains(&(AudioCue::Theme, CueMode::Stop)));
    assert!(show.cues().contains(&(AudioCue::PuzzleReveal, CueMode::Play)));
}

#[test]
fn test_bankrupt_zeroes_round_money_and_passes_turn() {
    // Arrange
    let mut show = main_show("CAT", one_wedge(Wedge::Bankrupt));
    show.send(HostCommand::OverrideScore {
        player: 0,
        round: Money::from_cents(300),
        total: Money::from_cents(100),
    });

    // Act
    let outcome = show.spin();

    // Assert
    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(show.round(0), Money::ZERO);
    assert_eq!(show.total(0), Money::from_cents(100));
    assert_eq!(show.controller.state().player_index, Some(1));
    assert_eq!(show.controller.stage(), Stage::AwaitingSpin);
    assert!(show.cues().contains(&(AudioCue::Bankrupt, CueMode::Play)));
    assert!(show.events.iter().any(|e| matches!(
        e.kind,
        GameEventKind::SpinResolved {
            wedge: Wedge::Bankrupt,
            ..
        }
    )));
}

#[test]
fn test_lose_a_turn_passes_turn_without_touching_money() {
    // Arrange
    let mut show = main_show("CAT", one_wedge(Wedge::LoseATurn));
    show.send(HostCommand::OverrideScore {
        player: 0,
        round: Money::from_cents(300),
        total: Money::ZERO,
    });

    // Act
    show.spin();

    // Assert
    assert_eq!(show.round(0), Money::from_cents(300));
    assert_eq!(show.controller.state().player_index, Some(1));
}

#[test]
fn test_second_spin_while_wheel_turns_is_ignored() {
    // Arrange
    let mut show = main_show("CAT", one_wedge(cash(50)));
    show.send(HostCommand::RequestSpin);

    // Act
    let outcome = show.send(HostCommand::RequestSpin);

    // Assert
    assert_eq!(outcome, CommandOutcome::Ignored(IgnoreReason::WrongPhase));
    assert_eq!(show.controller.stage(), Stage::Spinning);
}

#[test]
fn test_consonant_credits_count_times_spin_value_and_passes_turn() {
    // Arrange
    let mut show = main_show("BANANA", one_wedge(cash(50)));
    show.spin();

    // Act
    let outcome = show.send(HostCommand::GuessLetter('N'));
    show.settle();

    // Assert
    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(show.round(0), Money::from_cents(100));
    assert_eq!(show.controller.state().player_index, Some(1));
    assert_eq!(show.controller.state().last_spin_value, None);
    assert!(show.controller.board().revealed_letters().contains(&'N'));
    assert!(show.cues().contains(&(AudioCue::LetterReveal, CueMode::Play)));
}

#[test]
fn test_wrong_consonant_plays_incorrect_and_passes_turn() {
    // Arrange
    let mut show = main_show("BANANA", one_wedge(cash(50)));
    show.spin();

    // Act
    show.send(HostCommand::GuessLetter('Z'));

    // Assert
    assert_eq!(show.round(0), Money::ZERO);
    assert_eq!(show.controller.state().player_index, Some(1));
    assert!(show.cues().contains(&(AudioCue::Incorrect, CueMode::Play)));
}

#[test]
fn test_vowel_needs_more_than_its_cost() {
    // Arrange
    let mut show = main_show("BANANA", one_wedge(cash(25)));
    show.send(HostCommand::OverrideScore {
        player: 0,
        round: Money::from_cents(25),
        total: Money::ZERO,
    });
    show.spin();

    // Act
    let rejected = show.send(HostCommand::GuessLetter('A'));
    show.send(HostCommand::OverrideScore {
        player: 0,
        round: Money::from_cents(26),
        total: Money::ZERO,
    });
    let bought = show.send(HostCommand::GuessLetter('a'));

    // Assert
    assert_eq!(rejected, CommandOutcome::Ignored(IgnoreReason::VowelUnaffordable));
    assert_eq!(bought, CommandOutcome::Applied);
    assert_eq!(show.round(0), Money::from_cents(1));
    assert_eq!(show.controller.state().player_index, Some(1));
}

#[test]
fn test_letter_called_twice_is_ignored_without_turn_change() {
    // Arrange
    let mut show = main_show("BANANA", one_wedge(cash(50)));
    show.spin();
    show.send(HostCommand::GuessLetter('Z'));
    show.spin();

    // Act
    let outcome = show.send(HostCommand::GuessLetter('Z'));

    // Assert
    assert_eq!(outcome, CommandOutcome::Ignored(IgnoreReason::LetterAlreadyUsed));
    assert_eq!(show.controller.state().player_index, Some(1));
    assert_eq!(show.controller.stage(), Stage::AwaitingLetter);
}

#[test]
fn test_correct_solve_banks_round_and_clears_every_round_score() {
    // Arrange
    let mut show = main_show("CAT", one_wedge(cash(50)));
    show.spin();
    show.send(HostCommand::GuessLetter('C'));
    show.send(HostCommand::OverrideScore {
        player: 1,
        round: Money::from_cents(40),
        total: Money::ZERO,
    });
    show.send(HostCommand::SetTurn(0));

    // Act
    show.send(HostCommand::RequestSolve);
    let outcome = show.send(HostCommand::AdjudicateSolve {
        correct: true,
        player: None,
    });

    // Assert
    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(show.total(0), Money::from_cents(50));
    assert_eq!(show.round(0), Money::ZERO);
    assert_eq!(show.round(1), Money::ZERO);
    assert!(show.controller.board().is_solved());
    assert_eq!(show.controller.stage(), Stage::RoundOver);
    assert!(show.cues().contains(&(AudioCue::PuzzleSolve, CueMode::Play)));
}

#[test]
fn test_incorrect_solve_only_passes_turn() {
    // Arrange
    let mut show = main_show("CAT", one_wedge(cash(50)));
    show.send(HostCommand::RequestSolve);

    // Act
    show.send(HostCommand::AdjudicateSolve {
        correct: false,
        player: None,
    });

    // Assert
    assert_eq!(show.controller.state().player_index, Some(1));
    assert_eq!(show.controller.stage(), Stage::AwaitingSpin);
    assert!(!show.controller.board().is_solved());
}

#[test]
fn test_solve_request_finishes_running_reveal() {
    // Arrange
    let mut show = main_show("BANANA", one_wedge(cash(50)));
    show.spin();
    show.send(HostCommand::GuessLetter('N'));

    // Act
    show.send(HostCommand::RequestSolve);

    // Assert
    assert!(show.controller.board().overlay_positions().is_empty());
    assert!(show.controller.board().pending_positions().is_empty());
    assert!(show.controller.board().revealed_letters().contains(&'N'));
    assert_eq!(show.controller.next_deadline(), None);
}

#[test]
fn test_exhausted_catalog_does_not_draw_a_wrapped_puzzle() {
    // Arrange
    let mut show = main_show("CAT", one_wedge(cash(50)));
    show.send(HostCommand::RequestSolve);
    show.send(HostCommand::AdjudicateSolve {
        correct: true,
        player: None,
    });

    // Act
    show.send(HostCommand::AdvancePuzzle);

    // Assert
    let state = show.controller.state();
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.puzzle_index, Some(0));
    assert_eq!(state.round_number, 1);
    assert!(show.controller.catalog().is_exhausted());
}

#[test]
fn test_exhausted_catalog_ends_game_with_standings() {
    // Arrange
    let mut show = main_show("CAT", one_wedge(cash(50)));
    show.send(HostCommand::SetTurn(2));
    show.send(HostCommand::OverrideScore {
        player: 2,
        round: Money::from_cents(75),
        total: Money::ZERO,
    });
    show.send(HostCommand::RequestSolve);
    show.send(HostCommand::AdjudicateSolve {
        correct: true,
        player: None,
    });

    // Act
    let outcome = show.send(HostCommand::AdvancePuzzle);

    // Assert
    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(show.controller.state().phase, GamePhase::GameOver);
    let standings = show
        .events
        .iter()
        .find_map(|e| match &e.kind {
            GameEventKind::GameOver { standings } => Some(standings.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(standings[0].player, 2);
    assert_eq!(standings[0].total_score, Money::from_cents(75));
    assert!(show.cues().contains(&(AudioCue::Theme, CueMode::Play)));
    assert_eq!(
        show.send(HostCommand::RequestSpin),
        CommandOutcome::Ignored(IgnoreReason::WrongPhase)
    );
}

#[test]
fn test_second_main_round_rotates_opening_seat() {
    // Arrange
    let mut show = Show::new(
        vec![
            puzzle("Thing", "CAT", PuzzleType::Main),
            puzzle("Place", "ROME", PuzzleType::Main),
        ],
        one_wedge(cash(50)),
        3,
    );
    show.send(HostCommand::AdvancePuzzle);
    show.send(HostCommand::RequestSolve);
    show.send(HostCommand::AdjudicateSolve {
        correct: true,
        player: None,
    });

    // Act
    show.send(HostCommand::AdvancePuzzle);

    // Assert
    assert_eq!(show.controller.state().round_number, 2);
    assert_eq!(show.controller.state().player_index, Some(1));
    assert_eq!(show.controller.state().puzzle_index, Some(1));
}

#[test]
fn test_unknown_seat_is_ignored() {
    // Arrange
    let mut show = main_show("CAT", GameConfig::default());

    // Act
    let turn = show.send(HostCommand::SetTurn(7));
    let score = show.send(HostCommand::OverrideScore {
        player: 3,
        round: Money::ZERO,
        total: Money::ZERO,
    });

    // Assert
    assert_eq!(turn, CommandOutcome::Ignored(IgnoreReason::UnknownPlayer));
    assert_eq!(score, CommandOutcome::Ignored(IgnoreReason::UnknownPlayer));
    assert_eq!(show.controller.state().player_index, Some(0));
}
