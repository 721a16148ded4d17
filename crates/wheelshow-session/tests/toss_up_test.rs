//! Integration tests for toss-up puzzles on the virtual clock.

mod common;

use std::collections::BTreeSet;

use common::Show;
use wheelshow_core::money::Money;
use wheelshow_puzzles::domain::puzzle::PuzzleType;
use wheelshow_session::domain::commands::{CommandOutcome, HostCommand, IgnoreReason};
use wheelshow_session::domain::config::GameConfig;
use wheelshow_session::domain::events::{AudioCue, CueMode};
use wheelshow_session::domain::state::{GamePhase, Stage};
use wheelshow_test_support::prized_puzzle;

fn toss_up(phrase: &str) -> Show {
    let mut show = Show::new(
        vec![prized_puzzle(
            "Thing",
            phrase,
            PuzzleType::TossUp,
            Money::from_cents(100),
        )],
        GameConfig::default(),
        3,
    );
    show.send(HostCommand::AdvancePuzzle);
    show.settle();
    show
}

fn revealed(show: &Show) -> BTreeSet<usize> {
    show.controller.board().revealed_positions().clone()
}

#[test]
fn test_toss_up_waits_for_start_with_nobody_up() {
    // Act
    let show = toss_up("RED CAR");

    // Assert
    assert_eq!(show.controller.state().phase, GamePhase::TossUp);
    assert_eq!(show.controller.state().player_index, None);
    assert_eq!(show.controller.state().round_number, 0);
    assert_eq!(show.controller.stage(), Stage::TossUpAwaitingStart);
    assert!(revealed(&show).is_empty());
    assert_eq!(show.controller.next_deadline(), None);
}

#[test]
fn test_start_pre_reveals_a_consonant_and_loops_music() {
    // Arrange
    let mut show = toss_up("RED CAR");

    // Act
    let outcome = show.send(HostCommand::StartTossUp);

    // Assert
    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(show.controller.stage(), Stage::TossUpRunning);
    assert_eq!(revealed(&show), BTreeSet::from([4]));
    assert!(show.cues().contains(&(AudioCue::TossUp, CueMode::Loop)));
    assert_eq!(show.controller.next_deadline(), Some(show.now + 1_500));
}

#[test]
fn test_ticks_reveal_one_position_each_interval() {
    // Arrange
    let mut show = toss_up("RED CAR");
    show.send(HostCommand::StartTossUp);

    // Act
    show.wait(1_499);
    let before_tick = revealed(&show);
    show.wait(1);
    let first_tick = revealed(&show);
    show.wait(1_500);

    // Assert
    assert_eq!(before_tick, BTreeSet::from([4]));
    assert_eq!(first_tick, BTreeSet::from([0, 4]));
    assert_eq!(revealed(&show), BTreeSet::from([0, 1, 4]));
}

#[test]
fn test_buzz_pauses_reveals_until_wrong_answer_delay_passes() {
    // Arrange
    let mut show = toss_up("RED CAR");
    show.send(HostCommand::StartTossUp);
    let start = show.now;
    show.wait(3_500);

    // Act
    show.send(HostCommand::RequestSolve);
    show.wait(5_000);
    let while_buzzed = revealed(&show);
    show.send(HostCommand::AdjudicateSolve {
        correct: false,
        player: Some(1),
    });

    // Assert
    assert_eq!(while_buzzed, BTreeSet::from([0, 1, 4]));
    assert_eq!(show.controller.stage(), Stage::TossUpResuming);
    assert!(show.cues().contains(&(AudioCue::LetterReveal, CueMode::Play)));
    assert!(show.cues().contains(&(AudioCue::Incorrect, CueMode::Play)));
    let resumed_at = start + 8_500 + 3_000;
    assert_eq!(show.controller.next_deadline(), Some(resumed_at));

    show.wait(3_000);
    assert_eq!(show.controller.stage(), Stage::TossUpRunning);
    assert_eq!(show.controller.next_deadline(), Some(resumed_at + 1_500));
    show.wait(1_500);
    assert_eq!(revealed(&show), BTreeSet::from([0, 1, 2, 4]));
}

#[test]
fn test_correct_toss_up_banks_prize_for_named_player() {
    // Arrange
    let mut show = toss_up("RED CAR");
    show.send(HostCommand::StartTossUp);
    show.wait(2_000);
    show.send(HostCommand::RequestSolve);

    // Act
    let outcome = show.send(HostCommand::AdjudicateSolve {
        correct: true,
        player: Some(2),
    });

    // Assert
    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(show.total(2), Money::from_cents(100));
    assert_eq!(show.round(2), Money::ZERO);
    assert_eq!(show.controller.state().player_index, Some(2));
    assert_eq!(show.controller.stage(), Stage::RoundOver);
    assert!(show.controller.board().is_solved());
    assert!(show.cues().contains(&(AudioCue::TossUp, CueMode::Stop)));
    assert!(show.cues().contains(&(AudioCue::TossupSolve, CueMode::Play)));
    assert_eq!(show.controller.next_deadline(), None);
}

#[test]
fn test_wrong_answer_without_a_seat_blames_first_player() {
    // Arrange
    let mut show = toss_up("RED CAR");
    show.send(HostCommand::StartTossUp);
    show.send(HostCommand::RequestSolve);

    // Act
    show.send(HostCommand::AdjudicateSolve {
        correct: false,
        player: None,
    });

    // Assert
    assert_eq!(show.controller.state().player_index, Some(0));
    assert_eq!(show.controller.stage(), Stage::TossUpResuming);
}

#[test]
fn test_ticking_stops_once_every_letter_shows() {
    // Arrange
    let mut show = toss_up("GO");
    show.send(HostCommand::StartTossUp);

    // Act
    show.settle();

    // Assert
    assert_eq!(revealed(&show), BTreeSet::from([0, 1]));
    assert_eq!(show.controller.next_deadline(), None);
    assert_eq!(show.controller.stage(), Stage::TossUpRunning);
}

#[test]
fn test_round_commands_are_ignored_during_toss_up() {
    // Arrange
    let mut show = toss_up("RED CAR");
    show.send(HostCommand::StartTossUp);

    // Act
    let spin = show.send(HostCommand::RequestSpin);
    let letter = show.send(HostCommand::GuessLetter('E'));
    let restart = show.send(HostCommand::StartTossUp);

    // Assert
    assert_eq!(spin, CommandOutcome::Ignored(IgnoreReason::WrongPhase));
    assert_eq!(letter, CommandOutcome::Ignored(IgnoreReason::WrongPhase));
    assert_eq!(restart, CommandOutcome::Ignored(IgnoreReason::WrongPhase));
}

#[test]
fn test_main_round_after_toss_up_is_round_one() {
    // Arrange
    let mut show = Show::new(
        vec![
            prized_puzzle("Thing", "GO", PuzzleType::TossUp, Money::from_cents(100)),
            prized_puzzle("Thing", "CAT", PuzzleType::Main, Money::ZERO),
        ],
        GameConfig::default(),
        3,
    );
    show.send(HostCommand::AdvancePuzzle);
    show.send(HostCommand::StartTossUp);
    show.send(HostCommand::RequestSolve);
    show.send(HostCommand::AdjudicateSolve {
        correct: true,
        player: Some(1),
    });

    // Act
    show.send(HostCommand::AdvancePuzzle);

    // Assert
    assert_eq!(show.controller.state().phase, GamePhase::Main);
    assert_eq!(show.controller.state().round_number, 1);
    assert_eq!(show.controller.state().player_index, Some(0));
    assert_eq!(show.total(1), Money::from_cents(100));
}
