//! Puzzle and roster fixtures.

use wheelshow_core::money::Money;
use wheelshow_puzzles::domain::puzzle::{Puzzle, PuzzleType};

/// A puzzle with no prize.
///
/// # Panics
///
/// Panics if `phrase` is blank.
#[must_use]
pub fn puzzle(category: &str, phrase: &str, kind: PuzzleType) -> Puzzle {
    prized_puzzle(category, phrase, kind, Money::ZERO)
}

/// A puzzle with a prize value.
///
/// # Panics
///
/// Panics if `phrase` is blank.
#[must_use]
pub fn prized_puzzle(category: &str, phrase: &str, kind: PuzzleType, prize: Money) -> Puzzle {
    Puzzle::new(category, phrase, kind, prize).expect("fixture phrase must not be blank")
}

/// Player names `Player 1..=count`.
#[must_use]
pub fn roster(count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("Player {n}")).collect()
}
