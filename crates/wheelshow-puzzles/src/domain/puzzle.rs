//! A single puzzle and its round type.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use wheelshow_core::error::GameError;
use wheelshow_core::money::Money;

/// Which kind of round a puzzle is played as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PuzzleType {
    /// A regular spin-and-guess round.
    #[default]
    #[serde(rename = "MAIN")]
    Main,
    /// Solved by any player while letters reveal on their own.
    #[serde(rename = "TOSS-UP", alias = "TOSS_UP", alias = "TOSSUP")]
    TossUp,
    /// One spin sets the value for every remaining guess.
    #[serde(rename = "FINAL SPIN", alias = "FINAL_SPIN")]
    FinalSpin,
    /// Single-player round with pre-seeded letters.
    #[serde(rename = "BONUS ROUND", alias = "BONUS_ROUND")]
    BonusRound,
}

/// A puzzle as loaded from the puzzle source. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Category shown above the board.
    pub category: String,
    /// The hidden phrase.
    pub phrase: String,
    /// Round type.
    #[serde(rename = "type", default)]
    pub kind: PuzzleType,
    /// Prize awarded for solving a toss-up or bonus round.
    #[serde(default)]
    pub prize_value: Money,
}

impl Puzzle {
    /// Creates a puzzle.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidPuzzle` if the phrase is blank.
    pub fn new(
        category: impl Into<String>,
        phrase: impl Into<String>,
        kind: PuzzleType,
        prize_value: Money,
    ) -> Result<Self, GameError> {
        let puzzle = Self {
            category: category.into(),
            phrase: phrase.into(),
            kind,
            prize_value,
        };
        puzzle.validate()?;
        Ok(puzzle)
    }

    /// Checks the invariants a loaded puzzle must satisfy.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidPuzzle` if the phrase is blank.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.phrase.trim().is_empty() {
            return Err(GameError::InvalidPuzzle(format!(
                "phrase in category {:?} is blank",
                self.category
            )));
        }
        Ok(())
    }

    /// The distinct uppercase letters a player must uncover to solve.
    #[must_use]
    pub fn letters(&self) -> BTreeSet<char> {
        self.phrase.chars().filter_map(fold_letter).collect()
    }
}

/// Uppercases `c` if it is alphabetic; `None` for spaces and punctuation.
#[must_use]
pub fn fold_letter(c: char) -> Option<char> {
    if c.is_alphabetic() {
        c.to_uppercase().next()
    } else {
        None
    }
}

/// Returns `true` for the five vowels a player has to buy.
#[must_use]
pub fn is_vowel(letter: char) -> bool {
    matches!(letter.to_ascii_uppercase(), 'A' | 'E' | 'I' | 'O' | 'U')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_uppercased_and_distinct() {
        let puzzle = Puzzle::new("Phrase", "Hot & hotter!", PuzzleType::Main, Money::ZERO).unwrap();

        let letters: String = puzzle.letters().into_iter().collect();

        assert_eq!(letters, "EHORT");
    }

    #[test]
    fn test_blank_phrase_is_rejected() {
        let result = Puzzle::new("Thing", "   ", PuzzleType::Main, Money::ZERO);

        assert!(matches!(result, Err(GameError::InvalidPuzzle(_))));
    }

    #[test]
    fn test_fold_letter_skips_punctuation() {
        assert_eq!(fold_letter('q'), Some('Q'));
        assert_eq!(fold_letter('-'), None);
        assert_eq!(fold_letter(' '), None);
    }

    #[test]
    fn test_type_accepts_spaced_and_underscored_names() {
        let spaced: PuzzleType = serde_json::from_str("\"TOSS-UP\"").unwrap();
        let underscored: PuzzleType = serde_json::from_str("\"FINAL_SPIN\"").unwrap();

        assert_eq!(spaced, PuzzleType::TossUp);
        assert_eq!(underscored, PuzzleType::FinalSpin);
    }

    #[test]
    fn test_is_vowel() {
        assert!(is_vowel('e'));
        assert!(!is_vowel('Y'));
    }
}
