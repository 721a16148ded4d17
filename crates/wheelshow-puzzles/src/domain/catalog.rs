//! The ordered puzzle list a session plays through.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use wheelshow_core::error::GameError;
use wheelshow_core::money::Money;

use super::puzzle::{Puzzle, PuzzleType};

/// A puzzle handed out by [`PuzzleCatalog::next`].
#[derive(Debug, Clone)]
pub struct IssuedPuzzle {
    /// Position of the puzzle in the catalog.
    pub index: usize,
    /// Shared, read-only handle to the puzzle.
    pub puzzle: Arc<Puzzle>,
    /// `true` once the cursor has gone past the last puzzle and started
    /// over; every puzzle has already been played at that point.
    pub wrapped: bool,
}

/// Counts shown on the setup screen before play begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    /// Number of regular rounds.
    pub main_rounds: usize,
    /// Number of toss-ups.
    pub toss_ups: usize,
    /// Whether a final-spin puzzle is present.
    pub has_final_spin: bool,
    /// Whether a bonus-round puzzle is present.
    pub has_bonus_round: bool,
}

/// Ordered, immutable puzzle list with a circular cursor.
#[derive(Debug)]
pub struct PuzzleCatalog {
    puzzles: Vec<Arc<Puzzle>>,
    cursor: Option<usize>,
    issued: usize,
    version_hash: Option<String>,
}

impl PuzzleCatalog {
    /// Creates a catalog over `puzzles`, in order.
    ///
    /// # Errors
    ///
    /// Returns `GameError::EmptyCatalog` if `puzzles` is empty.
    pub fn new(puzzles: Vec<Puzzle>) -> Result<Self, GameError> {
        if puzzles.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        Ok(Self {
            puzzles: puzzles.into_iter().map(Arc::new).collect(),
            cursor: None,
            issued: 0,
            version_hash: None,
        })
    }

    /// Records the content hash of the source the puzzles came from.
    #[must_use]
    pub fn with_version_hash(mut self, version_hash: String) -> Self {
        self.version_hash = Some(version_hash);
        self
    }

    /// Content hash of the puzzle source, when known.
    #[must_use]
    pub fn version_hash(&self) -> Option<&str> {
        self.version_hash.as_deref()
    }

    /// Advances the cursor and returns the puzzle under it.
    pub fn next(&mut self) -> IssuedPuzzle {
        let index = self.cursor.map_or(0, |i| (i + 1) % self.puzzles.len());
        let wrapped = self.issued >= self.puzzles.len();
        self.cursor = Some(index);
        self.issued += 1;
        debug!(index, wrapped, "issued puzzle");
        IssuedPuzzle {
            index,
            puzzle: Arc::clone(&self.puzzles[index]),
            wrapped,
        }
    }

    /// Prize stored for a puzzle that has already been issued.
    #[must_use]
    pub fn prize_value(&self, index: usize) -> Option<Money> {
        let served = index < self.issued.min(self.puzzles.len());
        served.then(|| self.puzzles[index].prize_value)
    }

    /// Returns `true` once every puzzle has been issued at least once.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.issued >= self.puzzles.len()
    }

    /// Number of puzzles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    /// Always `false`; an empty catalog cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    /// Counts puzzles by round type.
    #[must_use]
    pub fn summary(&self) -> CatalogSummary {
        let count = |kind: PuzzleType| self.puzzles.iter().filter(|p| p.kind == kind).count();
        CatalogSummary {
            main_rounds: count(PuzzleType::Main),
            toss_ups: count(PuzzleType::TossUp),
            has_final_spin: count(PuzzleType::FinalSpin) > 0,
            has_bonus_round: count(PuzzleType::BonusRound) > 0,
        }
    }
}
