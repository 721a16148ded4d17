//! Timed disclosure of the active puzzle.
//!
//! The engine owns every timer that belongs to the current reveal cycle.
//! Loading a puzzle, finalizing, or revealing everything cancels them all.
//! Each task also checks that it is still the one the engine expects and
//! that its target position is still in the state it was scheduled for,
//! so a task left over from an earlier cycle does nothing.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wheelshow_core::rng::DeterministicRng;
use wheelshow_core::timer::{TimerId, Timers};
use wheelshow_puzzles::domain::puzzle::{Puzzle, fold_letter, is_vowel};

use super::snapshot::{BoardSnapshot, Cell};

/// Reveal cadence, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealTimings {
    /// Interval between placeholders during the entrance animation.
    pub entrance_step_ms: u64,
    /// Delay between a correct guess and its first marker.
    pub initial_delay_ms: u64,
    /// Interval between markers of the same guess.
    pub per_step_ms: u64,
    /// How long each marker stays up before turning into its letter.
    pub blue_to_letter_ms: u64,
}

impl Default for RevealTimings {
    fn default() -> Self {
        Self {
            entrance_step_ms: 100,
            initial_delay_ms: 1000,
            per_step_ms: 2000,
            blue_to_letter_ms: 3000,
        }
    }
}

/// Animation state of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    /// No puzzle loaded.
    Idle,
    /// Placeholders are appearing one by one.
    EntranceAnimating,
    /// Stable; waiting for a guess.
    Ready,
    /// Markers and letters of a correct guess are appearing.
    StagedReveal,
    /// The whole phrase is shown.
    FullyRevealed,
}

/// Where [`RevealEngine::finalize`] leaves the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalState {
    /// Stable, more guesses may follow.
    Ready,
    /// Terminal for this puzzle.
    FullyRevealed,
}

/// Result of guessing a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter is in the phrase; `count` positions are being revealed.
    Hit {
        /// The guessed letter, uppercased.
        letter: char,
        /// Number of positions this guess reveals.
        count: usize,
    },
    /// The letter is not in the phrase.
    Miss,
    /// Every position of the letter is already shown.
    AlreadyRevealed,
    /// Not an alphabetic character.
    NotALetter,
}

impl GuessOutcome {
    /// Positions revealed by the guess; zero unless it was a hit.
    #[must_use]
    pub fn count(self) -> usize {
        match self {
            Self::Hit { count, .. } => count,
            Self::Miss | Self::AlreadyRevealed | Self::NotALetter => 0,
        }
    }
}

/// Result of one toss-up tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TossUpReveal {
    /// One more position was revealed.
    Revealed {
        /// The revealed position.
        position: usize,
        /// The letter at that position.
        letter: char,
    },
    /// Nothing is left to reveal; stop ticking.
    Exhausted,
}

/// Board changes produced by a fired timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealNotice {
    /// The entrance animation reached this position.
    PlaceholderShown(usize),
    /// Every placeholder is visible.
    EntranceComplete,
    /// A marker appeared at this position.
    MarkerPlaced(usize),
    /// The marker at this position turned into its letter.
    LetterRevealed(usize),
    /// Every position of this letter is now shown.
    LetterCompleted(char),
    /// The staged reveal has finished.
    Settled,
}

#[derive(Debug, Clone, Copy)]
enum RevealTask {
    EntranceStep,
    PlaceNext,
    Convert(usize),
}

/// Visible and hidden state of every phrase position over time.
#[derive(Debug)]
pub struct RevealEngine {
    timings: RevealTimings,
    puzzle: Option<Arc<Puzzle>>,
    letters: Vec<Option<char>>,
    correct_letters: BTreeSet<char>,
    placeholders: usize,
    revealed_positions: BTreeSet<usize>,
    overlay_positions: BTreeSet<usize>,
    pending_positions: VecDeque<usize>,
    revealed_letters: BTreeSet<char>,
    phase: RevealPhase,
    timers: Timers<RevealTask>,
    entrance: Option<TimerId>,
    placement: Option<TimerId>,
    conversions: BTreeMap<usize, TimerId>,
}

impl RevealEngine {
    /// Creates an idle engine.
    #[must_use]
    pub fn new(timings: RevealTimings) -> Self {
        Self {
            timings,
            puzzle: None,
            letters: Vec::new(),
            correct_letters: BTreeSet::new(),
            placeholders: 0,
            revealed_positions: BTreeSet::new(),
            overlay_positions: BTreeSet::new(),
            pending_positions: VecDeque::new(),
            revealed_letters: BTreeSet::new(),
            phase: RevealPhase::Idle,
            timers: Timers::new(),
            entrance: None,
            placement: None,
            conversions: BTreeMap::new(),
        }
    }

    /// Current animation state.
    #[must_use]
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// The puzzle on the board.
    #[must_use]
    pub fn puzzle(&self) -> Option<&Arc<Puzzle>> {
        self.puzzle.as_ref()
    }

    /// Distinct letters in the phrase.
    #[must_use]
    pub fn correct_letters(&self) -> &BTreeSet<char> {
        &self.correct_letters
    }

    /// Letters whose every position is shown.
    #[must_use]
    pub fn revealed_letters(&self) -> &BTreeSet<char> {
        &self.revealed_letters
    }

    /// Positions whose letter is shown.
    #[must_use]
    pub fn revealed_positions(&self) -> &BTreeSet<usize> {
        &self.revealed_positions
    }

    /// Positions currently showing a marker.
    #[must_use]
    pub fn overlay_positions(&self) -> &BTreeSet<usize> {
        &self.overlay_positions
    }

    /// Positions queued for a marker, in placement order.
    #[must_use]
    pub fn pending_positions(&self) -> &VecDeque<usize> {
        &self.pending_positions
    }

    /// Consonants in the phrase that are not fully shown yet.
    #[must_use]
    pub fn hidden_consonants(&self) -> Vec<char> {
        self.correct_letters
            .difference(&self.revealed_letters)
            .copied()
            .filter(|c| !is_vowel(*c))
            .collect()
    }

    /// Whether every letter of the phrase is shown.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.puzzle.is_some() && self.correct_letters.is_subset(&self.revealed_letters)
    }

    /// Puts a new puzzle on the board and starts the entrance animation.
    /// Every timer of the previous puzzle is cancelled.
    pub fn load(&mut self, puzzle: Arc<Puzzle>, now_ms: u64) {
        self.cancel_timers();
        self.letters = puzzle.phrase.chars().map(fold_letter).collect();
        self.correct_letters = puzzle.letters();
        self.placeholders = 0;
        self.revealed_positions.clear();
        self.overlay_positions.clear();
        self.pending_positions.clear();
        self.revealed_letters.clear();
        info!(
            category = %puzzle.category,
            positions = self.letters.len(),
            "puzzle loaded on board"
        );
        self.puzzle = Some(puzzle);
        if self.letters.is_empty() {
            self.phase = RevealPhase::Ready;
        } else {
            self.phase = RevealPhase::EntranceAnimating;
            self.entrance = Some(
                self.timers
                    .schedule_at(now_ms + self.timings.entrance_step_ms, RevealTask::EntranceStep),
            );
        }
    }

    /// Guesses a letter. A running entrance animation or staged reveal is
    /// finished first so the guess sees a stable board.
    pub fn guess(&mut self, letter: char, now_ms: u64) -> GuessOutcome {
        let Some(letter) = fold_letter(letter) else {
            return GuessOutcome::NotALetter;
        };
        if self.puzzle.is_none() {
            return GuessOutcome::Miss;
        }
        self.finish_entrance();
        if self.phase == RevealPhase::StagedReveal {
            self.finalize(FinalState::Ready);
        }
        if !self.correct_letters.contains(&letter) {
            debug!(%letter, "guess missed");
            return GuessOutcome::Miss;
        }
        if self.revealed_letters.contains(&letter) {
            return GuessOutcome::AlreadyRevealed;
        }
        let positions: Vec<usize> = self.unrevealed_positions_of(letter).collect();
        if positions.is_empty() {
            return GuessOutcome::AlreadyRevealed;
        }
        let count = positions.len();
        self.pending_positions.extend(positions);
        self.phase = RevealPhase::StagedReveal;
        self.placement = Some(
            self.timers
                .schedule_at(now_ms + self.timings.initial_delay_ms, RevealTask::PlaceNext),
        );
        debug!(%letter, count, "staged reveal started");
        GuessOutcome::Hit { letter, count }
    }

    /// Reveals one random hidden position immediately, without a marker.
    pub fn toss_up_tick(&mut self, rng: &mut dyn DeterministicRng) -> TossUpReveal {
        self.settle_now();
        let candidates: Vec<usize> = self
            .letters
            .iter()
            .enumerate()
            .filter(|(i, l)| l.is_some() && !self.revealed_positions.contains(i))
            .map(|(i, _)| i)
            .collect();
        let Some(picked) = rng.pick_index(candidates.len()) else {
            return TossUpReveal::Exhausted;
        };
        let position = candidates[picked];
        self.reveal_position_now(position);
        let letter = self.letters[position].unwrap_or_default();
        debug!(position, %letter, "toss-up reveal");
        TossUpReveal::Revealed { position, letter }
    }

    /// Reveals every position of the given letters immediately. A staged
    /// reveal still running is finalized first. Returns the number of
    /// positions that changed.
    pub fn reveal_letters_now(&mut self, letters: &[char]) -> usize {
        self.settle_now();
        let mut count = 0;
        for letter in letters.iter().filter_map(|c| fold_letter(*c)) {
            let positions: Vec<usize> = self.unrevealed_positions_of(letter).collect();
            count += positions.len();
            for position in positions {
                self.reveal_position_now(position);
            }
        }
        count
    }

    /// Stops every timer and shows every queued or marked position.
    pub fn finalize(&mut self, target: FinalState) {
        self.cancel_timers();
        self.placeholders = self.letters.len();
        let staged: Vec<usize> = self
            .pending_positions
            .drain(..)
            .chain(std::mem::take(&mut self.overlay_positions))
            .collect();
        self.revealed_positions.extend(staged);
        self.refresh_revealed_letters();
        self.phase = match (self.phase, target) {
            (RevealPhase::Idle, FinalState::Ready) => RevealPhase::Idle,
            (RevealPhase::FullyRevealed, _) | (_, FinalState::FullyRevealed) => {
                RevealPhase::FullyRevealed
            }
            (_, FinalState::Ready) => RevealPhase::Ready,
        };
    }

    /// Brings the board to a stable state before a solve is judged.
    pub fn update(&mut self) {
        self.finalize(FinalState::Ready);
    }

    /// Shows the whole phrase.
    pub fn reveal_all(&mut self) {
        self.finalize(FinalState::FullyRevealed);
        self.revealed_positions = self
            .letters
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_some())
            .map(|(i, _)| i)
            .collect();
        self.revealed_letters = self.correct_letters.clone();
        debug!("board fully revealed");
    }

    /// Deadline of the next pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Fires the earliest timer due at or before `now_ms`. Returns `None`
    /// when nothing is due.
    pub fn fire_due(&mut self, now_ms: u64) -> Option<Vec<RevealNotice>> {
        let fired = self.timers.pop_due(now_ms)?;
        let notices = match fired.task {
            RevealTask::EntranceStep => self.on_entrance_step(fired.id, fired.due_ms),
            RevealTask::PlaceNext => self.on_place_next(fired.id, fired.due_ms),
            RevealTask::Convert(position) => self.on_convert(fired.id, position),
        };
        Some(notices)
    }

    /// Read-only view for the renderer.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        let (category, phrase) = self
            .puzzle
            .as_ref()
            .map(|p| (p.category.clone(), p.phrase.clone()))
            .unwrap_or_default();
        let cells = phrase
            .chars()
            .zip(&self.letters)
            .enumerate()
            .map(|(i, (raw, folded))| match folded {
                None => Cell::Fixed(raw),
                Some(letter) if self.revealed_positions.contains(&i) => Cell::Letter(*letter),
                Some(_) if self.overlay_positions.contains(&i) => Cell::Marker,
                Some(_) if i < self.placeholders => Cell::Hidden,
                Some(_) => Cell::Blank,
            })
            .collect();
        BoardSnapshot {
            category,
            phrase,
            revealed_positions: self.revealed_positions.clone(),
            overlay_positions: self.overlay_positions.clone(),
            phase: self.phase,
            cells,
        }
    }

    fn on_entrance_step(&mut self, id: TimerId, due_ms: u64) -> Vec<RevealNotice> {
        if self.entrance != Some(id) || self.phase != RevealPhase::EntranceAnimating {
            return Vec::new();
        }
        let mut notices = vec![RevealNotice::PlaceholderShown(self.placeholders)];
        self.placeholders += 1;
        if self.placeholders >= self.letters.len() {
            self.entrance = None;
            self.phase = RevealPhase::Ready;
            notices.push(RevealNotice::EntranceComplete);
        } else {
            self.entrance = Some(
                self.timers
                    .schedule_at(due_ms + self.timings.entrance_step_ms, RevealTask::EntranceStep),
            );
        }
        notices
    }

    fn on_place_next(&mut self, id: TimerId, due_ms: u64) -> Vec<RevealNotice> {
        if self.placement != Some(id) {
            return Vec::new();
        }
        self.placement = None;
        let Some(position) = self.pending_positions.pop_front() else {
            return self.settle_if_done();
        };
        self.overlay_positions.insert(position);
        let conversion = self
            .timers
            .schedule_at(due_ms + self.timings.blue_to_letter_ms, RevealTask::Convert(position));
        self.conversions.insert(position, conversion);
        if !self.pending_positions.is_empty() {
            self.placement = Some(
                self.timers
                    .schedule_at(due_ms + self.timings.per_step_ms, RevealTask::PlaceNext),
            );
        }
        debug!(position, "marker placed");
        vec![RevealNotice::MarkerPlaced(position)]
    }

    fn on_convert(&mut self, id: TimerId, position: usize) -> Vec<RevealNotice> {
        if self.conversions.get(&position) != Some(&id) || !self.overlay_positions.contains(&position)
        {
            return Vec::new();
        }
        self.conversions.remove(&position);
        self.overlay_positions.remove(&position);
        self.revealed_positions.insert(position);
        debug!(position, "letter revealed");
        let mut notices = vec![RevealNotice::LetterRevealed(position)];
        if let Some(letter) = self.complete_letter_at(position) {
            notices.push(RevealNotice::LetterCompleted(letter));
        }
        notices.extend(self.settle_if_done());
        notices
    }

    fn settle_if_done(&mut self) -> Vec<RevealNotice> {
        let idle = self.placement.is_none()
            && self.pending_positions.is_empty()
            && self.overlay_positions.is_empty();
        if idle && self.phase == RevealPhase::StagedReveal {
            self.phase = RevealPhase::Ready;
            vec![RevealNotice::Settled]
        } else {
            Vec::new()
        }
    }

    fn finish_entrance(&mut self) {
        if self.phase != RevealPhase::EntranceAnimating {
            return;
        }
        if let Some(id) = self.entrance.take() {
            self.timers.cancel(id);
        }
        self.placeholders = self.letters.len();
        self.phase = RevealPhase::Ready;
    }

    /// Ends the entrance and any staged reveal so instant reveals never
    /// race a marker timer. `Settled` is only ever reported by a timer.
    fn settle_now(&mut self) {
        self.finish_entrance();
        if self.phase == RevealPhase::StagedReveal {
            self.finalize(FinalState::Ready);
        }
    }

    fn reveal_position_now(&mut self, position: usize) {
        self.revealed_positions.insert(position);
        self.complete_letter_at(position);
    }

    fn unrevealed_positions_of(&self, letter: char) -> impl Iterator<Item = usize> + '_ {
        self.letters
            .iter()
            .enumerate()
            .filter(move |(i, l)| **l == Some(letter) && !self.revealed_positions.contains(i))
            .map(|(i, _)| i)
    }

    fn complete_letter_at(&mut self, position: usize) -> Option<char> {
        let letter = self.letters.get(position).copied().flatten()?;
        if self.revealed_letters.contains(&letter) {
            return None;
        }
        if self.unrevealed_positions_of(letter).next().is_some() {
            return None;
        }
        self.revealed_letters.insert(letter);
        Some(letter)
    }

    fn refresh_revealed_letters(&mut self) {
        let complete: Vec<char> = self
            .correct_letters
            .iter()
            .copied()
            .filter(|c| self.unrevealed_positions_of(*c).next().is_none())
            .collect();
        self.revealed_letters.extend(complete);
    }

    fn cancel_timers(&mut self) {
        let dropped = self.timers.cancel_all();
        if dropped > 0 {
            debug!(dropped, "reveal timers cancelled");
        }
        self.entrance = None;
        self.placement = None;
        self.conversions.clear();
    }
}
