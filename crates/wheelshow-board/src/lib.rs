//! Wheelshow — Puzzle Board.
//!
//! Responsible for what the board shows for the active puzzle over time:
//! the entrance animation, the marker-then-letter reveal that follows a
//! correct guess, toss-up auto-reveal, and the full reveal at round end.

pub mod domain;
