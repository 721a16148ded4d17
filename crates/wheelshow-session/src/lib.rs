//! Wheelshow — Game Session.
//!
//! Responsible for the phase state machine that runs a show: which puzzle
//! is up, whose turn it is, how spins, guesses, and solve verdicts move
//! money, and which host input is valid at any moment.

pub mod application;
pub mod domain;
