//! Wheelshow Core — shared domain abstractions.
//!
//! This crate defines the traits and value types every game context
//! depends on: time, randomness, money, events, and the virtual-time
//! task set that all timed components schedule against. It contains no
//! I/O.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod money;
pub mod rng;
pub mod timer;
