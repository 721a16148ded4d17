//! Domain layer for the Puzzle Board context.

pub mod reveal;
pub mod snapshot;
