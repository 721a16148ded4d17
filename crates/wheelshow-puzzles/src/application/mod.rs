//! Puzzle sources.

pub mod loader;
