//! Puzzle domain types.

pub mod catalog;
pub mod puzzle;
