//! Scoring and wheel domain types.

pub mod ledger;
pub mod player;
pub mod wheel;
