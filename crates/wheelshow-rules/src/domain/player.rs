//! Contestants.

use serde::Serialize;
use wheelshow_core::money::Money;

/// A contestant and their money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    /// Display name.
    pub name: String,
    /// Money won in the current round.
    pub round_score: Money,
    /// Money banked across solved rounds.
    pub total_score: Money,
    /// Set when the player spins; cleared when the turn passes.
    pub has_spun: bool,
}

impl Player {
    /// Creates a player with no money.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            round_score: Money::ZERO,
            total_score: Money::ZERO,
            has_spun: false,
        }
    }
}
