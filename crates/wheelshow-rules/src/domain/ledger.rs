//! Round and total money for every player.
//!
//! Each operation touches exactly the named player. Indices come from the
//! session controller, which only hands out indices into this roster; an
//! unknown index is a no-op that reports `false`.

use serde::Serialize;
use tracing::{debug, warn};
use wheelshow_core::error::GameError;
use wheelshow_core::money::Money;

use super::player::Player;

/// One row of the final standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// 1-based finishing position.
    pub place: usize,
    /// Roster index of the player.
    pub player: usize,
    /// Player name.
    pub name: String,
    /// Banked money.
    pub total_score: Money,
}

/// The roster and the rules for moving money between round and total.
#[derive(Debug, Clone)]
pub struct ScoreLedger {
    players: Vec<Player>,
}

impl ScoreLedger {
    /// Creates a ledger with one zeroed player per name.
    ///
    /// # Errors
    ///
    /// Returns `GameError::EmptyRoster` if `names` is empty.
    pub fn new<I, S>(names: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let players: Vec<Player> = names.into_iter().map(Player::new).collect();
        if players.is_empty() {
            return Err(GameError::EmptyRoster);
        }
        Ok(Self { players })
    }

    /// All players in roster order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// A single player.
    #[must_use]
    pub fn get(&self, player: usize) -> Option<&Player> {
        self.players.get(player)
    }

    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always `false`; an empty roster cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    fn player_mut(&mut self, player: usize) -> Option<&mut Player> {
        let found = self.players.get_mut(player);
        if found.is_none() {
            warn!(player, "ledger operation on unknown player ignored");
        }
        found
    }

    /// Wipes the player's round money.
    pub fn set_bankrupt(&mut self, player: usize) -> bool {
        self.player_mut(player).is_some_and(|p| {
            p.round_score = Money::ZERO;
            debug!(player, "bankrupt");
            true
        })
    }

    /// Adds `amount` to the player's round money; negative amounts charge
    /// the player (vowel purchases).
    pub fn add_round_money(&mut self, player: usize, amount: Money) -> bool {
        self.player_mut(player).is_some_and(|p| {
            p.round_score += amount;
            debug!(player, %amount, round_score = %p.round_score, "round money changed");
            true
        })
    }

    /// Banks the player's round money into their total. The round score
    /// itself is left alone; [`ScoreLedger::reset_round`] clears it.
    pub fn commit_round(&mut self, player: usize) -> bool {
        self.player_mut(player).is_some_and(|p| {
            p.total_score += p.round_score;
            debug!(player, total_score = %p.total_score, "round committed");
            true
        })
    }

    /// Adds `amount` straight to the player's total.
    pub fn add_total_money(&mut self, player: usize, amount: Money) -> bool {
        self.player_mut(player).is_some_and(|p| {
            p.total_score += amount;
            true
        })
    }

    /// Zeroes every player's round money.
    pub fn reset_round(&mut self) {
        for p in &mut self.players {
            p.round_score = Money::ZERO;
        }
    }

    /// Host correction of both scores.
    pub fn override_score(&mut self, player: usize, round: Money, total: Money) -> bool {
        self.player_mut(player).is_some_and(|p| {
            p.round_score = round;
            p.total_score = total;
            true
        })
    }

    /// Marks whether the player has spun this turn.
    pub fn set_spun(&mut self, player: usize, spun: bool) -> bool {
        self.player_mut(player).is_some_and(|p| {
            p.has_spun = spun;
            true
        })
    }

    /// Clears every spin marker.
    pub fn clear_spins(&mut self) {
        for p in &mut self.players {
            p.has_spun = false;
        }
    }

    /// The player with the highest total; the earliest seat wins ties.
    #[must_use]
    pub fn leader(&self) -> Option<usize> {
        self.players
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, Money)>, (i, p)| match best {
                Some((_, top)) if top >= p.total_score => best,
                _ => Some((i, p.total_score)),
            })
            .map(|(i, _)| i)
    }

    /// Players ordered by total score, highest first. Equal totals keep
    /// roster order.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        let mut order: Vec<usize> = (0..self.players.len()).collect();
        order.sort_by(|a, b| self.players[*b].total_score.cmp(&self.players[*a].total_score));
        order
            .into_iter()
            .enumerate()
            .map(|(place, player)| Standing {
                place: place + 1,
                player,
                name: self.players[player].name.clone(),
                total_score: self.players[player].total_score,
            })
            .collect()
    }
}
