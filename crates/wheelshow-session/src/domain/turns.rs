//! Turn order.

use tracing::debug;

use super::state::SessionState;

/// Moves the turn pointer held in [`SessionState`]. Holds no pointer of
/// its own.
#[derive(Debug, Clone, Copy)]
pub struct TurnScheduler {
    player_count: usize,
}

impl TurnScheduler {
    /// Creates a scheduler for `player_count` seats. A zero count is
    /// treated as one seat.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count: player_count.max(1),
        }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Passes the turn to the next seat. With no current player the first
    /// seat gets the turn.
    pub fn advance(&self, state: &mut SessionState) -> usize {
        let next = state
            .player_index
            .map_or(0, |current| (current + 1) % self.player_count);
        state.player_index = Some(next);
        debug!(player = next, "turn advanced");
        next
    }

    /// Host override. Returns `false` for an unknown seat.
    pub fn set_turn(&self, state: &mut SessionState, index: usize) -> bool {
        if index >= self.player_count {
            return false;
        }
        state.player_index = Some(index);
        true
    }

    /// Seats the opening player of the current round; rounds rotate the
    /// starting seat.
    pub fn begin_round(&self, state: &mut SessionState) -> usize {
        let rounds = usize::try_from(state.round_number.saturating_sub(1)).unwrap_or(0);
        let first = rounds % self.player_count;
        state.player_index = Some(first);
        first
    }
}
