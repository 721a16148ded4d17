//! Shared test helpers for session integration tests.
#![allow(dead_code)]

use wheelshow_core::money::Money;
use wheelshow_puzzles::domain::catalog::PuzzleCatalog;
use wheelshow_puzzles::domain::puzzle::Puzzle;
use wheelshow_rules::domain::wheel::Wedge;
use wheelshow_session::domain::aggregates::GamePhaseController;
use wheelshow_session::domain::commands::{CommandOutcome, HostCommand};
use wheelshow_session::domain::config::GameConfig;
use wheelshow_session::domain::events::{AudioCue, CueMode, GameEvent, GameEventKind};
use wheelshow_test_support::{FixedClock, MockRng, fixed_clock, roster};

/// A session driven on a virtual clock. Every event the controller emits
/// is collected in `events`.
pub struct Show {
    pub controller: GamePhaseController,
    pub now: u64,
    pub events: Vec<GameEvent>,
    clock: FixedClock,
    rng: MockRng,
}

impl Show {
    /// A show with `players` seats over `puzzles`.
    pub fn new(puzzles: Vec<Puzzle>, config: GameConfig, players: usize) -> Self {
        let clock = fixed_clock();
        let catalog = PuzzleCatalog::new(puzzles).unwrap();
        let mut controller = GamePhaseController::new(config, catalog, roster(players), &clock).unwrap();
        let events = controller.take_events();
        Self {
            controller,
            now: 0,
            events,
            clock,
            rng: MockRng,
        }
    }

    /// Sends a command at the current virtual time.
    pub fn send(&mut self, command: HostCommand) -> CommandOutcome {
        let outcome = self
            .controller
            .handle(&command, self.now, &self.clock, &mut self.rng);
        self.events.extend(self.controller.take_events());
        outcome
    }

    /// Lets `ms` milliseconds pass.
    pub fn wait(&mut self, ms: u64) {
        self.now += ms;
        self.controller.advance_to(self.now, &self.clock, &mut self.rng);
        self.events.extend(self.controller.take_events());
    }

    /// Lets time pass until no timer is pending.
    pub fn settle(&mut self) {
        while let Some(due) = self.controller.next_deadline() {
            self.now = self.now.max(due);
            self.controller.advance_to(self.now, &self.clock, &mut self.rng);
        }
        self.events.extend(self.controller.take_events());
    }

    /// Spins and waits for the wheel to stop.
    pub fn spin(&mut self) -> CommandOutcome {
        let outcome = self.send(HostCommand::RequestSpin);
        self.settle();
        outcome
    }

    /// Round money of a seat.
    pub fn round(&self, player: usize) -> Money {
        self.controller.ledger().players()[player].round_score
    }

    /// Banked money of a seat.
    pub fn total(&self, player: usize) -> Money {
        self.controller.ledger().players()[player].total_score
    }

    /// Every cue emitted so far, in order.
    pub fn cues(&self) -> Vec<(AudioCue, CueMode)> {
        self.events
            .iter()
            .filter_map(|e| match e.kind {
                GameEventKind::CuePlayed { cue, mode } => Some((cue, mode)),
                _ => None,
            })
            .collect()
    }

    /// Forgets collected events.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

/// A configuration whose wheel always lands on `wedge`.
pub fn one_wedge(wedge: Wedge) -> GameConfig {
    GameConfig {
        wedges: vec![wedge],
        ..GameConfig::default()
    }
}

/// A wheel that always pays `cents` per letter.
pub fn cash(cents: i64) -> Wedge {
    Wedge::Cash(Money::from_cents(cents))
}
