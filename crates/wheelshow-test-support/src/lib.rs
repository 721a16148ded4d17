//! Shared test mocks and fixtures for the Wheelshow game engine.

mod clock;
mod fixtures;
mod rng;

pub use clock::{FixedClock, fixed_clock};
pub use fixtures::{prized_puzzle, puzzle, roster};
pub use rng::{MockRng, SequenceRng};
