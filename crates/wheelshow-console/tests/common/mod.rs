//! Shared test helpers for console integration tests.
#![allow(dead_code)]

use serde_json::Value;
use wheelshow_console::state::Console;
use wheelshow_core::money::Money;
use wheelshow_puzzles::domain::catalog::PuzzleCatalog;
use wheelshow_puzzles::domain::puzzle::PuzzleType;
use wheelshow_rules::domain::wheel::Wedge;
use wheelshow_session::domain::aggregates::GamePhaseController;
use wheelshow_session::domain::config::GameConfig;
use wheelshow_test_support::{MockRng, fixed_clock, prized_puzzle, puzzle, roster};

/// A console over a toss-up and one main round, on a fixed clock, with a
/// wheel that always pays $0.50.
pub fn build_console() -> Console {
    let catalog = PuzzleCatalog::new(vec![
        prized_puzzle("Thing", "GO", PuzzleType::TossUp, Money::from_cents(100)),
        puzzle("Thing", "CAT", PuzzleType::Main),
    ])
    .unwrap();
    let config = GameConfig {
        wedges: vec![Wedge::Cash(Money::from_cents(50))],
        ..GameConfig::default()
    };
    let controller = GamePhaseController::new(config, catalog, roster(2), &fixed_clock()).unwrap();
    Console::new(controller, Box::new(fixed_clock()), Box::new(MockRng))
}

/// Parses the JSON lines a console wrote.
pub fn events(out: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(out)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

/// Event type names in order.
pub fn types(out: &[u8]) -> Vec<String> {
    events(out)
        .iter()
        .filter_map(|e| e["type"].as_str().map(str::to_owned))
        .collect()
}
