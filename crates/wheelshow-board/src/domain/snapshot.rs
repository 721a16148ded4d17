//! Read-only board views handed to the renderer.

use std::collections::BTreeSet;

use serde::Serialize;

use super::reveal::RevealPhase;

/// How a single phrase position is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    /// The entrance animation has not reached this position yet.
    Blank,
    /// An empty tile waiting to be guessed.
    Hidden,
    /// The neutral marker shown just before a letter appears.
    Marker,
    /// A revealed letter.
    Letter(char),
    /// A space or punctuation mark, always shown as-is.
    Fixed(char),
}

impl Cell {
    /// Single-character rendering used by text frontends.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Self::Blank => ' ',
            Self::Hidden => '_',
            Self::Marker => '#',
            Self::Letter(c) | Self::Fixed(c) => c,
        }
    }
}

/// Everything a renderer needs to draw the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    /// Category shown above the board.
    pub category: String,
    /// The full phrase. Renderers must only draw the positions in
    /// `revealed_positions`.
    pub phrase: String,
    /// Positions whose letter is shown.
    pub revealed_positions: BTreeSet<usize>,
    /// Positions currently showing the marker.
    pub overlay_positions: BTreeSet<usize>,
    /// Animation state of the board.
    pub phase: RevealPhase,
    /// Per-position rendering.
    pub cells: Vec<Cell>,
}

impl BoardSnapshot {
    /// The board as a single line of text, e.g. `C_T _#`.
    #[must_use]
    pub fn render_line(&self) -> String {
        self.cells.iter().map(|cell| cell.glyph()).collect()
    }
}
