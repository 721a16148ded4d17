//! Reading puzzle lists from files.
//!
//! A puzzle file is an array of objects with `category`, `phrase`, and
//! optional `type` and `prize_value` fields. Entries that are not objects
//! are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{info, warn};
use wheelshow_core::error::GameError;

use crate::domain::catalog::PuzzleCatalog;
use crate::domain::puzzle::Puzzle;

/// Failure while reading a puzzle source.
#[derive(Debug, Error)]
pub enum PuzzleSourceError {
    /// The file could not be read.
    #[error("could not read puzzle file: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON was malformed or an entry was missing a field.
    #[error("malformed puzzle JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML was malformed or an entry was missing a field.
    #[error("malformed puzzle YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension is not one we can parse.
    #[error("unsupported puzzle file format: {0}")]
    UnsupportedFormat(String),

    /// The puzzles parsed but do not form a playable catalog.
    #[error(transparent)]
    Invalid(#[from] GameError),
}

/// Supplies the ordered puzzle list at session start.
pub trait PuzzleSource {
    /// Loads every puzzle, in play order, with the hash of the raw source.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleSourceError` if the source cannot be read or parsed.
    fn load(&self) -> Result<LoadedPuzzles, PuzzleSourceError>;
}

/// Puzzles read from a source, plus a content hash for logging.
#[derive(Debug, Clone)]
pub struct LoadedPuzzles {
    /// Puzzles in play order.
    pub puzzles: Vec<Puzzle>,
    /// SHA-256 of the raw source text, hex encoded.
    pub version_hash: String,
}

impl LoadedPuzzles {
    /// Builds the session catalog.
    ///
    /// # Errors
    ///
    /// Returns `GameError::EmptyCatalog` if no puzzles were loaded.
    pub fn into_catalog(self) -> Result<PuzzleCatalog, GameError> {
        Ok(PuzzleCatalog::new(self.puzzles)?.with_version_hash(self.version_hash))
    }
}

/// A puzzle file on disk; the format is chosen by extension.
#[derive(Debug, Clone)]
pub struct FilePuzzleSource {
    path: PathBuf,
}

impl FilePuzzleSource {
    /// Creates a source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PuzzleSource for FilePuzzleSource {
    fn load(&self) -> Result<LoadedPuzzles, PuzzleSourceError> {
        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let raw = fs::read_to_string(&self.path)?;
        let puzzles = match extension.as_str() {
            "json" => parse_json(&raw)?,
            "yaml" | "yml" => parse_yaml(&raw)?,
            other => return Err(PuzzleSourceError::UnsupportedFormat(other.to_owned())),
        };
        let version_hash = version_hash(&raw);
        info!(
            path = %self.path.display(),
            count = puzzles.len(),
            %version_hash,
            "loaded puzzles"
        );
        Ok(LoadedPuzzles {
            puzzles,
            version_hash,
        })
    }
}

/// Parses a JSON puzzle array.
///
/// # Errors
///
/// Returns `PuzzleSourceError::Json` for malformed JSON or an object
/// missing `category`/`phrase`, and `PuzzleSourceError::Invalid` for a
/// blank phrase.
pub fn parse_json(raw: &str) -> Result<Vec<Puzzle>, PuzzleSourceError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let mut puzzles = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            warn!(position, "skipping puzzle entry that is not an object");
            continue;
        }
        let puzzle: Puzzle = serde_json::from_value(entry)?;
        puzzle.validate()?;
        puzzles.push(puzzle);
    }
    Ok(puzzles)
}

/// Parses a YAML puzzle sequence.
///
/// # Errors
///
/// Returns `PuzzleSourceError::Yaml` for malformed YAML or a mapping
/// missing `category`/`phrase`, and `PuzzleSourceError::Invalid` for a
/// blank phrase.
pub fn parse_yaml(raw: &str) -> Result<Vec<Puzzle>, PuzzleSourceError> {
    let entries: Vec<serde_yaml::Value> = serde_yaml::from_str(raw)?;
    let mut puzzles = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        if !entry.is_mapping() {
            warn!(position, "skipping puzzle entry that is not a mapping");
            continue;
        }
        let puzzle: Puzzle = serde_yaml::from_value(entry)?;
        puzzle.validate()?;
        puzzles.push(puzzle);
    }
    Ok(puzzles)
}

/// Hex-encoded SHA-256 of the raw source.
#[must_use]
pub fn version_hash(raw: &str) -> String {
    format!("{:x}", Sha256::digest(raw.as_bytes()))
}
