//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Every variant is a configuration failure detected before a session can
/// begin. Commands that arrive in the wrong phase are not errors; the
/// session controller ignores them instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// The puzzle catalog was built from an empty list.
    #[error("configuration error: puzzle catalog is empty")]
    EmptyCatalog,

    /// The wheel was configured without any wedges.
    #[error("configuration error: wheel has no wedges")]
    EmptyWheel,

    /// The session was started without any players.
    #[error("configuration error: roster is empty")]
    EmptyRoster,

    /// A wedge entry could not be interpreted.
    #[error("invalid wedge: {0}")]
    InvalidWedge(String),

    /// A puzzle record could not be interpreted.
    #[error("invalid puzzle: {0}")]
    InvalidPuzzle(String),

    /// Any other invalid configuration value.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl GameError {
    /// Returns `true` for the errors that make a session impossible to start.
    #[must_use]
    pub fn is_fatal_configuration(&self) -> bool {
        matches!(
            self,
            Self::EmptyCatalog | Self::EmptyWheel | Self::EmptyRoster | Self::Configuration(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_message() {
        assert_eq!(
            GameError::EmptyCatalog.to_string(),
            "configuration error: puzzle catalog is empty"
        );
    }

    #[test]
    fn test_invalid_wedge_is_not_fatal_configuration() {
        assert!(GameError::EmptyWheel.is_fatal_configuration());
        assert!(!GameError::InvalidWedge("PURPLE".into()).is_fatal_configuration());
    }
}
