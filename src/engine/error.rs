//! Rule-level error taxonomy.
//!
//! Every rejected intent carries a human-readable reason and leaves the
//! match state untouched; nothing here is fatal once a match is running.

use thiserror::Error;

/// Why the engine refused to create a match or apply an intent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// An unknown archetype id was supplied at match start. Fatal to
    /// starting that match; no match is created.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// A rule forbids the attempted action. Always recoverable: the same
    /// player may submit another intent.
    #[error("illegal action: {0}")]
    IllegalAction(String),

    /// The match configuration cannot produce a playable board
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl RulesError {
    /// The reason string without the taxonomy prefix
    pub fn reason(&self) -> &str {
        match self {
            RulesError::InvalidSelection(reason)
            | RulesError::IllegalAction(reason)
            | RulesError::Configuration(reason) => reason,
        }
    }
}
