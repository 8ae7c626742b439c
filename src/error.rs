//! Error types for the encounter simulation

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced to the host loop.
///
/// Validation errors are raised before any state is touched, so a failed
/// call leaves the encounter exactly as it was.
#[derive(Debug, Error)]
pub enum SimError {
    /// Malformed data handed to a tick (e.g. non-finite player position)
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Out-of-range argument to a projectile or health operation
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Tick requested after the encounter was torn down
    #[error("encounter has ended")]
    EncounterEnded,

    #[error("failed to read tuning file {path}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tuning JSON")]
    ParseConfig {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid tuning: {reason}")]
    InvalidConfig { reason: String },
}

impl SimError {
    pub(crate) fn input(reason: impl Into<String>) -> Self {
        SimError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn argument(reason: impl Into<String>) -> Self {
        SimError::InvalidArgument {
            reason: reason.into(),
        }
    }
}
