//! World-generation errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum WorldError {
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("world seed must not be empty")]
    EmptySeed,

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("invalid chunk key: {0:?}")]
    InvalidChunkKey(String),
}

impl WorldError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
