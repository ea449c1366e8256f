//! Error types for the classicrypt library.

use thiserror::Error;

/// Errors produced by the classicrypt library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// A required key parameter is missing or outside its contract.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The passphrase character driving the schedule is not in the alphabet.
    #[error("Passphrase character '{character}' at position {position} is not in the alphabet")]
    UndefinedSchedule {
        /// Passphrase character that could not be resolved.
        character: char,
        /// Text position at which the schedule was evaluated.
        position: usize,
    },

    /// A verse cipher token could not be parsed or resolved.
    #[error("Malformed token: '{0}'")]
    MalformedToken(String),
}

impl CipherError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        CipherError::InvalidParameter(msg.into())
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, CipherError>;
