//! This module defines the errors that can be returned by plastichash.
//!
//! The balancer raises no recoverable errors in normal operation - every
//! variant here is either a caller contract violation or an internal
//! invariant break.

use std::fmt::Display;

use serde::Serialize;

pub type Result<T> = std::result::Result<T, Error>;

/// Error enum with all possible variants
#[derive(Debug, Serialize)]
pub enum Error {
    /// A placement was requested before any epoch was recorded.
    /// Callers must record at least one fleet size first.
    EmptyHistory,
    /// An epoch must be a strictly positive fleet size.
    InvalidEpoch { got: usize },
    Logic { reason: String },
}

impl Error {
    /// Returns true if this is an instance of a [`Error::EmptyHistory`] variant
    pub fn is_empty_history(&self) -> bool {
        matches!(self, Error::EmptyHistory)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for Error {}
