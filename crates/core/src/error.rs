//! Error types for corate
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! ## Error Model
//!
//! Absence of a value is never an error: reads that find nothing return
//! `Option::None` and callers branch on it. The variants below cover the
//! remaining failure classes:
//!
//! - **InvalidConfig**: construction-time parameter rejection, fatal
//! - **InvalidArguments**: the entry point was invoked with the wrong arity
//! - **MissingItemCount**: a neighbor's item count vanished mid-update
//! - **WrongType**: a store key was accessed as the wrong data type
//! - **BadNumber**: a stored value failed numeric decoding

use thiserror::Error;

/// Result type alias for corate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the recommender
#[derive(Debug, Error)]
pub enum Error {
    /// Constructor argument shape or range rejected
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Entry point invoked with the wrong number of arguments
    #[error("Invalid number of arguments.")]
    InvalidArguments,

    /// A neighbor's item count was absent or non-positive during a
    /// similarity update. The pair count has already been written when this
    /// is raised; the similarity for the pair is not.
    #[error("missing count for item {item}")]
    MissingItemCount {
        /// Stringified id of the item whose count vanished
        item: String,
    },

    /// A store key holds a different data type than the operation expects
    #[error("wrong type for key {key}")]
    WrongType {
        /// The offending store key
        key: String,
    },

    /// A stored value failed to decode as a number
    #[error("value at {key} is not a number: {raw:?}")]
    BadNumber {
        /// The store key holding the value
        key: String,
        /// The raw string that failed to parse
        raw: String,
    },
}

impl Error {
    /// Build an `InvalidConfig` from anything stringly
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }

    /// Check if this error is a construction-time config rejection
    ///
    /// Config errors are fatal; everything else is reported per operation.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::InvalidConfig(_))
    }
}
