//! Error types for choice dictionary operations.

use thiserror::Error;

/// Error variants for choice dictionary operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// An element index was provided that lies outside the universe `[0, universe)`.
    #[error("index {index} out of range for universe of size {universe}")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The universe size of the dictionary.
        universe: usize,
    },

    /// `choice` or `remove` was called while no element is present.
    #[error("choice dictionary is empty")]
    Empty,
}

/// A specialized Result type for choice dictionary operations.
pub type Result<T> = std::result::Result<T, Error>;
