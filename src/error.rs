//! Error types returned by hashing, sketch construction and merging.

use thiserror::Error;

use crate::config::SketchConfig;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised synchronously by the sketch core. None of them is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The key cannot be hashed (e.g. it is empty).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Precision, register count or register contents are out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Merge attempted between sketches built with a different `(precision, seed)` pair.
    #[error("incompatible sketch: {lhs} cannot be merged with {rhs}")]
    IncompatibleSketch {
        lhs: SketchConfig,
        rhs: SketchConfig,
    },
}
