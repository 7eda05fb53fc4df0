//! Error types for the runtime helpers

use thiserror::Error;

/// Result type alias for runtime helpers
pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Erased elements were not the storage the receiving adapter wraps
    #[error("collection element type mismatch: expected {expected}")]
    EltsMismatch { expected: &'static str },

    /// An erased struct value was not the type the receiving field holds
    #[error("value type mismatch: expected {expected}")]
    ValueMismatch { expected: &'static str },
}
