//! Error taxonomy for order submission.
//!
//! There are no transient failures: the book is an in-memory computation, so a call
//! either completes or is rejected up front with nothing applied.

use thiserror::Error;

/// Rejection raised before any book state is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// Unrecognized side or kind, a limit order without a price, a non-finite or
    /// out-of-range price, or a resting order that breaks ledger ordering.
    #[error("invalid order: {0}")]
    InvalidOrder(String),
    /// Generator settings that cannot produce an order stream.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl BookError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        BookError::InvalidOrder(reason.into())
    }
}
