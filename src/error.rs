//! Library error types.

use thiserror::Error;

/// A predictor configuration rejected at construction time.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A width or history length of zero would make every index and mask
    /// degenerate.
    #[error("{0} must be nonzero")]
    Zero(&'static str),

    /// A width or history length wide enough to shift past the machine word.
    #[error("{field} is {bits} bits, which does not fit the machine word")]
    ExceedsWord { field: &'static str, bits: usize },
}

/// A violation of the predict/update request protocol.
///
/// The protocol allows exactly one outstanding prediction: every `update()`
/// must be preceded by a matching `predict()`.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("update() called with no prediction outstanding")]
    NoPendingPrediction,
}
