//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
///
/// Only `InvalidChunkParameters` and `Config` stop an extraction. The other
/// kinds are recorded per window and never change control flow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// Window overlap is not strictly smaller than window size
    #[error("Invalid chunk parameters: size {size}, overlap {overlap} (need 0 <= overlap < size)")]
    InvalidChunkParameters {
        /// Requested window size
        size: usize,
        /// Requested overlap
        overlap: usize,
    },

    /// Raw model output failed structural parsing
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A parsed record lacked a field or had a non-numeric amount
    #[error("Incomplete record at index {index}: {reason}")]
    IncompleteRecord {
        /// Position of the record in the parsed array
        index: usize,
        /// Why the record was dropped
        reason: String,
    },

    /// The model call itself failed
    #[error("Invocation failure: {0}")]
    InvocationFailure(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
