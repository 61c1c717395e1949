//! Error types for the Corrector

use tally_extractor::ExtractorError;
use thiserror::Error;

/// Reasons an edit was not applied
///
/// None of these end the correction loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrectorError {
    /// The interpretation call itself failed
    #[error("Invocation failure: {0}")]
    InvocationFailure(String),

    /// The reply was not a JSON transaction array
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The replacement list contained an invalid record
    #[error("Incomplete record at index {index}: {reason}")]
    IncompleteRecord {
        /// Position of the record in the replacement list
        index: usize,
        /// Why the record was rejected
        reason: String,
    },

    /// The current list could not be serialized into the prompt
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CorrectorError {
    /// Map a parser issue to the matching correction error
    pub(crate) fn from_parse_issue(issue: ExtractorError) -> Self {
        match issue {
            ExtractorError::IncompleteRecord { index, reason } => {
                CorrectorError::IncompleteRecord { index, reason }
            }
            ExtractorError::InvocationFailure(msg) => CorrectorError::InvocationFailure(msg),
            other => CorrectorError::MalformedResponse(other.to_string()),
        }
    }
}
