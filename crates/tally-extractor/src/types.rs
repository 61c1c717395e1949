//! Result types for extraction

use crate::error::ExtractorError;
use tally_domain::TransactionList;

/// Outcome of extracting one window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowReport {
    /// Position of the window in the sequence
    pub index: usize,

    /// Character offset of the window in the source text
    pub start: usize,

    /// Window length in characters
    pub len: usize,

    /// Validated transactions from this window
    pub transactions: TransactionList,

    /// Non-fatal problems: invocation failure, malformed reply, dropped records
    pub issues: Vec<ExtractorError>,
}

impl WindowReport {
    /// Whether the model call failed or its reply could not be parsed
    pub fn failed(&self) -> bool {
        self.issues.iter().any(|issue| {
            matches!(
                issue,
                ExtractorError::InvocationFailure(_) | ExtractorError::MalformedResponse(_)
            )
        })
    }

    /// Number of records dropped by validation
    pub fn dropped(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, ExtractorError::IncompleteRecord { .. }))
            .count()
    }
}

/// Result of an extraction operation
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// All validated transactions, in window order
    pub transactions: TransactionList,

    /// Per-window outcomes
    pub windows: Vec<WindowReport>,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

/// Metadata about an extraction operation
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMetadata {
    /// Name of the LLM model used
    pub model_name: String,

    /// Number of windows sent to the model
    pub windows_processed: usize,

    /// Windows whose call failed or whose reply was malformed
    pub windows_failed: usize,

    /// Records dropped by validation across all windows
    pub records_dropped: usize,

    /// Transactions removed by overlap deduplication
    pub duplicates_removed: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
