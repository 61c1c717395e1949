//! Core Extractor implementation

use crate::aggregate::{aggregate, dedup_overlaps};
use crate::chunking::{TextChunker, Window};
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_and_validate;
use crate::prompt::PromptBuilder;
use crate::types::{ExtractionMetadata, ExtractionResult, WindowReport};
use std::fmt::Display;
use std::time::Instant;
use tally_domain::LlmProvider;
use tracing::{debug, info, warn};

/// The Extractor converts statement text into validated transactions
///
/// The provider is owned for the extractor's lifetime. Pass `&provider` to
/// share one client with the correction stage.
pub struct Extractor<L>
where
    L: LlmProvider,
{
    llm_provider: L,
    chunker: TextChunker,
    config: ExtractorConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new Extractor
    ///
    /// Fails with `InvalidChunkParameters` if the configured overlap is not
    /// smaller than the window size.
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        let chunker = TextChunker::new(config.chunk_size, config.chunk_overlap)?;

        Ok(Self {
            llm_provider,
            chunker,
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract transactions from statement text
    ///
    /// Windows are processed one at a time, in order. A window whose call
    /// fails or whose reply is malformed contributes nothing; the remaining
    /// windows are still processed.
    pub fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractorError> {
        let start_time = Instant::now();
        let windows = self.chunker.chunk(text);

        info!(
            "Starting extraction: {} chars in {} windows (size {}, overlap {})",
            text.chars().count(),
            windows.len(),
            self.config.chunk_size,
            self.config.chunk_overlap
        );

        let reports: Vec<WindowReport> = windows
            .iter()
            .map(|window| {
                debug!("Processing window {}/{}", window.index + 1, windows.len());
                self.extract_window(window)
            })
            .collect();

        let per_window: Vec<_> = reports.iter().map(|r| r.transactions.clone()).collect();
        let (per_window, duplicates_removed) = if self.config.dedup_overlaps {
            dedup_overlaps(per_window)
        } else {
            (per_window, 0)
        };
        let transactions = aggregate(per_window);

        let metadata = ExtractionMetadata {
            model_name: self.llm_provider.model_name().to_string(),
            windows_processed: reports.len(),
            windows_failed: reports.iter().filter(|r| r.failed()).count(),
            records_dropped: reports.iter().map(WindowReport::dropped).sum(),
            duplicates_removed,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Extraction complete: {} transactions, {} windows failed, {} records dropped, {} duplicates removed",
            transactions.len(),
            metadata.windows_failed,
            metadata.records_dropped,
            metadata.duplicates_removed
        );

        Ok(ExtractionResult {
            transactions,
            windows: reports,
            metadata,
        })
    }

    /// Extract transactions from a single window
    pub fn extract_window(&self, window: &Window<'_>) -> WindowReport {
        let mut report = WindowReport {
            index: window.index,
            start: window.start,
            len: window.len,
            transactions: Vec::new(),
            issues: Vec::new(),
        };

        let raw = match self.invoke(window.text) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Window {} skipped: {}", window.index, e);
                report.issues.push(e);
                return report;
            }
        };

        debug!("Window {} response length: {} chars", window.index, raw.len());

        let parsed = parse_and_validate(&raw);
        report.transactions = parsed.transactions;
        report.issues = parsed.issues;
        report
    }

    /// Send one window to the model and return its raw reply
    ///
    /// The reply is not trusted to have any particular shape.
    pub fn invoke(&self, window_text: &str) -> Result<String, ExtractorError> {
        let prompt = PromptBuilder::new(window_text).build();
        debug!("Prompt length: {} chars", prompt.len());

        self.llm_provider
            .generate(&prompt)
            .map_err(|e| ExtractorError::InvocationFailure(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_llm::MockProvider;

    fn create_test_extractor(llm: MockProvider) -> Extractor<MockProvider> {
        Extractor::new(llm, ExtractorConfig::default()).unwrap()
    }

    #[test]
    fn test_extract_empty_response() {
        let extractor = create_test_extractor(MockProvider::new("[]"));

        let result = extractor.extract("Some text").unwrap();
        assert!(result.transactions.is_empty());
        assert_eq!(result.metadata.windows_processed, 1);
        assert_eq!(result.metadata.windows_failed, 0);
    }

    #[test]
    fn test_extract_empty_text_makes_no_calls() {
        let llm = MockProvider::new("[]");
        let extractor = create_test_extractor(llm.clone());

        let result = extractor.extract("").unwrap();
        assert!(result.transactions.is_empty());
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_invalid_chunk_config_rejected() {
        let config = ExtractorConfig {
            chunk_size: 50,
            chunk_overlap: 60,
            ..Default::default()
        };
        let result = Extractor::new(MockProvider::new("[]"), config);
        assert!(matches!(
            result,
            Err(ExtractorError::InvalidChunkParameters { size: 50, overlap: 60 })
        ));
    }

    #[test]
    fn test_extract_window_invocation_failure() {
        let llm = MockProvider::default();
        llm.push_error("connection refused");
        let extractor = create_test_extractor(llm);

        let window = crate::chunk("text", 10, 0).unwrap()[0];
        let report = extractor.extract_window(&window);

        assert!(report.failed());
        assert!(report.transactions.is_empty());
        assert!(matches!(
            report.issues.as_slice(),
            [ExtractorError::InvocationFailure(_)]
        ));
    }

    #[test]
    fn test_invoke_returns_raw_reply() {
        let extractor = create_test_extractor(MockProvider::new("not json at all"));
        assert_eq!(extractor.invoke("text").unwrap(), "not json at all");
    }

    #[test]
    fn test_prompt_contains_window_text() {
        let llm = MockProvider::new("[]");
        let extractor = create_test_extractor(llm.clone());

        extractor.extract("01/15 COFFEE -3.50").unwrap();
        assert!(llm.prompts()[0].contains("01/15 COFFEE -3.50"));
    }
}
