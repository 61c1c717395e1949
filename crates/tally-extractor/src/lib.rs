//! Tally Extractor
//!
//! Converts statement text recovered by OCR into an ordered list of
//! validated transactions using an LLM.
//!
//! # Overview
//!
//! Statement text is usually longer than a model's comfortable context, so it
//! is split into overlapping windows. Each window is sent to the model with a
//! fixed instruction, the raw reply is parsed defensively, and the per-window
//! results are concatenated in window order.
//!
//! # Architecture
//!
//! ```text
//! Text → Chunker → [Window]* → LLM → Parser/Validator → Aggregator → TransactionList
//! ```
//!
//! # Failure policy
//!
//! Only invalid chunk parameters abort extraction. A failed model call, a
//! malformed reply or an incomplete record only shrinks the result; every such
//! event is logged and reported in [`WindowReport::issues`].
//!
//! # Example Usage
//!
//! ```
//! use tally_extractor::{Extractor, ExtractorConfig};
//! use tally_llm::MockProvider;
//!
//! let llm = MockProvider::new(
//!     r#"[{"date": "2024-01-15", "description": "Coffee", "amount": -3.5}]"#,
//! );
//! let extractor = Extractor::new(llm, ExtractorConfig::default()).unwrap();
//!
//! let result = extractor.extract("01/15 COFFEE SHOP -3.50").unwrap();
//! assert_eq!(result.transactions.len(), 1);
//! assert_eq!(result.metadata.windows_processed, 1);
//! ```

#![warn(missing_docs)]

mod aggregate;
mod chunking;
mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;


pub use aggregate::{aggregate, dedup_overlaps};
pub use chunking::{chunk, TextChunker, Window};
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::{parse_and_validate, ParseReport};
pub use prompt::PromptBuilder;
pub use types::{ExtractionMetadata, ExtractionResult, WindowReport};
