//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider construction error
    #[error("Provider error: {0}")]
    Provider(#[from] tally_llm::LlmError),

    /// Extraction could not start
    #[error("Extraction error: {0}")]
    Extraction(#[from] tally_extractor::ExtractorError),

    /// Transaction file error
    #[error("Store error: {0}")]
    Store(#[from] tally_store::StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Terminal editor error
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
