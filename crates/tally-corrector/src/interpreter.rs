//! Interpretation of a single correction command

use crate::error::CorrectorError;
use crate::prompt::PromptBuilder;
use std::fmt::Display;
use tally_domain::{LlmProvider, Transaction, TransactionList};
use tally_extractor::parse_and_validate;
use tracing::{debug, warn};

/// Turns a natural-language command into a replacement transaction list
///
/// Replacement lists are validated strictly: a single bad record rejects the
/// whole reply, so a partially understood edit can never silently drop rows.
pub struct Interpreter<L>
where
    L: LlmProvider,
{
    llm_provider: L,
}

impl<L> Interpreter<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new Interpreter
    pub fn new(llm_provider: L) -> Self {
        Self { llm_provider }
    }

    /// Ask the model to apply `command` to `current`
    ///
    /// Returns the complete replacement list. `current` is never modified.
    pub fn interpret(
        &self,
        current: &[Transaction],
        command: &str,
    ) -> Result<TransactionList, CorrectorError> {
        let prompt = PromptBuilder::new(current, command).build()?;
        debug!("Interpretation prompt length: {} chars", prompt.len());

        let raw = self
            .llm_provider
            .generate(&prompt)
            .map_err(|e| CorrectorError::InvocationFailure(e.to_string()))?;

        let report = parse_and_validate(&raw);
        if let Some(issue) = report.issues.into_iter().next() {
            warn!("Replacement list rejected: {}", issue);
            return Err(CorrectorError::from_parse_issue(issue));
        }

        Ok(report.transactions)
    }
}
