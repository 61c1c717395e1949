//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Columns, object::Rows, Alignment, Modify, Style},
};
use tally_corrector::CorrectionSummary;
use tally_domain::Transaction;
use tally_extractor::ExtractionMetadata;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a transaction list.
    pub fn format_transactions(&self, transactions: &[Transaction]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(transactions)?),
            OutputFormat::Table => Ok(self.format_transactions_table(transactions)),
        }
    }

    /// Format transactions as a table.
    ///
    /// Always a table, whatever the configured format; the correction loop
    /// shows this before every prompt.
    pub fn format_transactions_table(&self, transactions: &[Transaction]) -> String {
        if transactions.is_empty() {
            return self.colorize("No transactions.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Date", "Description", "Amount"]);

        for (i, t) in transactions.iter().enumerate() {
            builder.push_record([
                (i + 1).to_string(),
                t.date.clone(),
                t.description.clone(),
                format!("{:.2}", t.amount),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Columns::last()).with(Alignment::right()))
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let total: f64 = transactions.iter().map(|t| t.amount).sum();
        format!(
            "{}\n{} transaction(s), net {:.2}",
            table,
            transactions.len(),
            total
        )
    }

    /// Format the result of an extraction run.
    pub fn extraction_summary(&self, count: usize, metadata: &ExtractionMetadata) -> String {
        let mut msg = format!(
            "Extracted {} transaction(s) from {} window(s) in {} ms",
            count, metadata.windows_processed, metadata.processing_time_ms
        );
        if metadata.duplicates_removed > 0 {
            msg.push_str(&format!(
                ", {} overlap duplicate(s) removed",
                metadata.duplicates_removed
            ));
        }

        if metadata.windows_failed > 0 || metadata.records_dropped > 0 {
            self.warning(&format!(
                "{} ({} window(s) failed, {} record(s) dropped)",
                msg, metadata.windows_failed, metadata.records_dropped
            ))
        } else {
            self.success(&msg)
        }
    }

    /// Format the result of a correction session.
    pub fn correction_summary(&self, summary: &CorrectionSummary) -> String {
        self.info(&format!(
            "{} edit(s) applied, {} not applied; {} transaction(s)",
            summary.edits_applied,
            summary.edits_rejected,
            summary.transactions.len()
        ))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
