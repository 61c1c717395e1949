//! Review command implementation.

use crate::cli::ReviewArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::repl::TerminalSurface;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use tally_corrector::{CorrectionLoop, CorrectionSummary, ScriptedSurface};
use tally_domain::{LlmProvider, TransactionList};
use tally_store::{export_csv, load_transactions, save_transactions};

/// Execute the review command.
pub fn execute_review<L>(
    args: ReviewArgs,
    config: &Config,
    provider: L,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider,
    L::Error: Display,
{
    let transactions = load_transactions(&args.file)?;
    let summary = run_review(
        transactions,
        args.script.as_deref(),
        config,
        provider,
        formatter,
    )?;

    save_transactions(&args.file, &summary.transactions)?;
    println!(
        "{}",
        formatter.success(&format!("Saved {}", args.file.display()))
    );

    if let Some(csv) = &args.csv {
        export_csv(csv, &summary.transactions)?;
        println!("{}", formatter.success(&format!("Exported {}", csv.display())));
    }

    Ok(())
}

/// Run the correction loop over `transactions`.
///
/// Commands come from `script` (one per line) when given, otherwise from
/// the terminal.
pub fn run_review<L>(
    transactions: TransactionList,
    script: Option<&Path>,
    config: &Config,
    provider: L,
    formatter: &Formatter,
) -> Result<CorrectionSummary>
where
    L: LlmProvider,
    L::Error: Display,
{
    let correction = CorrectionLoop::new(provider, config.corrector.clone());

    let summary = match script {
        Some(path) => {
            let mut surface = ScriptedSurface::from_lines(&fs::read_to_string(path)?);
            let summary = correction.run(transactions, &mut surface);
            for (command, error) in surface.rejections() {
                eprintln!(
                    "{}",
                    formatter.warning(&format!("Edit not applied ({}): {}", command, error))
                );
            }
            summary
        }
        None => {
            let mut surface = TerminalSurface::new(formatter, config.settings.history_size)?;
            let summary = correction.run(transactions, &mut surface);
            surface.close();
            summary
        }
    };

    println!("{}", formatter.correction_summary(&summary));
    Ok(summary)
}
