//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::commands::review::run_review;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::fmt::Display;
use std::fs;
use tally_domain::LlmProvider;
use tally_extractor::Extractor;
use tally_store::{export_csv, save_transactions};
use tracing::info;

/// Execute the extract command.
///
/// One provider serves both extraction and correction.
pub fn execute_extract<L>(
    args: ExtractArgs,
    config: &Config,
    provider: L,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider,
    L::Error: Display,
{
    let text = fs::read_to_string(&args.input)?;
    info!("Read {} bytes from {}", text.len(), args.input.display());

    let extractor = Extractor::new(&provider, config.extractor.clone())?;
    let result = extractor.extract(&text)?;
    println!(
        "{}",
        formatter.extraction_summary(result.transactions.len(), &result.metadata)
    );

    let transactions = if args.no_review {
        println!("{}", formatter.format_transactions(&result.transactions)?);
        result.transactions
    } else {
        run_review(
            result.transactions,
            args.script.as_deref(),
            config,
            &provider,
            formatter,
        )?
        .transactions
    };

    save_transactions(&args.output, &transactions)?;
    println!(
        "{}",
        formatter.success(&format!(
            "Saved {} transaction(s) to {}",
            transactions.len(),
            args.output.display()
        ))
    );

    if let Some(csv) = &args.csv {
        export_csv(csv, &transactions)?;
        println!("{}", formatter.success(&format!("Exported {}", csv.display())));
    }

    Ok(())
}
