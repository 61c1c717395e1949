//! Export command implementation.

use crate::cli::ExportArgs;
use crate::error::Result;
use crate::output::Formatter;
use tally_store::{export_csv, load_transactions};

/// Execute the export command.
pub fn execute_export(args: ExportArgs, formatter: &Formatter) -> Result<()> {
    let transactions = load_transactions(&args.file)?;
    export_csv(&args.csv, &transactions)?;

    println!(
        "{}",
        formatter.success(&format!(
            "Exported {} transaction(s) to {}",
            transactions.len(),
            args.csv.display()
        ))
    );
    Ok(())
}
