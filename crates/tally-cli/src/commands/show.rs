//! Show command implementation.

use crate::cli::ShowArgs;
use crate::error::Result;
use crate::output::Formatter;
use tally_store::load_transactions;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, formatter: &Formatter) -> Result<()> {
    let transactions = load_transactions(&args.file)?;
    println!("{}", formatter.format_transactions(&transactions)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use tempfile::TempDir;

    #[test]
    fn test_show_missing_file() {
        let dir = TempDir::new().unwrap();
        let args = ShowArgs {
            file: dir.path().join("missing.json"),
        };
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = execute_show(args, &formatter);
        assert!(matches!(
            result,
            Err(CliError::Store(tally_store::StoreError::NotFound(_)))
        ));
    }
}
