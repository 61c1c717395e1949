//! Tally Store
//!
//! File persistence for transaction lists.
//!
//! The canonical form is a pretty-printed JSON array of
//! `{date, description, amount}` objects. A CSV export with the header
//! `date,description,amount` is available for spreadsheets.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tally_domain::{Transaction, TransactionList};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from the file store
#[derive(Error, Debug)]
pub enum StoreError {
    /// No file at the given path
    #[error("Transaction file not found: {0}")]
    NotFound(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a valid transaction array
    #[error("Invalid transaction file: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Load a transaction list from a JSON file
pub fn load_transactions(path: impl AsRef<Path>) -> Result<TransactionList, StoreError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound(path.display().to_string()),
        _ => StoreError::Io(e),
    })?;

    let transactions: TransactionList = serde_json::from_str(&contents)?;
    debug!("Loaded {} transactions from {}", transactions.len(), path.display());
    Ok(transactions)
}

/// Save a transaction list as pretty-printed JSON
///
/// Missing parent directories are created.
pub fn save_transactions(
    path: impl AsRef<Path>,
    transactions: &[Transaction],
) -> Result<(), StoreError> {
    let path = path.as_ref();
    create_parent(path)?;

    let mut json = serde_json::to_string_pretty(transactions)?;
    json.push('\n');
    fs::write(path, json)?;

    info!("Saved {} transactions to {}", transactions.len(), path.display());
    Ok(())
}

/// Export a transaction list to a CSV file
pub fn export_csv(path: impl AsRef<Path>, transactions: &[Transaction]) -> Result<(), StoreError> {
    let path = path.as_ref();
    create_parent(path)?;

    let file = fs::File::create(path)?;
    write_csv(file, transactions)?;

    info!("Exported {} transactions to {}", transactions.len(), path.display());
    Ok(())
}

/// Write a transaction list as CSV to any writer
///
/// The header row is written even when the list is empty.
pub fn write_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<(), StoreError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(["date", "description", "amount"])?;
    for transaction in transactions {
        wtr.serialize(transaction)?;
    }
    wtr.flush()?;
    Ok(())
}

fn create_parent(path: &Path) -> Result<(), StoreError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}
