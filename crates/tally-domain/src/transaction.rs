//! Transaction module - the canonical record produced by extraction

use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered sequence of transactions
///
/// Order is insertion order (window order during extraction, replacement
/// order during correction). Duplicates are permitted.
pub type TransactionList = Vec<Transaction>;

/// A single financial movement
///
/// Serializes to exactly three keys: `date`, `description` and `amount`.
/// Negative amounts are debits, positive amounts are credits.
///
/// # Examples
///
/// ```
/// use tally_domain::Transaction;
///
/// let tx = Transaction::new("2024-01-15", "Grocery shopping", -45.67);
/// assert!(tx.is_debit());
/// assert_eq!(tx.to_string(), "2024-01-15  Grocery shopping  -45.67");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Calendar date, canonical form `YYYY-MM-DD`
    pub date: String,

    /// Human-readable description (non-empty)
    pub description: String,

    /// Signed amount
    pub amount: f64,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(date: impl Into<String>, description: impl Into<String>, amount: f64) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount,
        }
    }

    /// Whether this transaction moves money out of the account
    pub fn is_debit(&self) -> bool {
        self.amount < 0.0
    }

    /// Whether two transactions describe the same movement
    ///
    /// Amounts are compared at cent precision so that `100.0` and `100.00`
    /// parsed through different paths still match.
    pub fn same_movement(&self, other: &Transaction) -> bool {
        self.date == other.date
            && self.description == other.description
            && (self.amount * 100.0).round() == (other.amount * 100.0).round()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}  {:.2}", self.date, self.description, self.amount)
    }
}
