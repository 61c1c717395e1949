//! Tally Domain Layer
//!
//! This crate contains the domain model shared by every other Tally crate.
//! Apart from serde (the persisted JSON shape is part of the model) it has no
//! external dependencies and defines the value types and trait interfaces the
//! infrastructure layers implement.
//!
//! ## Key Concepts
//!
//! - **Transaction**: one financial movement (date, description, signed amount)
//! - **TransactionList**: ordered, duplicate-permitting sequence of transactions
//! - **LlmProvider**: boundary to a text-understanding service
//!
//! ## Architecture
//!
//! - Pure value types only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod traits;
pub mod transaction;

// Re-exports for convenience
pub use traits::LlmProvider;
pub use transaction::{Transaction, TransactionList};
