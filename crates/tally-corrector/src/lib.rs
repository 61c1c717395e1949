//! Tally Corrector
//!
//! Interactive, natural-language correction of an extracted transaction list.
//!
//! # Overview
//!
//! The user types free-text edits ("change the 2024-01-15 coffee to -4.20",
//! "delete the duplicate rent payment"). Each edit is sent to an LLM together
//! with the full current list, and the model answers with the complete
//! replacement list. The loop ends when the user types the sentinel (`ok`).
//!
//! # State machine
//!
//! ```text
//!                 command                 valid list
//! AwaitingInput ──────────▶ Interpreting ───────────▶ Updating
//!      ▲   │                     │                       │
//!      │   │ "ok" / EOF          │ failure (list kept)   │
//!      │   ▼                     │                       │
//!      │  Done                   │                       │
//!      └─────────────────────────┴───────────────────────┘
//! ```
//!
//! A failed interpretation never ends the loop and never changes the list;
//! the command surface is told the edit was not applied.
//!
//! # Example Usage
//!
//! ```
//! use tally_corrector::{CorrectionLoop, CorrectorConfig, ScriptedSurface};
//! use tally_llm::MockProvider;
//!
//! let llm = MockProvider::default();
//! llm.push_response(r#"[{"date": "2024-08-11", "description": "test", "amount": 100.0}]"#);
//!
//! let correction = CorrectionLoop::new(llm, CorrectorConfig::default());
//! let mut surface = ScriptedSurface::new([
//!     "add a transaction on 2024-08-11 for 100.00 described as test",
//!     "ok",
//! ]);
//!
//! let summary = correction.run(Vec::new(), &mut surface);
//! assert_eq!(summary.transactions.len(), 1);
//! assert_eq!(summary.edits_applied, 1);
//! ```

#![warn(missing_docs)]

mod config;
mod controller;
mod error;
mod interpreter;
mod prompt;
mod session;

pub use config::CorrectorConfig;
pub use controller::{CommandSurface, CorrectionLoop, CorrectionSummary, ScriptedSurface};
pub use error::CorrectorError;
pub use interpreter::Interpreter;
pub use prompt::PromptBuilder;
pub use session::{CorrectionSession, SessionState, StepOutcome};
