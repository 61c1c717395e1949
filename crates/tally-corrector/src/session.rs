//! Correction session state

use crate::config::CorrectorConfig;
use crate::error::CorrectorError;
use crate::interpreter::Interpreter;
use std::fmt::Display;
use tally_domain::{LlmProvider, Transaction, TransactionList};
use tracing::{debug, info, warn};

/// Where the correction loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the next command
    AwaitingInput,
    /// A command is being interpreted by the model
    Interpreting,
    /// A validated replacement list is being installed
    Updating,
    /// The loop has ended; the list is final
    Done,
}

/// What one submitted command did
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The list was replaced
    Applied {
        /// Count before the edit
        before: usize,
        /// Count after the edit
        after: usize,
    },
    /// The edit was not applied; the list is unchanged
    Rejected(CorrectorError),
    /// Blank input, nothing happened
    Ignored,
    /// The session has ended
    Finished,
}

/// The mutable state of one correction session
///
/// Every transition goes through [`CorrectionSession::submit`] or
/// [`CorrectionSession::end`]; the current list is only ever swapped for a
/// fully validated replacement.
#[derive(Debug, Clone)]
pub struct CorrectionSession {
    current: TransactionList,
    last_command: Option<String>,
    state: SessionState,
    config: CorrectorConfig,
    edits_applied: usize,
    edits_rejected: usize,
}

impl CorrectionSession {
    /// Start a session over an initial list
    pub fn new(initial: TransactionList, config: CorrectorConfig) -> Self {
        Self {
            current: initial,
            last_command: None,
            state: SessionState::AwaitingInput,
            config,
            edits_applied: 0,
            edits_rejected: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current list
    pub fn current(&self) -> &[Transaction] {
        &self.current
    }

    /// Last command sent for interpretation
    pub fn last_command(&self) -> Option<&str> {
        self.last_command.as_deref()
    }

    /// Number of edits applied so far
    pub fn edits_applied(&self) -> usize {
        self.edits_applied
    }

    /// Number of edits rejected so far
    pub fn edits_rejected(&self) -> usize {
        self.edits_rejected
    }

    /// Whether the session has ended
    pub fn is_done(&self) -> bool {
        self.state == SessionState::Done
    }

    /// End the session without a sentinel (input closed)
    pub fn end(&mut self) {
        if !self.is_done() {
            debug!("Correction input closed");
            self.state = SessionState::Done;
        }
    }

    /// Handle one line of user input
    pub fn submit<L>(&mut self, command: &str, interpreter: &Interpreter<L>) -> StepOutcome
    where
        L: LlmProvider,
        L::Error: Display,
    {
        if self.is_done() {
            return StepOutcome::Finished;
        }

        if command.trim().is_empty() {
            return StepOutcome::Ignored;
        }

        if self.config.is_sentinel(command) {
            info!("Correction finished: {} transactions", self.current.len());
            self.state = SessionState::Done;
            return StepOutcome::Finished;
        }

        self.last_command = Some(command.trim().to_string());
        self.state = SessionState::Interpreting;

        let outcome = match interpreter.interpret(&self.current, command) {
            Ok(replacement) => {
                self.state = SessionState::Updating;
                let before = self.current.len();
                self.current = replacement;
                self.edits_applied += 1;
                info!("Edit applied: {} -> {} transactions", before, self.current.len());
                StepOutcome::Applied {
                    before,
                    after: self.current.len(),
                }
            }
            Err(e) => {
                warn!("Edit not applied: {}", e);
                self.edits_rejected += 1;
                StepOutcome::Rejected(e)
            }
        };

        self.state = SessionState::AwaitingInput;

        if let Some(max) = self.config.max_edits {
            if self.edits_applied + self.edits_rejected >= max {
                info!("Edit limit of {} reached", max);
                self.state = SessionState::Done;
            }
        }

        outcome
    }

    /// Consume the session, returning the final list
    pub fn into_transactions(self) -> TransactionList {
        self.current
    }
}
