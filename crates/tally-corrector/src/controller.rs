//! The correction loop and its command surface

use crate::config::CorrectorConfig;
use crate::error::CorrectorError;
use crate::interpreter::Interpreter;
use crate::session::{CorrectionSession, StepOutcome};
use std::collections::VecDeque;
use std::fmt::Display;
use tally_domain::{LlmProvider, Transaction, TransactionList};
use tracing::info;

/// Where correction commands come from and where their results go
///
/// The interactive terminal is one implementation; [`ScriptedSurface`]
/// replays a fixed list of commands.
pub trait CommandSurface {
    /// Next command, or `None` once input is closed
    fn read_command(&mut self, current: &[Transaction]) -> Option<String>;

    /// An edit was applied and `updated` is the new list
    fn edit_applied(&mut self, _updated: &[Transaction]) {}

    /// An edit was not applied; the list is unchanged
    fn edit_rejected(&mut self, _command: &str, _error: &CorrectorError) {}
}

/// Outcome of a finished correction loop
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionSummary {
    /// The final list
    pub transactions: TransactionList,
    /// Edits that replaced the list
    pub edits_applied: usize,
    /// Edits that left the list unchanged
    pub edits_rejected: usize,
}

/// Drives a [`CorrectionSession`] from a [`CommandSurface`]
pub struct CorrectionLoop<L>
where
    L: LlmProvider,
{
    interpreter: Interpreter<L>,
    config: CorrectorConfig,
}

impl<L> CorrectionLoop<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new correction loop
    pub fn new(llm_provider: L, config: CorrectorConfig) -> Self {
        Self {
            interpreter: Interpreter::new(llm_provider),
            config,
        }
    }

    /// Run until the sentinel, the edit limit, or end of input
    ///
    /// Failed interpretations are reported to the surface and the loop
    /// keeps going with the list unchanged.
    pub fn run<S>(&self, initial: TransactionList, surface: &mut S) -> CorrectionSummary
    where
        S: CommandSurface + ?Sized,
    {
        info!("Starting correction with {} transactions", initial.len());
        let mut session = CorrectionSession::new(initial, self.config.clone());

        while !session.is_done() {
            let Some(command) = surface.read_command(session.current()) else {
                session.end();
                break;
            };

            match session.submit(&command, &self.interpreter) {
                StepOutcome::Applied { .. } => surface.edit_applied(session.current()),
                StepOutcome::Rejected(e) => surface.edit_rejected(command.trim(), &e),
                StepOutcome::Ignored | StepOutcome::Finished => {}
            }
        }

        CorrectionSummary {
            edits_applied: session.edits_applied(),
            edits_rejected: session.edits_rejected(),
            transactions: session.into_transactions(),
        }
    }
}

/// A command surface that replays a fixed list of commands
///
/// Input closes when the list runs out. Rejections are recorded for
/// inspection.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSurface {
    commands: VecDeque<String>,
    rejections: Vec<(String, CorrectorError)>,
}

impl ScriptedSurface {
    /// Create a surface from commands in order
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
            rejections: Vec::new(),
        }
    }

    /// Create a surface from newline-separated commands
    pub fn from_lines(script: &str) -> Self {
        Self::new(script.lines())
    }

    /// Commands not yet consumed
    pub fn remaining(&self) -> usize {
        self.commands.len()
    }

    /// Rejected commands with their errors
    pub fn rejections(&self) -> &[(String, CorrectorError)] {
        &self.rejections
    }
}

impl CommandSurface for ScriptedSurface {
    fn read_command(&mut self, _current: &[Transaction]) -> Option<String> {
        self.commands.pop_front()
    }

    fn edit_rejected(&mut self, command: &str, error: &CorrectorError) {
        self.rejections.push((command.to_string(), error.clone()));
    }
}
