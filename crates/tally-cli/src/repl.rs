//! Interactive correction prompt.

use crate::config::tally_dir;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tally_corrector::{CommandSurface, CorrectorError};
use tally_domain::Transaction;

/// Prompt shown before each correction command.
pub const PROMPT: &str = "Enter your changes (or 'ok' to finish): ";

/// A rustyline-backed command surface.
///
/// Prints the current list before every prompt. Ctrl-C abandons the line
/// being typed; Ctrl-D closes input and ends the loop.
pub struct TerminalSurface<'a> {
    editor: DefaultEditor,
    formatter: &'a Formatter,
    history_path: Option<PathBuf>,
}

impl<'a> TerminalSurface<'a> {
    /// Create a terminal surface with persistent history.
    pub fn new(formatter: &'a Formatter, history_size: usize) -> Result<Self> {
        let config = rustyline::Config::builder()
            .max_history_size(history_size)
            .map_err(|e| CliError::Terminal(e.to_string()))?
            .auto_add_history(false)
            .build();

        let mut editor = DefaultEditor::with_config(config)
            .map_err(|e| CliError::Terminal(format!("Failed to initialize editor: {}", e)))?;

        let history_path = history_path().ok();
        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        Ok(Self {
            editor,
            formatter,
            history_path,
        })
    }

    /// Save history and release the terminal.
    pub fn close(mut self) {
        if let Some(path) = &self.history_path {
            self.editor.save_history(path).ok();
        }
    }
}

impl CommandSurface for TerminalSurface<'_> {
    fn read_command(&mut self, current: &[Transaction]) -> Option<String> {
        println!();
        println!("{}", self.formatter.format_transactions_table(current));

        match self.editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.trim()).ok();
                }
                Some(line)
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", self.formatter.info("Type 'ok' to finish"));
                Some(String::new())
            }
            Err(ReadlineError::Eof) => None,
            Err(err) => {
                eprintln!("{}", self.formatter.error(&format!("Error: {}", err)));
                None
            }
        }
    }

    fn edit_applied(&mut self, updated: &[Transaction]) {
        println!(
            "{}",
            self.formatter
                .success(&format!("Edit applied ({} transactions)", updated.len()))
        );
    }

    fn edit_rejected(&mut self, _command: &str, error: &CorrectorError) {
        eprintln!(
            "{}",
            self.formatter
                .warning(&format!("Edit not applied: {}. The list is unchanged.", error))
        );
    }
}

fn history_path() -> Result<PathBuf> {
    let dir = tally_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}
