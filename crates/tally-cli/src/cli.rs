//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tally - Extract and correct transactions from statement text.
#[derive(Debug, Parser)]
#[command(name = "tally")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// LLM provider
    #[arg(long, value_enum, global = true)]
    pub provider: Option<ProviderArg>,

    /// Model name
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Provider endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// Provider options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProviderArg {
    /// OpenRouter chat completions API
    Openrouter,
    /// Local Ollama server
    Ollama,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract transactions from statement text, then review them
    Extract(ExtractArgs),

    /// Review and correct an existing transaction file
    Review(ReviewArgs),

    /// Export a transaction file to CSV
    Export(ExportArgs),

    /// Print a transaction file
    Show(ShowArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Statement text file (OCR output)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Where to write the JSON transaction file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Also export the final list as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Skip the interactive correction step
    #[arg(long)]
    pub no_review: bool,

    /// Read correction commands from a file instead of the terminal
    #[arg(long, conflicts_with = "no_review")]
    pub script: Option<PathBuf>,
}

/// Arguments for the review command.
#[derive(Debug, Parser)]
pub struct ReviewArgs {
    /// JSON transaction file, updated in place
    #[arg(long)]
    pub file: PathBuf,

    /// Also export the final list as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Read correction commands from a file instead of the terminal
    #[arg(long)]
    pub script: Option<PathBuf>,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// JSON transaction file
    #[arg(long)]
    pub file: PathBuf,

    /// Destination CSV file
    #[arg(long)]
    pub csv: PathBuf,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// JSON transaction file
    #[arg(long)]
    pub file: PathBuf,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<ProviderArg> for crate::config::ProviderKind {
    fn from(provider: ProviderArg) -> Self {
        match provider {
            ProviderArg::Openrouter => crate::config::ProviderKind::OpenRouter,
            ProviderArg::Ollama => crate::config::ProviderKind::Ollama,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;

    #[test]
    fn test_extract_command() {
        let cli = Cli::parse_from([
            "tally",
            "extract",
            "--input",
            "statement.txt",
            "--output",
            "out.json",
            "--csv",
            "out.csv",
        ]);
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.input, PathBuf::from("statement.txt"));
                assert_eq!(args.output, PathBuf::from("out.json"));
                assert_eq!(args.csv, Some(PathBuf::from("out.csv")));
                assert!(!args.no_review);
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "tally",
            "show",
            "--file",
            "t.json",
            "--format",
            "json",
            "--provider",
            "ollama",
            "--no-color",
        ]);
        assert_eq!(cli.format, Some(CliFormat::Json));
        assert_eq!(cli.provider, Some(ProviderArg::Ollama));
        assert!(cli.no_color);
        assert!(matches!(cli.command, Command::Show(_)));
    }

    #[test]
    fn test_export_requires_csv() {
        let result = Cli::try_parse_from(["tally", "export", "--file", "t.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_script_conflicts_with_no_review() {
        let result = Cli::try_parse_from([
            "tally",
            "extract",
            "-i",
            "s.txt",
            "-o",
            "o.json",
            "--no-review",
            "--script",
            "cmds.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_provider_conversion() {
        let kind: ProviderKind = ProviderArg::Openrouter.into();
        assert_eq!(kind, ProviderKind::OpenRouter);
    }
}
