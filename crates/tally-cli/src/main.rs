//! Tally CLI - Extract and correct transactions from statement text.

use clap::Parser;
use tally_cli::commands;
use tally_cli::provider::build_provider;
use tally_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> tally_cli::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;

    config.apply_overrides(
        cli.provider.map(Into::into),
        cli.model,
        cli.endpoint,
        |key| std::env::var(key).ok(),
    );

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Show(args) => commands::execute_show(args, &formatter),
        Command::Export(args) => commands::execute_export(args, &formatter),
        Command::Extract(args) => {
            let provider = build_provider(&config.provider, api_key(&config))?;
            commands::execute_extract(args, &config, provider, &formatter)
        }
        Command::Review(args) => {
            let provider = build_provider(&config.provider, api_key(&config))?;
            commands::execute_review(args, &config, provider, &formatter)
        }
    }
}

fn api_key(config: &Config) -> Option<String> {
    std::env::var(&config.provider.api_key_env)
        .ok()
        .filter(|key| !key.trim().is_empty())
}
