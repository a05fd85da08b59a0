use clap::{CommandFactory, Parser};
use eyre::{Context, Result};
use log::info;
use std::fs;

use guildtone::config::{Config, LogLevel};
use guildtone::help::{CommandTreeHelp, HelpProvider, HelpSystem};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn setup_logging(log_level: &LogLevel) -> Result<()> {
    let log_dir = Config::data_dir().join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("guildtone.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG env var takes precedence, otherwise use config log_level
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(log_level.to_level_filter());
    }

    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    info!(
        "Log level: {} (from {})",
        log_level.as_filter(),
        if std::env::var("RUST_LOG").is_ok() { "RUST_LOG env" } else { "config" }
    );
    Ok(())
}

/// Resolve the help providers once, at startup
fn build_help(config: &Config) -> HelpSystem {
    let rich: Option<Box<dyn HelpProvider>> = if config.help.rich {
        Some(Box::new(CommandTreeHelp::new(Cli::command())))
    } else {
        None
    };
    let help = HelpSystem::new(rich);
    info!("Help provider: {}", help.rich_provider().unwrap_or("static only"));
    help
}

fn run(cli: Cli, config: Config, help: HelpSystem) -> Result<()> {
    match cli.command {
        Commands::Personality { action } => commands::personality::run(action, &config),
        Commands::Help { topic, format } => {
            commands::help::run(&topic, cli::OutputFormat::resolve(format), cli.verbose, &help)
        }
        Commands::Config { action } => commands::config::run(action, &config),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration (before logging, so log messages in Config::load are silent)
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(&config.log_level).context("Failed to setup logging")?;

    info!("Starting guildtone with config from: {:?}", cli.config);

    let help = build_help(&config);

    run(cli, config, help).context("Command failed")?;

    Ok(())
}
