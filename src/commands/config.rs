use colored::*;
use eyre::Result;

use guildtone::config::Config;
use guildtone::personality::PersonalityTrait;

use crate::cli::{ConfigAction, OutputFormat};

pub fn run(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), config),
        ConfigAction::Get { key } => get(&key, config),
        ConfigAction::Path => path(config),
    }
}

fn show(format: OutputFormat, config: &Config) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(config)?);
        }
        OutputFormat::Text => {
            println!("{}", "guildtone Configuration".bold());
            println!();

            println!("{}: {}", "log_level".cyan(), config.log_level.as_filter());
            println!();

            println!("{}:", "paths".cyan());
            println!("  guilds: {}", config.guilds_dir().display());
            println!();

            println!("{}:", "help".cyan());
            println!("  rich: {}", config.help.rich);
            println!();

            println!("{}:", "personality".cyan());
            if config.personality.bands.is_empty() {
                println!("  bands: {}", "(defaults)".dimmed());
            } else {
                println!("  bands:");
                for (trait_, bands) in &config.personality.bands {
                    println!("    {}:", trait_);
                    for band in bands {
                        println!("      {:>6}  {}", band.label(), band.text);
                    }
                }
            }
        }
    }

    Ok(())
}

fn lookup(key: &str, config: &Config) -> Option<String> {
    match key {
        "log_level" | "log-level" => Some(config.log_level.as_filter().to_string()),
        "paths.guilds" => Some(config.guilds_dir().display().to_string()),
        "help.rich" => Some(config.help.rich.to_string()),
        _ => key
            .strip_prefix("personality.bands.")
            .and_then(|name| name.parse::<PersonalityTrait>().ok())
            .and_then(|trait_| config.personality.bands.get(&trait_))
            .and_then(|bands| serde_json::to_string(bands).ok()),
    }
}

fn get(key: &str, config: &Config) -> Result<()> {
    match lookup(key, config) {
        Some(v) => println!("{}", v),
        None => eyre::bail!("Unknown config key: {}", key),
    }

    Ok(())
}

fn path(config: &Config) -> Result<()> {
    let data_dir = Config::data_dir();
    println!("{} {}", "data:".bold(), data_dir.display());
    println!("{} {}", "guilds:".bold(), config.guilds_dir().display());
    println!("{} {}", "logs:".bold(), data_dir.join("logs").join("guildtone.log").display());
    Ok(())
}
