use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

use guildtone::personality::{GuildId, PromptVariant};

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "guildtone",
    about = "Per-guild personality tuning for the bot's AI replies",
    version,
    disable_help_subcommand = true,
    after_help = "Run `guildtone config path` to see where profiles and logs are written"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to guildtone.yaml config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and tune a guild's personality
    Personality {
        #[command(subcommand)]
        action: PersonalityAction,
    },

    /// Show help for a command
    Help {
        /// Command path, e.g. `personality set`
        topic: Vec<String>,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum PersonalityAction {
    /// Show a guild's traits, mode and compiled directive
    View {
        /// Guild id
        guild: GuildId,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Set one trait (clamped to 0-100)
    Set {
        /// Guild id
        guild: GuildId,

        /// Trait name (humor, honesty, formality, empathy, strictness, initiative, transparency)
        #[arg(value_name = "TRAIT")]
        trait_name: String,

        /// New value
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Apply a mode preset to every trait
    Mode {
        /// Guild id
        guild: GuildId,

        /// Mode name (security, social, developer, mission_control, adaptive, companion, analytical)
        mode: String,
    },

    /// Restore the default profile
    Reset {
        /// Guild id
        guild: GuildId,
    },

    /// Preview the prompt the AI provider would receive
    Simulate {
        /// Guild id
        guild: GuildId,

        /// Message to answer
        message: String,

        /// Only show one prompt variant
        #[arg(long, value_enum)]
        variant: Option<PromptVariant>,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// List traits, defaults and instruction bands
    Traits {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// List modes and their presets
    Modes {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// List guilds with a stored profile
    List {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Get a configuration value
    Get {
        /// Configuration key (dot notation)
        key: String,
    },

    /// Show the data, guild and log locations
    Path,
}
