use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::personality::{BandOverrides, BandTable, InstructionCompiler};

/// Name of the config file looked up in each candidate directory
pub const CONFIG_FILE: &str = "guildtone.yaml";

/// Main guildtone configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    pub paths: PathsConfig,
    pub help: HelpConfig,
    pub personality: PersonalityConfig,
}

/// Log verbosity, overridden by `RUST_LOG` when set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding one profile document per guild
    pub guilds: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HelpConfig {
    /// Inject the command-tree help provider at startup
    pub rich: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PersonalityConfig {
    /// Replacement band lists, keyed by trait name
    pub bands: BandOverrides,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            guilds: Config::data_dir().join("guilds"),
        }
    }
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self { rich: true }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        if let Ok(env_path) = std::env::var("GUILDTONE_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from GUILDTONE_CONFIG: {}", e);
                    }
                }
            }
        }

        if let Ok(dir) = std::env::var("GUILDTONE_DIR") {
            let path = PathBuf::from(dir).join(CONFIG_FILE);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from GUILDTONE_DIR: {}", e);
                    }
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("guildtone").join(CONFIG_FILE);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // ./guildtone.yaml (for development)
        let local_config = PathBuf::from(CONFIG_FILE);
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Data directory (guild documents, logs). `GUILDTONE_DIR` wins over the
    /// platform data dir.
    pub fn data_dir() -> PathBuf {
        std::env::var("GUILDTONE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("guildtone"))
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }

    /// Expanded guild document directory
    pub fn guilds_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.guilds)
    }

    /// Instruction compiler over the default bands plus any overrides
    pub fn compiler(&self) -> Result<InstructionCompiler> {
        let table =
            BandTable::with_overrides(&self.personality.bands).context("Invalid personality.bands in config")?;
        Ok(InstructionCompiler::new(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personality::{PersonalityProfile, PersonalityTrait};
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.help.rich);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.personality.bands.is_empty());
        assert!(config.paths.guilds.ends_with("guilds"));
    }

    #[test]
    fn test_expand_path_no_expansion() {
        let path = PathBuf::from("/var/lib/guildtone");
        assert_eq!(Config::expand_path(&path), PathBuf::from("/var/lib/guildtone"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/guilds");
        let expanded = Config::expand_path(&path);
        assert!(!expanded.to_string_lossy().contains('~'));
        assert!(expanded.to_string_lossy().ends_with("guilds"));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
log_level: debug
paths:
  guilds: /srv/bot/guilds
help:
  rich: false
personality:
  bands:
    formality:
      - { min: 35, max: 45, text: "Keep a neutral register" }
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.guilds_dir(), PathBuf::from("/srv/bot/guilds"));
        assert!(!config.help.rich);

        let directive = config.compiler().unwrap().compile(&PersonalityProfile::default());
        assert!(directive.body().contains("Keep a neutral register"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "log_level: warn\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(config.help.rich);
    }

    #[test]
    fn test_invalid_band_config_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
personality:
  bands:
    humor:
      - { min: 50, max: 100, text: "funny" }
      - { min: 0, max: 60, text: "serious" }
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(config.compiler().is_err());
    }

    #[test]
    fn test_unknown_trait_in_bands_fails_to_parse() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "personality:\n  bands:\n    sarcasm: []\n").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(Config::load(Some(&temp.path().join("missing.yaml"))).is_err());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = Config::default();
        config.personality.bands.insert(
            PersonalityTrait::Humor,
            vec![crate::personality::Band::new(80, 100, "Joke around")],
        );
        let yaml_str = serde_yaml::to_string(&config).expect("Failed to serialize");
        let parsed: Config = serde_yaml::from_str(&yaml_str).expect("Failed to deserialize");
        assert_eq!(parsed.help.rich, config.help.rich);
        assert_eq!(parsed.personality.bands, config.personality.bands);
    }
}
