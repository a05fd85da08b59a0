//! Per-guild trait storage
//!
//! A store only knows how to load and save whole profiles. The get/set/mode/
//! reset operations are built on top of those two primitives, so every
//! backend shares the same validation and clamping.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::{PersonalityError, Result};
use super::mode::Mode;
use super::profile::{GuildId, PersonalityProfile, parse_document, render_document};
use super::traits::PersonalityTrait;

/// Durable per-guild profile storage.
///
/// Precondition: at most one mutation per guild is in flight at a time. The
/// mutating methods take `&mut self`, which enforces this for a single store
/// handle. Separate handles over the same backing directory (in one process
/// or several) get last-writer-wins; callers that open more than one must
/// serialize mutations per guild themselves.
pub trait TraitStore {
    /// Stored profile, `Ok(None)` when the guild has nothing stored, or the
    /// error that kept a stored profile from being read
    fn load(&self, guild: GuildId) -> Result<Option<PersonalityProfile>>;

    /// Overwrite the guild's stored profile in full
    fn save(&mut self, guild: GuildId, profile: &PersonalityProfile) -> Result<()>;

    /// Guilds with a stored profile, sorted
    fn guilds(&self) -> Result<Vec<GuildId>>;

    /// Current profile, falling back to defaults when nothing readable is
    /// stored
    fn get(&self, guild: GuildId) -> PersonalityProfile {
        match self.load(guild) {
            Ok(Some(profile)) => profile,
            Ok(None) => PersonalityProfile::default(),
            Err(e) => {
                log::warn!("Using defaults for guild {}: {}", guild, e);
                PersonalityProfile::default()
            }
        }
    }

    /// Set one trait by name. The value is clamped into range.
    fn set(&mut self, guild: GuildId, trait_name: &str, value: i64) -> Result<PersonalityProfile> {
        let trait_: PersonalityTrait = trait_name.parse()?;
        self.set_trait(guild, trait_, value)
    }

    /// Set one already-parsed trait. The value is clamped into range.
    fn set_trait(&mut self, guild: GuildId, trait_: PersonalityTrait, value: i64) -> Result<PersonalityProfile> {
        let mut profile = self.get(guild);
        let stored = profile.set(trait_, value);
        if i64::from(stored) != value {
            log::info!("Clamped {} for guild {} from {} to {}", trait_, guild, value, stored);
        }
        self.save(guild, &profile)?;
        log::info!("Set {}={} for guild {}", trait_, stored, guild);
        Ok(profile)
    }

    /// Overwrite every trait with a named mode's preset
    fn set_mode(&mut self, guild: GuildId, mode_name: &str) -> Result<PersonalityProfile> {
        let mode: Mode = mode_name.parse()?;
        let mut profile = self.get(guild);
        profile.apply_mode(mode);
        self.save(guild, &profile)?;
        log::info!("Switched guild {} to mode {}", guild, mode);
        Ok(profile)
    }

    /// Restore defaults and clear the mode
    fn reset(&mut self, guild: GuildId) -> Result<PersonalityProfile> {
        let mut profile = self.get(guild);
        profile.reset();
        self.save(guild, &profile)?;
        log::info!("Reset personality for guild {}", guild);
        Ok(profile)
    }
}

/// One JSON document per guild in a directory
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Document path for a guild
    pub fn path_for(&self, guild: GuildId) -> PathBuf {
        self.dir.join(format!("{}.json", guild))
    }
}

impl TraitStore for FileStore {
    fn load(&self, guild: GuildId) -> Result<Option<PersonalityProfile>> {
        let path = self.path_for(guild);
        if !path.exists() {
            log::debug!("No profile for guild {} at {}", guild, path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|source| PersonalityError::Io {
            path: path.clone(),
            source,
        })?;
        let profile = parse_document(&content).map_err(|source| PersonalityError::Parse { path, source })?;
        Ok(Some(profile))
    }

    fn save(&mut self, guild: GuildId, profile: &PersonalityProfile) -> Result<()> {
        let path = self.path_for(guild);
        let io_err = |source: std::io::Error| PersonalityError::Io {
            path: path.clone(),
            source,
        };

        let content = render_document(profile)?;
        fs::create_dir_all(&self.dir).map_err(|source| PersonalityError::Io {
            path: self.dir.clone(),
            source,
        })?;

        // Whole-document overwrite: write a sibling temp file, then rename over
        // the old document.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(content.as_bytes()).map_err(io_err)?;
        tmp.write_all(b"\n").map_err(io_err)?;
        tmp.persist(&path).map_err(|e| io_err(e.error))?;

        log::debug!("Wrote profile for guild {} to {}", guild, path.display());
        Ok(())
    }

    fn guilds(&self) -> Result<Vec<GuildId>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|source| PersonalityError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut guilds: Vec<GuildId> = entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().map(|e| e == "json").unwrap_or(false) {
                    // only `<id>.json` exactly as `path_for` names it
                    let stem = path.file_stem()?.to_str()?;
                    let guild: GuildId = stem.parse().ok()?;
                    (guild.to_string() == stem).then_some(guild)
                } else {
                    None
                }
            })
            .collect();
        guilds.sort();
        Ok(guilds)
    }
}

/// In-memory store for tests and embedding
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    profiles: HashMap<GuildId, PersonalityProfile>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TraitStore for MemoryStore {
    fn load(&self, guild: GuildId) -> Result<Option<PersonalityProfile>> {
        Ok(self.profiles.get(&guild).cloned())
    }

    fn save(&mut self, guild: GuildId, profile: &PersonalityProfile) -> Result<()> {
        self.profiles.insert(guild, profile.clone());
        Ok(())
    }

    fn guilds(&self) -> Result<Vec<GuildId>> {
        let mut guilds: Vec<GuildId> = self.profiles.keys().copied().collect();
        guilds.sort();
        Ok(guilds)
    }
}
