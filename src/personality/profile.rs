//! Per-guild personality profile and its stored document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::PersonalityError;
use super::mode::Mode;
use super::traits::{PersonalityTrait, TraitValues};

/// Guild (server) identifier, a platform snowflake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuildId(pub u64);

impl std::fmt::Display for GuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for GuildId {
    type Err = PersonalityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(GuildId)
            .map_err(|_| PersonalityError::InvalidGuild(s.to_string()))
    }
}

/// Personality configuration of one guild
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonalityProfile {
    pub traits: TraitValues,

    /// Last preset applied. Independent of later single-trait changes.
    #[serde(default)]
    pub mode: Option<Mode>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PersonalityProfile {
    pub fn get(&self, trait_: PersonalityTrait) -> u8 {
        self.traits.get(trait_)
    }

    /// Overwrite one trait, leaving the mode alone
    pub fn set(&mut self, trait_: PersonalityTrait, value: i64) -> u8 {
        self.touch();
        self.traits.set(trait_, value)
    }

    /// Overwrite every trait with the mode's preset
    pub fn apply_mode(&mut self, mode: Mode) {
        self.traits = mode.preset();
        self.mode = Some(mode);
        self.touch();
    }

    /// Restore default traits and clear the mode
    pub fn reset(&mut self) {
        self.traits = TraitValues::default();
        self.mode = None;
        self.touch();
    }

    /// True when every trait is at its default and no mode is selected
    pub fn is_default(&self) -> bool {
        self.traits == TraitValues::default() && self.mode.is_none()
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

/// Flat document written by earlier bot versions:
/// `{"humor":65, ..., "transparency":95, "mode":null}`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FlatDocument {
    #[serde(default)]
    humor: Option<i64>,
    #[serde(default)]
    honesty: Option<i64>,
    #[serde(default)]
    formality: Option<i64>,
    #[serde(default)]
    empathy: Option<i64>,
    #[serde(default)]
    strictness: Option<i64>,
    #[serde(default)]
    initiative: Option<i64>,
    #[serde(default)]
    transparency: Option<i64>,
    #[serde(default)]
    mode: Option<Mode>,
}

/// Either document layout found on disk
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredDocument {
    Current(PersonalityProfile),
    Flat(FlatDocument),
}

impl From<FlatDocument> for PersonalityProfile {
    fn from(doc: FlatDocument) -> Self {
        let mut traits = TraitValues::default();
        let pairs = [
            (PersonalityTrait::Humor, doc.humor),
            (PersonalityTrait::Honesty, doc.honesty),
            (PersonalityTrait::Formality, doc.formality),
            (PersonalityTrait::Empathy, doc.empathy),
            (PersonalityTrait::Strictness, doc.strictness),
            (PersonalityTrait::Initiative, doc.initiative),
            (PersonalityTrait::Transparency, doc.transparency),
        ];
        for (trait_, value) in pairs {
            if let Some(value) = value {
                traits.set(trait_, value);
            }
        }
        Self {
            traits,
            mode: doc.mode,
            updated_at: None,
        }
    }
}

/// Parse a stored profile document in either layout
pub fn parse_document(content: &str) -> Result<PersonalityProfile, serde_json::Error> {
    let doc: StoredDocument = serde_json::from_str(content)?;
    Ok(match doc {
        StoredDocument::Current(profile) => profile,
        StoredDocument::Flat(flat) => flat.into(),
    })
}

/// Render a profile as the document written to storage
pub fn render_document(profile: &PersonalityProfile) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guild_id_parse() {
        assert_eq!("123456789012345678".parse::<GuildId>().unwrap(), GuildId(123456789012345678));
        assert!(matches!("general".parse::<GuildId>(), Err(PersonalityError::InvalidGuild(_))));
        assert!("-5".parse::<GuildId>().is_err());
    }

    #[test]
    fn test_default_profile() {
        let profile = PersonalityProfile::default();
        assert!(profile.is_default());
        assert_eq!(profile.get(PersonalityTrait::Honesty), 90);
        assert!(profile.updated_at.is_none());
    }

    #[test]
    fn test_set_keeps_mode() {
        let mut profile = PersonalityProfile::default();
        profile.apply_mode(Mode::Social);
        profile.set(PersonalityTrait::Humor, 10);
        assert_eq!(profile.mode, Some(Mode::Social));
        assert_eq!(profile.get(PersonalityTrait::Humor), 10);
        assert!(profile.updated_at.is_some());
    }

    #[test]
    fn test_reset_clears_mode() {
        let mut profile = PersonalityProfile::default();
        profile.apply_mode(Mode::Security);
        profile.reset();
        assert_eq!(profile.traits, TraitValues::default());
        assert_eq!(profile.mode, None);
    }

    #[test]
    fn test_document_roundtrip() {
        let mut profile = PersonalityProfile::default();
        profile.apply_mode(Mode::MissionControl);
        profile.set(PersonalityTrait::Empathy, 33);

        let doc = render_document(&profile).unwrap();
        assert!(doc.contains("\"mission_control\""));
        assert_eq!(parse_document(&doc).unwrap(), profile);
    }

    #[test]
    fn test_parse_flat_document() {
        let doc = r#"{"humor":65,"honesty":90,"formality":40,"empathy":75,"strictness":60,"initiative":80,"transparency":95,"mode":null}"#;
        let profile = parse_document(doc).unwrap();
        assert_eq!(profile.traits, TraitValues::default());
        assert_eq!(profile.mode, None);
    }

    #[test]
    fn test_parse_flat_document_clamps_and_keeps_mode() {
        let doc = r#"{"humor":500,"strictness":-1,"mode":"security"}"#;
        let profile = parse_document(doc).unwrap();
        assert_eq!(profile.get(PersonalityTrait::Humor), 100);
        assert_eq!(profile.get(PersonalityTrait::Strictness), 0);
        assert_eq!(profile.get(PersonalityTrait::Honesty), 90);
        assert_eq!(profile.mode, Some(Mode::Security));
    }

    #[test]
    fn test_parse_rejects_unknown_trait() {
        assert!(parse_document(r#"{"traits":{"sarcasm":50},"mode":null}"#).is_err());
        assert!(parse_document(r#"{"sarcasm":50}"#).is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_document("not json").is_err());
        assert!(parse_document(r#"{"mode":"chaos"}"#).is_err());
    }
}
