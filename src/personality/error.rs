//! Personality layer errors

use std::path::PathBuf;

use thiserror::Error;

use super::traits::PersonalityTrait;

/// Errors raised by the trait store, band table and guild id parsing.
#[derive(Debug, Error)]
pub enum PersonalityError {
    /// Trait name outside the fixed set.
    #[error("Unknown trait '{0}' (expected one of: humor, honesty, formality, empathy, strictness, initiative, transparency)")]
    InvalidTrait(String),

    /// Mode name outside the fixed enumeration.
    #[error(
        "Unknown mode '{0}' (expected one of: security, social, developer, mission_control, adaptive, companion, analytical)"
    )]
    InvalidMode(String),

    /// Guild identifier that is not a snowflake.
    #[error("Invalid guild id '{0}' (expected a numeric id)")]
    InvalidGuild(String),

    /// Band table entry that is out of range or overlaps another band.
    #[error("Invalid band for {trait_}: {reason}")]
    InvalidBand { trait_: PersonalityTrait, reason: String },

    /// Profile document could not be written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored profile document is not valid in either layout.
    #[error("Malformed profile document {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Profile could not be serialized.
    #[error("Failed to serialize profile: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PersonalityError>;
