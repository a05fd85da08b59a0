//! Named personality presets

use serde::{Deserialize, Serialize};

use super::error::PersonalityError;
use super::traits::TraitValues;

/// A preset bundle of trait values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Security,
    Social,
    Developer,
    MissionControl,
    Adaptive,
    Companion,
    Analytical,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Security,
        Mode::Social,
        Mode::Developer,
        Mode::MissionControl,
        Mode::Adaptive,
        Mode::Companion,
        Mode::Analytical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Security => "security",
            Mode::Social => "social",
            Mode::Developer => "developer",
            Mode::MissionControl => "mission_control",
            Mode::Adaptive => "adaptive",
            Mode::Companion => "companion",
            Mode::Analytical => "analytical",
        }
    }

    /// Trait values this mode overwrites a profile with
    pub fn preset(&self) -> TraitValues {
        //                                humor honesty formality empathy strictness initiative transparency
        match self {
            Mode::Security => TraitValues::from_array([20, 95, 75, 40, 90, 70, 85]),
            Mode::Social => TraitValues::from_array([85, 70, 20, 85, 30, 60, 60]),
            Mode::Developer => TraitValues::from_array([45, 90, 50, 50, 65, 85, 95]),
            Mode::MissionControl => TraitValues::from_array([15, 95, 85, 45, 85, 90, 90]),
            Mode::Adaptive => TraitValues::default(),
            Mode::Companion => TraitValues::from_array([70, 75, 15, 95, 20, 55, 70]),
            Mode::Analytical => TraitValues::from_array([25, 95, 70, 40, 70, 60, 100]),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Mode::Security => "Serious and rule-focused, for moderation and incident channels",
            Mode::Social => "Relaxed and warm, for community chat",
            Mode::Developer => "Direct technical help that shows its work",
            Mode::MissionControl => "Terse, formal status reporting",
            Mode::Adaptive => "The balanced default profile",
            Mode::Companion => "Casual and supportive one-on-one conversation",
            Mode::Analytical => "Evidence first, reasoning always shown",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = PersonalityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "security" => Ok(Mode::Security),
            "social" => Ok(Mode::Social),
            "developer" => Ok(Mode::Developer),
            "mission_control" => Ok(Mode::MissionControl),
            "adaptive" => Ok(Mode::Adaptive),
            "companion" => Ok(Mode::Companion),
            "analytical" => Ok(Mode::Analytical),
            _ => Err(PersonalityError::InvalidMode(s.to_string())),
        }
    }
}
