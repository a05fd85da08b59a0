//! The seven personality traits and their per-guild values
//!
//! Traits are a closed set in a fixed order. That order is the order the
//! instruction compiler emits fragments in.

use serde::{Deserialize, Deserializer, Serialize};

use super::error::PersonalityError;

/// Lowest value a trait can hold
pub const TRAIT_MIN: u8 = 0;
/// Highest value a trait can hold
pub const TRAIT_MAX: u8 = 100;

/// A personality dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalityTrait {
    Humor,
    Honesty,
    Formality,
    Empathy,
    Strictness,
    Initiative,
    Transparency,
}

impl PersonalityTrait {
    /// Every trait, in compile order
    pub const ALL: [PersonalityTrait; 7] = [
        PersonalityTrait::Humor,
        PersonalityTrait::Honesty,
        PersonalityTrait::Formality,
        PersonalityTrait::Empathy,
        PersonalityTrait::Strictness,
        PersonalityTrait::Initiative,
        PersonalityTrait::Transparency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalityTrait::Humor => "humor",
            PersonalityTrait::Honesty => "honesty",
            PersonalityTrait::Formality => "formality",
            PersonalityTrait::Empathy => "empathy",
            PersonalityTrait::Strictness => "strictness",
            PersonalityTrait::Initiative => "initiative",
            PersonalityTrait::Transparency => "transparency",
        }
    }

    /// Value a fresh guild starts with
    pub fn default_value(&self) -> u8 {
        match self {
            PersonalityTrait::Humor => 65,
            PersonalityTrait::Honesty => 90,
            PersonalityTrait::Formality => 40,
            PersonalityTrait::Empathy => 75,
            PersonalityTrait::Strictness => 60,
            PersonalityTrait::Initiative => 80,
            PersonalityTrait::Transparency => 95,
        }
    }

    /// What a high value of this trait means
    pub fn description(&self) -> &'static str {
        match self {
            PersonalityTrait::Humor => "Playfulness and wit in replies",
            PersonalityTrait::Honesty => "Bluntness when delivering hard truths",
            PersonalityTrait::Formality => "Professional register over casual chat",
            PersonalityTrait::Empathy => "Attention to how people feel",
            PersonalityTrait::Strictness => "Firmness about server rules",
            PersonalityTrait::Initiative => "Willingness to volunteer next steps",
            PersonalityTrait::Transparency => "Openness about reasoning and uncertainty",
        }
    }
}

impl std::fmt::Display for PersonalityTrait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PersonalityTrait {
    type Err = PersonalityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "humor" => Ok(PersonalityTrait::Humor),
            "honesty" => Ok(PersonalityTrait::Honesty),
            "formality" => Ok(PersonalityTrait::Formality),
            "empathy" => Ok(PersonalityTrait::Empathy),
            "strictness" => Ok(PersonalityTrait::Strictness),
            "initiative" => Ok(PersonalityTrait::Initiative),
            "transparency" => Ok(PersonalityTrait::Transparency),
            _ => Err(PersonalityError::InvalidTrait(s.to_string())),
        }
    }
}

/// Clamp an arbitrary integer into the trait range
pub fn clamp_value(value: i64) -> u8 {
    value.clamp(TRAIT_MIN as i64, TRAIT_MAX as i64) as u8
}

fn deserialize_clamped<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(clamp_value(raw))
}

/// All seven trait values of one guild
///
/// Every key is always present. Missing keys in a stored document take the
/// trait's default, unknown keys are rejected and stored values are clamped.
/// Fields are private so every value goes through a clamping constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraitValues {
    #[serde(deserialize_with = "deserialize_clamped")]
    humor: u8,
    #[serde(deserialize_with = "deserialize_clamped")]
    honesty: u8,
    #[serde(deserialize_with = "deserialize_clamped")]
    formality: u8,
    #[serde(deserialize_with = "deserialize_clamped")]
    empathy: u8,
    #[serde(deserialize_with = "deserialize_clamped")]
    strictness: u8,
    #[serde(deserialize_with = "deserialize_clamped")]
    initiative: u8,
    #[serde(deserialize_with = "deserialize_clamped")]
    transparency: u8,
}

impl Default for TraitValues {
    fn default() -> Self {
        Self {
            humor: PersonalityTrait::Humor.default_value(),
            honesty: PersonalityTrait::Honesty.default_value(),
            formality: PersonalityTrait::Formality.default_value(),
            empathy: PersonalityTrait::Empathy.default_value(),
            strictness: PersonalityTrait::Strictness.default_value(),
            initiative: PersonalityTrait::Initiative.default_value(),
            transparency: PersonalityTrait::Transparency.default_value(),
        }
    }
}

impl TraitValues {
    /// Build from values in compile order: humor, honesty, formality, empathy,
    /// strictness, initiative, transparency. Values above the range are clamped.
    pub fn from_array(values: [u8; 7]) -> Self {
        let [humor, honesty, formality, empathy, strictness, initiative, transparency] =
            values.map(|v| v.min(TRAIT_MAX));
        Self {
            humor,
            honesty,
            formality,
            empathy,
            strictness,
            initiative,
            transparency,
        }
    }

    pub fn get(&self, trait_: PersonalityTrait) -> u8 {
        match trait_ {
            PersonalityTrait::Humor => self.humor,
            PersonalityTrait::Honesty => self.honesty,
            PersonalityTrait::Formality => self.formality,
            PersonalityTrait::Empathy => self.empathy,
            PersonalityTrait::Strictness => self.strictness,
            PersonalityTrait::Initiative => self.initiative,
            PersonalityTrait::Transparency => self.transparency,
        }
    }

    /// Set a trait, clamping into range. Returns the stored value.
    pub fn set(&mut self, trait_: PersonalityTrait, value: i64) -> u8 {
        let value = clamp_value(value);
        let slot = match trait_ {
            PersonalityTrait::Humor => &mut self.humor,
            PersonalityTrait::Honesty => &mut self.honesty,
            PersonalityTrait::Formality => &mut self.formality,
            PersonalityTrait::Empathy => &mut self.empathy,
            PersonalityTrait::Strictness => &mut self.strictness,
            PersonalityTrait::Initiative => &mut self.initiative,
            PersonalityTrait::Transparency => &mut self.transparency,
        };
        *slot = value;
        value
    }

    /// (trait, value) pairs in compile order
    pub fn iter(&self) -> impl Iterator<Item = (PersonalityTrait, u8)> + '_ {
        PersonalityTrait::ALL.iter().map(move |t| (*t, self.get(*t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_from_str() {
        assert_eq!("humor".parse::<PersonalityTrait>().unwrap(), PersonalityTrait::Humor);
        assert_eq!("EMPATHY".parse::<PersonalityTrait>().unwrap(), PersonalityTrait::Empathy);
        assert_eq!(" Transparency ".parse::<PersonalityTrait>().unwrap(), PersonalityTrait::Transparency);
    }

    #[test]
    fn test_trait_from_str_unknown() {
        let err = "sarcasm".parse::<PersonalityTrait>().unwrap_err();
        assert!(matches!(err, PersonalityError::InvalidTrait(ref name) if name == "sarcasm"));
    }

    #[test]
    fn test_trait_display() {
        assert_eq!(PersonalityTrait::Strictness.to_string(), "strictness");
        for t in PersonalityTrait::ALL {
            assert_eq!(t.to_string().parse::<PersonalityTrait>().unwrap(), t);
        }
    }

    #[test]
    fn test_clamp_value() {
        assert_eq!(clamp_value(150), 100);
        assert_eq!(clamp_value(-10), 0);
        assert_eq!(clamp_value(42), 42);
        assert_eq!(clamp_value(i64::MIN), 0);
    }

    #[test]
    fn test_default_values() {
        let values = TraitValues::default();
        assert_eq!(values, TraitValues::from_array([65, 90, 40, 75, 60, 80, 95]));
    }

    #[test]
    fn test_set_clamps() {
        let mut values = TraitValues::default();
        assert_eq!(values.set(PersonalityTrait::Humor, 150), 100);
        assert_eq!(values.set(PersonalityTrait::Honesty, -10), 0);
        assert_eq!(values.humor, 100);
        assert_eq!(values.honesty, 0);
    }

    #[test]
    fn test_from_array_clamps() {
        let values = TraitValues::from_array([200, 90, 40, 75, 60, 80, 255]);
        assert_eq!(values.get(PersonalityTrait::Humor), 100);
        assert_eq!(values.get(PersonalityTrait::Honesty), 90);
        assert_eq!(values.get(PersonalityTrait::Transparency), 100);
    }

    #[test]
    fn test_iter_order() {
        let order: Vec<PersonalityTrait> = TraitValues::default().iter().map(|(t, _)| t).collect();
        assert_eq!(order, PersonalityTrait::ALL.to_vec());
    }

    #[test]
    fn test_deserialize_clamps_and_fills_defaults() {
        let values: TraitValues = serde_json::from_str(r#"{"humor": 250, "empathy": -3}"#).unwrap();
        assert_eq!(values.humor, 100);
        assert_eq!(values.empathy, 0);
        assert_eq!(values.honesty, 90);
        assert_eq!(values.transparency, 95);
    }

    #[test]
    fn test_deserialize_rejects_unknown_key() {
        let result: Result<TraitValues, _> = serde_json::from_str(r#"{"humor": 50, "sarcasm": 10}"#);
        assert!(result.is_err());
    }
}
