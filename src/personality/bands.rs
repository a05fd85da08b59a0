//! Threshold bands: which instruction a trait value selects
//!
//! Each trait owns an ordered list of inclusive `(min, max, text)` bands.
//! Bands never overlap, so a value selects at most one fragment. Values that
//! fall between bands select nothing and the trait is left out of the
//! directive.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::{PersonalityError, Result};
use super::traits::{PersonalityTrait, TRAIT_MAX};

/// One inclusive value range and the instruction it selects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Band {
    pub min: u8,
    pub max: u8,
    pub text: String,
}

impl Band {
    pub fn new(min: u8, max: u8, text: &str) -> Self {
        Self {
            min,
            max,
            text: text.to_string(),
        }
    }

    pub fn contains(&self, value: u8) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Short label used when listing bands, e.g. `>75` or `<30`
    pub fn label(&self) -> String {
        if self.max == TRAIT_MAX && self.min > 0 {
            format!(">{}", self.min - 1)
        } else if self.min == 0 && self.max < TRAIT_MAX {
            format!("<{}", self.max + 1)
        } else {
            format!("{}-{}", self.min, self.max)
        }
    }
}

/// Per-trait band overrides as read from the config file
pub type BandOverrides = BTreeMap<PersonalityTrait, Vec<Band>>;

static DEFAULT_BANDS: Lazy<BTreeMap<PersonalityTrait, Vec<Band>>> = Lazy::new(|| {
    BTreeMap::from([
        (
            PersonalityTrait::Humor,
            vec![
                Band::new(76, 100, "Use playful humor and light wit where it fits"),
                Band::new(0, 29, "Keep replies serious and avoid jokes"),
            ],
        ),
        (
            PersonalityTrait::Honesty,
            vec![
                Band::new(71, 100, "Be blunt and direct and never sugarcoat hard truths"),
                Band::new(0, 29, "Deliver difficult truths gently and with tact"),
            ],
        ),
        (
            PersonalityTrait::Formality,
            vec![
                Band::new(71, 100, "Use formal, professional language"),
                Band::new(0, 29, "Use casual, conversational language"),
            ],
        ),
        (
            PersonalityTrait::Empathy,
            vec![
                Band::new(71, 100, "Acknowledge feelings and respond with warmth"),
                Band::new(0, 29, "Stay matter-of-fact and emotionally neutral"),
            ],
        ),
        (
            PersonalityTrait::Strictness,
            vec![
                Band::new(71, 100, "Enforce server rules firmly and call out violations"),
                Band::new(0, 29, "Be lenient and give people the benefit of the doubt"),
            ],
        ),
        (
            PersonalityTrait::Initiative,
            vec![
                Band::new(71, 100, "Proactively suggest next steps and improvements"),
                Band::new(0, 29, "Answer only what was asked"),
            ],
        ),
        (
            PersonalityTrait::Transparency,
            vec![
                Band::new(71, 100, "Explain your reasoning and state uncertainty openly"),
                Band::new(0, 29, "Give conclusions without walking through your reasoning"),
            ],
        ),
    ])
});

/// Validated band lists for every trait
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandTable {
    bands: BTreeMap<PersonalityTrait, Vec<Band>>,
}

impl Default for BandTable {
    fn default() -> Self {
        Self {
            bands: DEFAULT_BANDS.clone(),
        }
    }
}

impl BandTable {
    /// Build a table from explicit band lists. Traits without an entry get no
    /// fragments at all.
    pub fn new(bands: BTreeMap<PersonalityTrait, Vec<Band>>) -> Result<Self> {
        for (trait_, list) in &bands {
            validate(*trait_, list)?;
        }
        Ok(Self { bands })
    }

    /// Default table with the given traits' band lists replaced
    pub fn with_overrides(overrides: &BandOverrides) -> Result<Self> {
        let mut bands = DEFAULT_BANDS.clone();
        for (trait_, list) in overrides {
            log::debug!("Overriding {} bands for {}", list.len(), trait_);
            bands.insert(*trait_, list.clone());
        }
        Self::new(bands)
    }

    /// Bands of one trait, in table order
    pub fn bands(&self, trait_: PersonalityTrait) -> &[Band] {
        self.bands.get(&trait_).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The band a value falls in, if any
    pub fn select(&self, trait_: PersonalityTrait, value: u8) -> Option<&Band> {
        self.bands(trait_).iter().find(|band| band.contains(value))
    }
}

fn validate(trait_: PersonalityTrait, bands: &[Band]) -> Result<()> {
    let invalid = |reason: String| PersonalityError::InvalidBand { trait_, reason };

    for band in bands {
        if band.min > band.max {
            return Err(invalid(format!("min {} is above max {}", band.min, band.max)));
        }
        if band.max > TRAIT_MAX {
            return Err(invalid(format!("max {} is above {}", band.max, TRAIT_MAX)));
        }
        if band.text.trim().is_empty() {
            return Err(invalid(format!("band {}-{} has no text", band.min, band.max)));
        }
    }

    let mut sorted: Vec<&Band> = bands.iter().collect();
    sorted.sort_by_key(|band| band.min);
    for pair in sorted.windows(2) {
        if pair[1].min <= pair[0].max {
            return Err(invalid(format!(
                "{}-{} overlaps {}-{}",
                pair[0].min, pair[0].max, pair[1].min, pair[1].max
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let table = BandTable::default();
        for trait_ in PersonalityTrait::ALL {
            assert!(validate(trait_, table.bands(trait_)).is_ok());
            assert!(!table.bands(trait_).is_empty());
        }
    }

    #[test]
    fn test_humor_boundaries() {
        let table = BandTable::default();
        assert!(table.select(PersonalityTrait::Humor, 75).is_none());
        assert!(table.select(PersonalityTrait::Humor, 76).is_some());
        assert!(table.select(PersonalityTrait::Humor, 30).is_none());
        assert!(table.select(PersonalityTrait::Humor, 29).is_some());
        assert!(table.select(PersonalityTrait::Humor, 0).is_some());
        assert!(table.select(PersonalityTrait::Humor, 100).is_some());
    }

    #[test]
    fn test_symmetric_boundaries() {
        let table = BandTable::default();
        assert!(table.select(PersonalityTrait::Strictness, 70).is_none());
        assert!(table.select(PersonalityTrait::Strictness, 71).is_some());
        assert!(table.select(PersonalityTrait::Initiative, 30).is_none());
        assert!(table.select(PersonalityTrait::Initiative, 29).is_some());
    }

    #[test]
    fn test_band_label() {
        assert_eq!(Band::new(76, 100, "x").label(), ">75");
        assert_eq!(Band::new(0, 29, "x").label(), "<30");
        assert_eq!(Band::new(40, 60, "x").label(), "40-60");
    }

    #[test]
    fn test_rejects_overlap() {
        let bands = BTreeMap::from([(
            PersonalityTrait::Empathy,
            vec![Band::new(50, 100, "warm"), Band::new(0, 50, "cold")],
        )]);
        let err = BandTable::new(bands).unwrap_err();
        assert!(matches!(err, PersonalityError::InvalidBand { trait_: PersonalityTrait::Empathy, .. }));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let bands = BTreeMap::from([(PersonalityTrait::Humor, vec![Band::new(90, 120, "loud")])]);
        assert!(BandTable::new(bands).is_err());

        let bands = BTreeMap::from([(PersonalityTrait::Humor, vec![Band::new(60, 40, "backwards")])]);
        assert!(BandTable::new(bands).is_err());
    }

    #[test]
    fn test_rejects_empty_text() {
        let bands = BTreeMap::from([(PersonalityTrait::Humor, vec![Band::new(0, 10, "  ")])]);
        assert!(BandTable::new(bands).is_err());
    }

    #[test]
    fn test_three_band_override() {
        let overrides = BandOverrides::from([(
            PersonalityTrait::Strictness,
            vec![
                Band::new(80, 100, "Zero tolerance"),
                Band::new(40, 79, "Remind people of the rules"),
                Band::new(0, 20, "Let things slide"),
            ],
        )]);
        let table = BandTable::with_overrides(&overrides).unwrap();
        assert_eq!(table.select(PersonalityTrait::Strictness, 60).unwrap().text, "Remind people of the rules");
        assert!(table.select(PersonalityTrait::Strictness, 30).is_none());
        // untouched traits keep their defaults
        assert_eq!(table.bands(PersonalityTrait::Humor), BandTable::default().bands(PersonalityTrait::Humor));
    }

    #[test]
    fn test_overrides_from_yaml() {
        let yaml = r#"
humor:
  - { min: 90, max: 100, text: "Crack jokes constantly" }
"#;
        let overrides: BandOverrides = serde_yaml::from_str(yaml).unwrap();
        let table = BandTable::with_overrides(&overrides).unwrap();
        assert_eq!(table.bands(PersonalityTrait::Humor).len(), 1);
        assert!(table.select(PersonalityTrait::Humor, 80).is_none());
    }
}
