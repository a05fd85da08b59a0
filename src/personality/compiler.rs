//! Instruction compiler
//!
//! Turns a trait snapshot into the directive string that gets spliced into
//! the system prompt. Pure: the output depends only on the profile and the
//! band table.

use serde::Serialize;

use super::bands::{Band, BandTable};
use super::profile::PersonalityProfile;
use super::traits::{PersonalityTrait, TraitValues};

/// Literal every directive starts with
pub const DIRECTIVE_PREFIX: &str = "PERSONALITY: ";

/// Separator between fragments
pub const FRAGMENT_SEPARATOR: &str = "; ";

/// One selected instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionFragment {
    #[serde(rename = "trait")]
    pub trait_: PersonalityTrait,
    pub value: u8,
    pub band: String,
    pub text: String,
}

impl InstructionFragment {
    fn new(trait_: PersonalityTrait, value: u8, band: &Band) -> Self {
        Self {
            trait_,
            value,
            band: band.label(),
            text: band.text.clone(),
        }
    }
}

/// Compiled fragments, in trait order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub fragments: Vec<InstructionFragment>,
}

impl Directive {
    /// False when no trait selected a fragment. Callers treat that as "no
    /// personality override", not as an error.
    pub fn is_override(&self) -> bool {
        !self.fragments.is_empty()
    }

    /// Fragment texts joined without the prefix
    pub fn body(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(FRAGMENT_SEPARATOR)
    }
}

impl std::fmt::Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", DIRECTIVE_PREFIX, self.body())
    }
}

/// Compiles profiles against a band table loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct InstructionCompiler {
    table: BandTable,
}

impl InstructionCompiler {
    pub fn new(table: BandTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &BandTable {
        &self.table
    }

    pub fn compile(&self, profile: &PersonalityProfile) -> Directive {
        self.compile_traits(&profile.traits)
    }

    pub fn compile_traits(&self, traits: &TraitValues) -> Directive {
        let fragments = traits
            .iter()
            .filter_map(|(trait_, value)| {
                self.table
                    .select(trait_, value)
                    .map(|band| InstructionFragment::new(trait_, value, band))
            })
            .collect();

        Directive { fragments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personality::bands::BandOverrides;
    use crate::personality::mode::Mode;

    const DEFAULT_DIRECTIVE: &str = "PERSONALITY: Be blunt and direct and never sugarcoat hard truths; \
        Acknowledge feelings and respond with warmth; \
        Proactively suggest next steps and improvements; \
        Explain your reasoning and state uncertainty openly";

    #[test]
    fn test_compile_default_profile_golden() {
        let compiler = InstructionCompiler::default();
        let directive = compiler.compile(&PersonalityProfile::default());

        assert_eq!(directive.to_string(), DEFAULT_DIRECTIVE);
        let traits: Vec<PersonalityTrait> = directive.fragments.iter().map(|f| f.trait_).collect();
        assert_eq!(
            traits,
            vec![
                PersonalityTrait::Honesty,
                PersonalityTrait::Empathy,
                PersonalityTrait::Initiative,
                PersonalityTrait::Transparency,
            ]
        );
    }

    #[test]
    fn test_compile_is_deterministic() {
        let compiler = InstructionCompiler::default();
        let mut profile = PersonalityProfile::default();
        profile.set(PersonalityTrait::Humor, 90);

        let first = compiler.compile(&profile).to_string();
        let second = compiler.compile(&profile.clone()).to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compile_all_middle_band_is_empty() {
        let compiler = InstructionCompiler::default();
        let traits = TraitValues::from_array([50; 7]);
        let directive = compiler.compile_traits(&traits);

        assert!(!directive.is_override());
        assert_eq!(directive.to_string(), "PERSONALITY: ");
        assert_eq!(directive.body(), "");
    }

    #[test]
    fn test_compile_order_follows_traits() {
        let compiler = InstructionCompiler::default();
        let traits = TraitValues::from_array([100, 0, 100, 0, 100, 0, 100]);
        let directive = compiler.compile_traits(&traits);

        assert_eq!(directive.fragments.len(), 7);
        assert_eq!(
            directive.to_string(),
            "PERSONALITY: Use playful humor and light wit where it fits; \
             Deliver difficult truths gently and with tact; \
             Use formal, professional language; \
             Stay matter-of-fact and emotionally neutral; \
             Enforce server rules firmly and call out violations; \
             Answer only what was asked; \
             Explain your reasoning and state uncertainty openly"
        );
    }

    #[test]
    fn test_compile_security_mode() {
        let compiler = InstructionCompiler::default();
        let mut profile = PersonalityProfile::default();
        profile.apply_mode(Mode::Security);
        let directive = compiler.compile(&profile);

        assert_eq!(
            directive.to_string(),
            "PERSONALITY: Keep replies serious and avoid jokes; \
             Be blunt and direct and never sugarcoat hard truths; \
             Use formal, professional language; \
             Enforce server rules firmly and call out violations; \
             Explain your reasoning and state uncertainty openly"
        );
    }

    #[test]
    fn test_fragment_records_band() {
        let compiler = InstructionCompiler::default();
        let directive = compiler.compile_traits(&TraitValues::from_array([80, 50, 50, 50, 50, 50, 50]));

        assert_eq!(directive.fragments.len(), 1);
        let fragment = &directive.fragments[0];
        assert_eq!(fragment.trait_, PersonalityTrait::Humor);
        assert_eq!(fragment.value, 80);
        assert_eq!(fragment.band, ">75");
    }

    #[test]
    fn test_compile_with_custom_table() {
        let overrides = BandOverrides::from([(
            PersonalityTrait::Formality,
            vec![crate::personality::bands::Band::new(35, 45, "Keep a neutral register")],
        )]);
        let compiler = InstructionCompiler::new(BandTable::with_overrides(&overrides).unwrap());
        let directive = compiler.compile(&PersonalityProfile::default());

        assert!(directive.body().contains("Keep a neutral register"));
        assert_eq!(directive.fragments.len(), 5);
    }
}
