//! Splices a compiled directive into the prompts sent to the AI provider

use clap::ValueEnum;
use serde::Serialize;

use super::compiler::Directive;

/// Which prompt form the directive is spliced into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PromptVariant {
    /// One directive line above the prompt
    Short,
    /// A personality section with one bullet per instruction
    Detailed,
}

impl PromptVariant {
    pub const ALL: [PromptVariant; 2] = [PromptVariant::Short, PromptVariant::Detailed];
}

impl std::fmt::Display for PromptVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptVariant::Short => f.write_str("short"),
            PromptVariant::Detailed => f.write_str("detailed"),
        }
    }
}

/// Return `prompt` with the directive spliced in. An empty directive leaves
/// the prompt untouched.
pub fn splice(directive: &Directive, prompt: &str, variant: PromptVariant) -> String {
    if !directive.is_override() {
        return prompt.to_string();
    }

    match variant {
        PromptVariant::Short => format!("{}\n\n{}", directive, prompt),
        PromptVariant::Detailed => {
            let mut out = String::from("## Personality\n\nAdopt the following style in your reply:\n");
            for fragment in &directive.fragments {
                out.push_str(&format!("- {} ({} {})\n", fragment.text, fragment.trait_, fragment.value));
            }
            out.push_str("\n---\n\n");
            out.push_str(prompt);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personality::compiler::InstructionCompiler;
    use crate::personality::profile::PersonalityProfile;
    use crate::personality::traits::TraitValues;

    #[test]
    fn test_splice_short() {
        let directive = InstructionCompiler::default().compile(&PersonalityProfile::default());
        let prompt = splice(&directive, "How do I reset my password?", PromptVariant::Short);

        assert!(prompt.starts_with("PERSONALITY: Be blunt"));
        assert!(prompt.ends_with("\n\nHow do I reset my password?"));
    }

    #[test]
    fn test_splice_detailed() {
        let directive = InstructionCompiler::default().compile(&PersonalityProfile::default());
        let prompt = splice(&directive, "Hi", PromptVariant::Detailed);

        assert!(prompt.starts_with("## Personality"));
        assert!(prompt.contains("- Acknowledge feelings and respond with warmth (empathy 75)\n"));
        assert_eq!(prompt.matches("\n- ").count(), 4);
        assert!(prompt.ends_with("---\n\nHi"));
    }

    #[test]
    fn test_splice_empty_directive_is_noop() {
        let directive = InstructionCompiler::default().compile_traits(&TraitValues::from_array([50; 7]));
        for variant in PromptVariant::ALL {
            assert_eq!(splice(&directive, "Hello there", variant), "Hello there");
        }
    }
}
