//! Static command overview
//!
//! Shown when no rich provider was injected. It never fails: every topic gets
//! the same overview page.

use super::{HelpPage, HelpProvider, HelpSection};
use crate::personality::{Mode, PersonalityTrait};

const TITLE: &str = "guildtone help";

const DESCRIPTION: &str = "Tune how the bot's AI replies sound in each server. \
Every guild has seven personality traits from 0 to 100, or a named mode that sets all of them at once.";

const PERSONALITY_COMMANDS: &[(&str, &str)] = &[
    ("personality view <guild>", "Show the guild's traits, mode and compiled directive"),
    ("personality set <guild> <trait> <value>", "Set one trait (values are clamped to 0-100)"),
    ("personality mode <guild> <mode>", "Apply a preset to every trait"),
    ("personality reset <guild>", "Restore the default profile"),
    ("personality simulate <guild> <message>", "Preview the prompt the AI provider would receive"),
    ("personality traits", "List traits, defaults and instruction bands"),
    ("personality modes", "List modes and their presets"),
    ("personality list", "List guilds with a stored profile"),
];

const OTHER_COMMANDS: &[(&str, &str)] = &[
    ("help [topic...]", "Show this page, or help for one command"),
    ("config show | get <key> | path", "Inspect the loaded configuration"),
    ("completions <shell>", "Generate shell completions"),
];

/// Fixed overview of every command
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticHelp;

impl StaticHelp {
    pub fn overview(&self) -> HelpPage {
        let lines = |commands: &[(&str, &str)]| {
            commands
                .iter()
                .map(|(usage, about)| format!("{}: {}", usage, about))
                .collect::<Vec<_>>()
        };

        let traits: Vec<&str> = PersonalityTrait::ALL.iter().map(|t| t.as_str()).collect();
        let modes: Vec<&str> = Mode::ALL.iter().map(|m| m.as_str()).collect();

        HelpPage {
            title: TITLE.to_string(),
            description: DESCRIPTION.to_string(),
            sections: vec![
                HelpSection::new("Personality", lines(PERSONALITY_COMMANDS)),
                HelpSection::new("Other", lines(OTHER_COMMANDS)),
                HelpSection::new(
                    "Reference",
                    vec![format!("Traits: {}", traits.join(", ")), format!("Modes: {}", modes.join(", "))],
                ),
            ],
            footer: Some("Richer per-command help is not loaded.".to_string()),
        }
    }
}

impl HelpProvider for StaticHelp {
    fn name(&self) -> &str {
        "static"
    }

    fn page(&self, _topic: &[String]) -> Option<HelpPage> {
        Some(self.overview())
    }
}
