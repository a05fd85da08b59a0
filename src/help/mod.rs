//! Help pages
//!
//! The help command asks an optional rich provider first. The provider is
//! injected once at startup; when it is missing, or has nothing for the
//! requested topic, the static overview is shown instead.

use serde::Serialize;

pub mod command_tree;
pub mod static_help;

pub use command_tree::CommandTreeHelp;
pub use static_help::StaticHelp;

/// An embed-shaped help page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpPage {
    pub title: String,
    pub description: String,
    pub sections: Vec<HelpSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

/// A named field of a help page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpSection {
    pub name: String,
    pub lines: Vec<String>,
}

impl HelpSection {
    pub fn new(name: &str, lines: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            lines,
        }
    }
}

/// Something that can produce help pages
pub trait HelpProvider {
    /// Provider name, for logs and `--verbose` output
    fn name(&self) -> &str;

    /// Page for a topic path such as `["personality", "set"]`. An empty path
    /// asks for the overview. `None` means the provider has no such topic.
    fn page(&self, topic: &[String]) -> Option<HelpPage>;
}

/// Help entry point with an optional rich provider and a static fallback
pub struct HelpSystem {
    rich: Option<Box<dyn HelpProvider>>,
    fallback: StaticHelp,
}

impl HelpSystem {
    pub fn new(rich: Option<Box<dyn HelpProvider>>) -> Self {
        Self {
            rich,
            fallback: StaticHelp,
        }
    }

    /// Name of the injected rich provider, if any
    pub fn rich_provider(&self) -> Option<&str> {
        self.rich.as_deref().map(|p| p.name())
    }

    /// Render a topic, returning the page and the name of the provider that
    /// served it
    pub fn render(&self, topic: &[String]) -> (HelpPage, &str) {
        if let Some(rich) = &self.rich {
            if let Some(page) = rich.page(topic) {
                log::debug!("Help for {:?} served by {}", topic, rich.name());
                return (page, rich.name());
            }
            log::debug!("{} has no page for {:?}, falling back", rich.name(), topic);
        }

        (self.fallback.overview(), self.fallback.name())
    }
}
