//! Help pages generated from the CLI command tree
//!
//! Walks a `clap::Command` so help stays in sync with the commands that
//! actually exist. Unknown topics return `None`, which lets the help system
//! fall back to the static overview.

use clap::{Arg, Command};

use super::{HelpPage, HelpProvider, HelpSection};

/// Rich help built from a `clap` command tree
pub struct CommandTreeHelp {
    root: Command,
}

impl CommandTreeHelp {
    pub fn new(root: Command) -> Self {
        Self { root }
    }

    fn find(&self, topic: &[String]) -> Option<&Command> {
        let mut current = &self.root;
        for word in topic {
            current = current.find_subcommand(word.to_lowercase())?;
        }
        Some(current)
    }
}

impl HelpProvider for CommandTreeHelp {
    fn name(&self) -> &str {
        "command-tree"
    }

    fn page(&self, topic: &[String]) -> Option<HelpPage> {
        let command = self.find(topic)?;
        let path = std::iter::once(self.root.get_name().to_string())
            .chain(topic.iter().map(|w| w.to_lowercase()))
            .collect::<Vec<_>>()
            .join(" ");

        let description = command
            .get_long_about()
            .or_else(|| command.get_about())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let mut sections = Vec::new();

        let subcommands: Vec<String> = command
            .get_subcommands()
            .filter(|sub| !sub.is_hide_set())
            .map(|sub| describe(sub.get_name(), sub.get_about().map(|s| s.to_string())))
            .collect();
        if !subcommands.is_empty() {
            sections.push(HelpSection::new("Commands", subcommands));
        }

        let visible = || command.get_arguments().filter(|arg| !is_builtin(arg));

        let positionals: Vec<String> = visible()
            .filter(|arg| arg.is_positional())
            .map(|arg| describe(&usage(arg), arg.get_help().map(|s| s.to_string())))
            .collect();
        if !positionals.is_empty() {
            sections.push(HelpSection::new("Arguments", positionals));
        }

        let options: Vec<String> = visible()
            .filter(|arg| !arg.is_positional() && !arg.is_global_set())
            .map(|arg| describe(&usage(arg), arg.get_help().map(|s| s.to_string())))
            .collect();
        if !options.is_empty() {
            sections.push(HelpSection::new("Options", options));
        }

        let footer = command.has_subcommands().then(|| {
            let prefix: String = topic.iter().map(|w| format!("{} ", w.to_lowercase())).collect();
            format!("Run `{} help {}<command>` for details", self.root.get_name(), prefix)
        });

        Some(HelpPage {
            title: path,
            description,
            sections,
            footer,
        })
    }
}

fn is_builtin(arg: &Arg) -> bool {
    matches!(arg.get_id().as_str(), "help" | "version") || arg.is_hide_set()
}

fn usage(arg: &Arg) -> String {
    let value_name = arg
        .get_value_names()
        .and_then(|names| names.first())
        .map(|n| n.to_string())
        .unwrap_or_else(|| arg.get_id().as_str().to_uppercase());

    if arg.is_positional() {
        return if arg.is_required_set() {
            format!("<{}>", value_name)
        } else {
            format!("[{}]", value_name)
        };
    }

    let flag = match (arg.get_short(), arg.get_long()) {
        (Some(short), Some(long)) => format!("-{}, --{}", short, long),
        (None, Some(long)) => format!("--{}", long),
        (Some(short), None) => format!("-{}", short),
        (None, None) => arg.get_id().as_str().to_string(),
    };

    if arg.get_action().takes_values() {
        format!("{} <{}>", flag, value_name)
    } else {
        flag
    }
}

fn describe(name: &str, about: Option<String>) -> String {
    match about {
        Some(about) if !about.is_empty() => format!("{}: {}", name, about),
        _ => name.to_string(),
    }
}
