//! guildtone: per-guild personality traits and help pages for a chat bot
//!
//! The library is what a bot host links against: a [`personality::TraitStore`]
//! per deployment, one [`personality::InstructionCompiler`] built from config
//! at startup, and a [`help::HelpSystem`] with an optional rich provider. The
//! `guildtone` binary exposes the same operations as a CLI.

pub mod config;
pub mod help;
pub mod personality;
