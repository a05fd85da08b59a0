pub mod completions;
pub mod config;
pub mod help;
pub mod personality;
