//! Per-guild personality configuration
//!
//! Each guild carries seven trait values (0-100) and an optional mode. The
//! values are compiled into a `PERSONALITY: ...` directive that is spliced
//! into the system prompt before a request goes to the AI provider:
//!
//! ```text
//! TraitStore::get(guild) -> PersonalityProfile
//!   -> InstructionCompiler::compile  (band table lookup per trait)
//!   -> Directive ("PERSONALITY: a; b; c")
//!   -> prompt::splice(directive, prompt, Short | Detailed)
//! ```

pub mod bands;
pub mod compiler;
pub mod error;
pub mod mode;
pub mod profile;
pub mod prompt;
pub mod store;
pub mod traits;

pub use bands::{Band, BandOverrides, BandTable};
pub use compiler::{Directive, InstructionCompiler};
pub use error::PersonalityError;
pub use mode::Mode;
pub use profile::{GuildId, PersonalityProfile};
pub use prompt::PromptVariant;
pub use store::{FileStore, TraitStore};
pub use traits::PersonalityTrait;
