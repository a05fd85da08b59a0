//! Personality commands
//!
//! Each subcommand maps to one store operation. `simulate` also runs the
//! compiler and the prompt splicer and prints the result instead of sending
//! it anywhere.

use chrono::{DateTime, Utc};
use colored::*;
use eyre::{Context, Result};
use serde::Serialize;

use guildtone::config::Config;
use guildtone::personality::compiler::InstructionFragment;
use guildtone::personality::traits::TraitValues;
use guildtone::personality::{
    Band, Directive, FileStore, GuildId, InstructionCompiler, Mode, PersonalityProfile, PersonalityTrait,
    PromptVariant, TraitStore, prompt,
};

use crate::cli::{OutputFormat, PersonalityAction};

pub fn run(action: PersonalityAction, config: &Config) -> Result<()> {
    let mut store = FileStore::new(config.guilds_dir());
    let compiler = config.compiler()?;

    match action {
        PersonalityAction::View { guild, format } => {
            view(&store, &compiler, guild, OutputFormat::resolve(format))
        }
        PersonalityAction::Set {
            guild,
            trait_name,
            value,
        } => set(&mut store, &compiler, guild, &trait_name, value),
        PersonalityAction::Mode { guild, mode } => set_mode(&mut store, &compiler, guild, &mode),
        PersonalityAction::Reset { guild } => reset(&mut store, &compiler, guild),
        PersonalityAction::Simulate {
            guild,
            message,
            variant,
            format,
        } => simulate(&store, &compiler, guild, &message, variant, OutputFormat::resolve(format)),
        PersonalityAction::Traits { format } => list_traits(&compiler, OutputFormat::resolve(format)),
        PersonalityAction::Modes { format } => list_modes(OutputFormat::resolve(format)),
        PersonalityAction::List { format } => list_guilds(&store, OutputFormat::resolve(format)),
    }
}

#[derive(Serialize)]
struct ProfileView<'a> {
    guild: GuildId,
    #[serde(flatten)]
    profile: &'a PersonalityProfile,
    directive: String,
    is_override: bool,
    fragments: &'a [InstructionFragment],
}

fn print_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(value)?),
        _ => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn bar(value: u8) -> String {
    let filled = (value as usize + 2) / 5;
    format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled))
}

fn print_profile(guild: GuildId, profile: &PersonalityProfile, directive: &Directive) {
    let mode = profile.mode.map(|m| m.to_string()).unwrap_or_else(|| "none".to_string());
    println!("{} {}", "Guild:".bold(), guild.to_string().green().bold());
    println!("{} {}", "Mode:".bold(), mode.cyan());
    if let Some(updated) = profile.updated_at {
        println!("{} {}", "Updated:".bold(), format_time(updated).dimmed());
    }
    println!();

    for (trait_, value) in profile.traits.iter() {
        let band = directive
            .fragments
            .iter()
            .find(|f| f.trait_ == trait_)
            .map(|f| f.band.as_str())
            .unwrap_or("");
        println!("  {:<13} {:>3} {} {}", trait_.to_string().bold(), value, bar(value), band.yellow());
    }

    println!();
    print_directive(directive);
}

fn print_directive(directive: &Directive) {
    if directive.is_override() {
        println!("{}", directive.to_string().italic());
    } else {
        println!("{} {}", directive.to_string().italic(), "(no personality override)".dimmed());
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn view(store: &FileStore, compiler: &InstructionCompiler, guild: GuildId, format: OutputFormat) -> Result<()> {
    let profile = store.get(guild);
    let directive = compiler.compile(&profile);

    match format {
        OutputFormat::Text => print_profile(guild, &profile, &directive),
        _ => print_structured(
            &ProfileView {
                guild,
                profile: &profile,
                directive: directive.to_string(),
                is_override: directive.is_override(),
                fragments: &directive.fragments,
            },
            format,
        )?,
    }

    Ok(())
}

fn set(
    store: &mut FileStore,
    compiler: &InstructionCompiler,
    guild: GuildId,
    trait_name: &str,
    value: i64,
) -> Result<()> {
    let trait_: PersonalityTrait = trait_name.parse()?;
    let profile = store
        .set_trait(guild, trait_, value)
        .with_context(|| format!("Failed to set {} for guild {}", trait_, guild))?;

    let stored = profile.get(trait_);
    if i64::from(stored) == value {
        println!("{} Set {} = {} for guild {}", "✓".green(), trait_.to_string().cyan(), stored, guild);
    } else {
        println!(
            "{} Set {} = {} for guild {} {}",
            "✓".green(),
            trait_.to_string().cyan(),
            stored,
            guild,
            format!("(clamped from {})", value).yellow()
        );
    }
    print_directive(&compiler.compile(&profile));

    Ok(())
}

fn set_mode(store: &mut FileStore, compiler: &InstructionCompiler, guild: GuildId, mode: &str) -> Result<()> {
    let profile = store
        .set_mode(guild, mode)
        .with_context(|| format!("Failed to switch guild {} to mode {}", guild, mode))?;

    let mode = profile.mode.map(|m| m.to_string()).unwrap_or_default();
    println!("{} Guild {} is now in {} mode", "✓".green(), guild, mode.cyan());
    print_directive(&compiler.compile(&profile));

    Ok(())
}

fn reset(store: &mut FileStore, compiler: &InstructionCompiler, guild: GuildId) -> Result<()> {
    let profile = store
        .reset(guild)
        .with_context(|| format!("Failed to reset guild {}", guild))?;

    println!("{} Restored default personality for guild {}", "✓".green(), guild);
    print_directive(&compiler.compile(&profile));

    Ok(())
}

#[derive(Serialize)]
struct Simulation {
    guild: GuildId,
    message: String,
    directive: String,
    is_override: bool,
    prompts: Vec<SimulatedPrompt>,
}

#[derive(Serialize)]
struct SimulatedPrompt {
    variant: PromptVariant,
    prompt: String,
}

fn simulate(
    store: &FileStore,
    compiler: &InstructionCompiler,
    guild: GuildId,
    message: &str,
    variant: Option<PromptVariant>,
    format: OutputFormat,
) -> Result<()> {
    let profile = store.get(guild);
    let directive = compiler.compile(&profile);

    let variants = match variant {
        Some(v) => vec![v],
        None => PromptVariant::ALL.to_vec(),
    };
    let prompts: Vec<SimulatedPrompt> = variants
        .into_iter()
        .map(|variant| SimulatedPrompt {
            variant,
            prompt: prompt::splice(&directive, message, variant),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            println!("{} {}", "Simulating guild".bold(), guild.to_string().green().bold());
            print_directive(&directive);
            for simulated in &prompts {
                println!();
                println!("{}", format!("── {} prompt ──", simulated.variant).cyan());
                println!("{}", simulated.prompt);
            }
        }
        _ => print_structured(
            &Simulation {
                guild,
                message: message.to_string(),
                directive: directive.to_string(),
                is_override: directive.is_override(),
                prompts,
            },
            format,
        )?,
    }

    Ok(())
}

#[derive(Serialize)]
struct TraitInfo<'a> {
    name: PersonalityTrait,
    default: u8,
    description: &'static str,
    bands: &'a [Band],
}

fn list_traits(compiler: &InstructionCompiler, format: OutputFormat) -> Result<()> {
    let infos: Vec<TraitInfo> = PersonalityTrait::ALL
        .iter()
        .map(|t| TraitInfo {
            name: *t,
            default: t.default_value(),
            description: t.description(),
            bands: compiler.table().bands(*t),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            println!("{}", "Personality Traits:".bold());
            println!();
            for info in &infos {
                println!(
                    "  {} {} {}",
                    "●".green(),
                    info.name.to_string().bold(),
                    format!("(default {})", info.default).dimmed()
                );
                println!("    {}", info.description.dimmed());
                if info.bands.is_empty() {
                    println!("    {}", "no instruction bands".dimmed());
                }
                for band in info.bands {
                    println!("    {:>6}  {}", band.label().yellow(), band.text);
                }
                println!();
            }
        }
        _ => print_structured(&infos, format)?,
    }

    Ok(())
}

#[derive(Serialize)]
struct ModeInfo {
    name: Mode,
    description: &'static str,
    traits: TraitValues,
}

fn list_modes(format: OutputFormat) -> Result<()> {
    let infos: Vec<ModeInfo> = Mode::ALL
        .iter()
        .map(|m| ModeInfo {
            name: *m,
            description: m.description(),
            traits: m.preset(),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            println!("{}", "Personality Modes:".bold());
            println!();
            for info in &infos {
                println!("  {} {}", "●".green(), info.name.to_string().bold());
                println!("    {}", info.description.dimmed());
                let values: Vec<String> = info.traits.iter().map(|(t, v)| format!("{}={}", t, v)).collect();
                println!("    {}", values.join(" ").cyan());
                println!();
            }
        }
        _ => print_structured(&infos, format)?,
    }

    Ok(())
}

#[derive(Serialize)]
struct GuildSummary {
    guild: GuildId,
    mode: Option<Mode>,
    updated_at: Option<DateTime<Utc>>,
}

fn list_guilds(store: &FileStore, format: OutputFormat) -> Result<()> {
    let summaries: Vec<GuildSummary> = store
        .guilds()
        .context("Failed to list stored guilds")?
        .into_iter()
        .map(|guild| {
            let profile = store.get(guild);
            GuildSummary {
                guild,
                mode: profile.mode,
                updated_at: profile.updated_at,
            }
        })
        .collect();

    match format {
        OutputFormat::Text => {
            println!("{}", "Configured Guilds:".bold());
            println!();
            if summaries.is_empty() {
                println!("  {} No profiles in {}", "(none)".dimmed(), store.dir().display());
                println!();
                println!("  Configure one with: {}", "guildtone personality set <guild> <trait> <value>".cyan());
            }
            for summary in &summaries {
                let mode = summary.mode.map(|m| m.to_string()).unwrap_or_else(|| "custom".to_string());
                let updated = summary.updated_at.map(format_time).unwrap_or_default();
                println!("  {} {} {} {}", "●".green(), summary.guild.to_string().bold(), mode.cyan(), updated.dimmed());
            }
        }
        _ => print_structured(&summaries, format)?,
    }

    Ok(())
}
