//! feral_druid - inspect EP weights, presets, and suggest gems from the terminal

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ep_core::config::load_toml;
use ep_core::registry::{self, RegistryEntry};
use ep_core::{CandidatePool, LoadoutRequest, OptimizationOutcome, StatVector};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "feral_druid", about = "Feral druid EP weights and gem suggestions")]
struct Cli {
    /// Use this declaration instead of the built-in one
    #[arg(long, global = true)]
    declaration: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the EP weight of every scored stat
    Weights {
        /// Rescale so the reference stat is worth this much
        #[arg(long)]
        anchor: Option<f64>,
    },
    /// List talent, rotation and gear presets
    Presets,
    /// Score a stat vector, e.g. `score strength=10 agility=5 attack_power=100`
    Score {
        #[arg(required = true)]
        stats: Vec<String>,
    },
    /// Fill the sockets of a gear preset with the best gems from a pool file
    SuggestGems {
        /// TOML file with `[[items]]` and `[[gems]]`
        pool: PathBuf,
        /// Gear preset; defaults to the declared default gear
        #[arg(long)]
        gear: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let entry = register(cli.declaration.as_deref())?;

    match cli.command {
        Command::Weights { anchor } => print_weights(&entry, anchor),
        Command::Presets => {
            print_presets(&entry);
            Ok(())
        }
        Command::Score { stats } => score(&entry, &stats),
        Command::SuggestGems { pool, gear } => suggest(&entry, &pool, gear),
    }
}

fn register(declaration: Option<&Path>) -> Result<Arc<RegistryEntry>> {
    let entry = match declaration {
        Some(path) => {
            let declaration = ep_core::config::load_declaration(path)
                .with_context(|| format!("loading {}", path.display()))?;
            registry::register_global(declaration)?
        }
        None => feral_druid::register_global()?,
    };
    Ok(entry)
}

fn print_weights(entry: &RegistryEntry, anchor: Option<f64>) -> Result<()> {
    let weights = match anchor {
        Some(anchor) => entry.ep_weights().normalized(anchor)?,
        None => entry.ep_weights().clone(),
    };
    println!("{} (reference: {})", entry.id(), weights.reference());
    for stat in entry.scored_stats() {
        println!("  {:<20} {:>8.2}", stat.name(), weights.ep_of(*stat));
    }
    Ok(())
}

fn print_presets(entry: &RegistryEntry) {
    let defaults = entry.defaults();
    let marker = |name: &str, default: Option<&String>| {
        if default.map(String::as_str) == Some(name) {
            " *"
        } else {
            ""
        }
    };
    println!("talents:");
    for name in entry.talent_presets().names() {
        println!("  {name}{}", marker(name, defaults.talents.as_ref()));
    }
    println!("rotations:");
    for name in entry.rotation_presets().names() {
        println!("  {name}{}", marker(name, defaults.rotation.as_ref()));
    }
    println!("gear:");
    for name in entry.gear_presets().names() {
        println!("  {name}{}", marker(name, defaults.gear.as_ref()));
    }
}

fn score(entry: &RegistryEntry, stats: &[String]) -> Result<()> {
    let pairs = stats
        .iter()
        .map(|pair| -> Result<(&str, f64)> {
            let (name, value) = pair
                .split_once('=')
                .with_context(|| format!("expected stat=value, got `{pair}`"))?;
            let value: f64 = value
                .parse()
                .with_context(|| format!("invalid number in `{pair}`"))?;
            Ok((name, value))
        })
        .collect::<Result<Vec<_>>>()?;
    let candidate = StatVector::from_named(pairs)?;
    println!("{:.2} EP", entry.scorer().score(&candidate)?);
    Ok(())
}

fn suggest(entry: &RegistryEntry, pool: &Path, gear: Option<String>) -> Result<()> {
    let pool: CandidatePool =
        load_toml(pool).with_context(|| format!("loading pool {}", pool.display()))?;
    let mut loadout = entry.loadout(&LoadoutRequest {
        gear,
        ..LoadoutRequest::default()
    })?;

    match feral_druid::suggest_gems(entry, &mut loadout, &pool)? {
        OptimizationOutcome::NoImprovement { score } => {
            println!("{}: no improvement ({score:.2} EP)", loadout.gear_preset);
        }
        OptimizationOutcome::Improved {
            changed_slots,
            previous_score,
            score,
        } => {
            println!(
                "{}: {previous_score:.2} -> {score:.2} EP",
                loadout.gear_preset
            );
            for slot in changed_slots {
                if let Some(item) = loadout.gear.items.get(&slot) {
                    println!("  {slot:?}: item {} gems {:?}", item.id, item.gems);
                }
            }
        }
    }
    Ok(())
}
