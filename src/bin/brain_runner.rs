//! Headless Brain Runner
//!
//! Replays battle rounds through the NPC brain and prints its decisions.

use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use energon_brain::brain::{
    Decision, DecisionReport, DeliberationTrace, MonsterState, NpcBrain, PlayerState, SeededRng,
};
use energon_brain::core::config::{load_profile, BrainConfig};
use energon_brain::core::error::Result;
use serde::{Deserialize, Serialize};

/// Headless Brain Runner - feed rounds, get monster decisions
#[derive(Parser, Debug)]
#[command(name = "brain_runner")]
#[command(about = "Run battle rounds through the NPC brain and output its decisions")]
struct Args {
    /// Round JSON file, or - for stdin
    #[arg(long, default_value = "-")]
    input: String,

    /// Brain profile name (loaded from data/brain_profiles/)
    #[arg(long, default_value = "default")]
    profile: String,

    /// Explicit profile file; takes precedence over --profile
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed applied to every round, replacing any seed in the input
    #[arg(long)]
    seed: Option<i64>,

    /// Output format: json or text
    #[arg(long, default_value = "json", value_parser = ["json", "text"])]
    format: String,

    /// Include the deliberation trace in JSON output
    #[arg(long)]
    trace: bool,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug, Deserialize)]
struct Round {
    #[serde(default)]
    monster: MonsterState,
    #[serde(default)]
    players: Vec<PlayerState>,
}

/// A battle log replay or a single round
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoundInput {
    Replay(Vec<Round>),
    Single(Round),
}

/// JSON output structure
#[derive(Serialize)]
struct RoundResult {
    round: usize,
    #[serde(flatten)]
    decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<DeliberationTrace>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => BrainConfig::load_from_file(path)?,
        None => load_profile(&args.profile).unwrap_or_else(|e| {
            tracing::warn!("Failed to load profile '{}': {}", args.profile, e);
            tracing::warn!("Using default profile");
            BrainConfig::default()
        }),
    };
    let brain = NpcBrain::new(config)?;
    tracing::info!("Loaded brain profile '{}'", brain.config().name);

    let raw = read_input(&args.input)?;
    let (rounds, single) = match serde_json::from_str::<RoundInput>(&raw)? {
        RoundInput::Replay(rounds) => (rounds, false),
        RoundInput::Single(round) => (vec![round], true),
    };
    tracing::info!("Deciding {} round(s)", rounds.len());

    let mut rng = SeededRng::from_entropy();
    let mut results = Vec::with_capacity(rounds.len());
    for (index, mut round) in rounds.into_iter().enumerate() {
        if let Some(seed) = args.seed {
            round.monster.seed = Some(seed);
        }
        let DecisionReport { decision, trace } =
            brain.deliberate(&round.monster, &round.players, &mut rng);
        results.push(RoundResult {
            round: index,
            decision,
            trace: trace.filter(|_| args.trace),
        });
    }

    if args.format == "text" {
        for result in &results {
            println!(
                "[{}] {} / {} | {}",
                result.round,
                result.decision.action,
                result.decision.strategy,
                result.decision.rationale
            );
        }
    } else if single {
        println!("{}", serde_json::to_string_pretty(&results[0])?);
    } else {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw)?;
        Ok(raw)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}
