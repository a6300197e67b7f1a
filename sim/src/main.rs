//! Battle simulator: run one battle from JSON rosters, or sweep a range of
//! seeds in parallel and report how often each side wins.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use sab_battle::{resolve_battle, BattleConfig, BattleError, Outcome, Roster, Team, Unit};
use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "sab-sim", about = "Resolve Super Auto Battler battles")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a single battle and print its report as JSON.
    Run {
        #[arg(long)]
        player: PathBuf,
        #[arg(long)]
        enemy: PathBuf,
        /// Overrides the config and roster seeds.
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Resolve the same matchup for seeds 0..N and print a summary.
    Sweep {
        #[arg(long)]
        player: PathBuf,
        #[arg(long)]
        enemy: PathBuf,
        #[arg(long, default_value_t = 1000)]
        seeds: u64,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Either a full roster object or a bare list of units.
#[derive(Deserialize)]
#[serde(untagged)]
enum RosterFile {
    Roster(Roster),
    Units(Vec<Unit>),
}

impl RosterFile {
    fn into_roster(self) -> Result<Roster, BattleError> {
        match self {
            RosterFile::Roster(roster) => {
                roster.validate()?;
                Ok(roster)
            }
            RosterFile::Units(units) => Roster::new(units),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct SweepSummary {
    battles: u64,
    player_wins: u64,
    enemy_wins: u64,
    draws: u64,
    failures: u64,
}

impl SweepSummary {
    fn record(mut self, result: &Result<Outcome, BattleError>) -> Self {
        self.battles += 1;
        match result {
            Ok(Outcome::Winner(Team::Player)) => self.player_wins += 1,
            Ok(Outcome::Winner(Team::Enemy)) => self.enemy_wins += 1,
            Ok(Outcome::Draw) => self.draws += 1,
            Err(_) => self.failures += 1,
        }
        self
    }

    fn merge(mut self, other: Self) -> Self {
        self.battles += other.battles;
        self.player_wins += other.player_wins;
        self.enemy_wins += other.enemy_wins;
        self.draws += other.draws;
        self.failures += other.failures;
        self
    }
}

fn main() -> Result<()> {
    setup_logging();

    match Cli::parse().command {
        Command::Run {
            player,
            enemy,
            seed,
            config,
            pretty,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            let report = resolve_battle(load_roster(&player)?, load_roster(&enemy)?, config)
                .context("battle did not resolve")?;
            tracing::info!(outcome = ?report.outcome, rounds = report.rounds, "battle resolved");

            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{json}");
        }
        Command::Sweep {
            player,
            enemy,
            seeds,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let player = load_roster(&player)?;
            let enemy = load_roster(&enemy)?;
            let summary = sweep(&player, &enemy, &config, seeds);
            tracing::info!(
                battles = summary.battles,
                failures = summary.failures,
                "sweep finished"
            );
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

/// Each seed is an independent, single-threaded battle.
fn sweep(player: &Roster, enemy: &Roster, config: &BattleConfig, seeds: u64) -> SweepSummary {
    (0..seeds)
        .into_par_iter()
        .map(|seed| {
            let result = resolve_battle(player.clone(), enemy.clone(), config.clone().with_seed(seed))
                .map(|report| report.outcome);
            if let Err(error) = &result {
                tracing::warn!(seed, %error, "battle failed");
            }
            SweepSummary::default().record(&result)
        })
        .reduce(SweepSummary::default, SweepSummary::merge)
}

fn load_roster(path: &Path) -> Result<Roster> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read roster {}", path.display()))?;
    parse_roster(&text).with_context(|| format!("invalid roster {}", path.display()))
}

fn parse_roster(text: &str) -> Result<Roster> {
    let file: RosterFile = serde_json::from_str(text)?;
    Ok(file.into_roster()?)
}

fn load_config(path: Option<&Path>) -> Result<BattleConfig> {
    let Some(path) = path else {
        return Ok(BattleConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

/// Logs go to stderr so stdout stays machine readable. `RUST_LOG=battle=debug`
/// shows the engine's wave-by-wave trace.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
