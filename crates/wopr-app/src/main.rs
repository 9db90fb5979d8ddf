//! WOPR headless driver.
//!
//! # Usage
//!
//! ```bash
//! # JSON-lines session on stdin/stdout
//! wopr play --seed 7 --difficulty hard
//!
//! # Autopilot against WOPR, 100 seeded games
//! wopr simulate --games 100 --seed 1000 --difficulty wopr
//! ```
//!
//! Logs go to stderr (`RUST_LOG` or `--verbose`); stdout is JSON only.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wopr_app::config::{load_tables, parse_difficulty, parse_mode};
use wopr_app::error::AppError;
use wopr_app::protocol;
use wopr_app::runner::{run_batch, SimulationConfig};
use wopr_core::config::{GameConfig, SessionConfig};
use wopr_sim::GameSession;

#[derive(Parser)]
#[command(name = "wopr")]
#[command(about = "Headless WOPR strategic exchange simulation")]
#[command(version)]
struct Cli {
    /// Enable debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration tables (JSON); built-in tables when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one session over a JSON-lines protocol on stdin/stdout
    Play {
        #[arg(long, default_value = "42")]
        seed: u64,

        #[arg(short, long, default_value = "normal")]
        difficulty: String,

        /// campaign, simulation or tutorial
        #[arg(short, long, default_value = "campaign")]
        mode: String,
    },

    /// Run autopilot-versus-WOPR games and print a JSON report
    Simulate {
        /// Number of games to run
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Seed of the first game
        #[arg(long, default_value = "0")]
        seed: u64,

        /// WOPR difficulty
        #[arg(short, long, default_value = "normal")]
        difficulty: String,

        /// Difficulty profile for the autopilot
        #[arg(long, default_value = "normal")]
        autopilot: String,

        /// Rounds before a game is called undecided
        #[arg(long, default_value = "100")]
        max_turns: u32,

        /// Pretty-print the report
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(false),
        )
        .with(filter)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "wopr failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let tables = load_tables(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Simulate {
            games,
            seed,
            difficulty,
            autopilot,
            max_turns,
            pretty,
        }) => {
            let sim = SimulationConfig {
                games,
                seed,
                difficulty: parse_difficulty(&difficulty)?,
                autopilot: parse_difficulty(&autopilot)?,
                max_turns,
                ..Default::default()
            };
            let report = run_batch(&tables, &sim)?;
            tracing::info!(
                games = report.summary.games,
                undecided = report.summary.undecided,
                average_turns = report.summary.average_turns,
                "simulation complete"
            );
            let stdout = io::stdout().lock();
            if pretty {
                serde_json::to_writer_pretty(stdout, &report)?;
            } else {
                serde_json::to_writer(stdout, &report)?;
            }
            println!();
        }
        Some(Commands::Play {
            seed,
            difficulty,
            mode,
        }) => {
            let session = SessionConfig {
                seed,
                difficulty: parse_difficulty(&difficulty)?,
                mode: parse_mode(&mode)?,
                ..Default::default()
            };
            play(tables, session)?;
        }
        None => play(tables, SessionConfig::default())?,
    }
    Ok(())
}

fn play(tables: GameConfig, session: SessionConfig) -> Result<(), AppError> {
    let mut game = GameSession::new(tables, session)?;
    protocol::serve(&mut game, io::stdin().lock(), io::stdout().lock())
}
