#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Maze Chase sessions headlessly.

mod config;
mod runner;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use maze_chase_rendering::{ScriptedInput, SilentAudio, TextBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    runner::{RunOptions, Runner},
};

const DEFAULT_LOG_FILTER: &str = "warn,maze_chase=info";
const WELCOME_BANNER: &str = "Welcome to Maze Chase.";

/// Command-line arguments accepted by the Maze Chase runner.
#[derive(Debug, Parser)]
#[command(name = "maze-chase", about = "Headless maze chase arcade simulation")]
struct Args {
    /// TOML file overriding the default tunables and layout.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Stop after this many ticks.
    #[arg(long)]
    ticks: Option<u64>,
    /// Number of sessions to play before exiting.
    #[arg(long, default_value_t = 1)]
    sessions: u32,
    /// Seed for every random stream; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Move script using U, D, L, R and `.` for no input.
    #[arg(long, default_value = "")]
    moves: String,
    /// Ticks each scripted move is held for.
    #[arg(long, default_value_t = 8)]
    hold: u64,
    /// Print a text frame every N ticks; 0 disables rendering.
    #[arg(long, default_value_t = 0)]
    render_every: u64,
    /// Run as fast as possible, skipping frame pacing and the death pause.
    #[arg(long)]
    unthrottled: bool,
    /// Log filter directives, overriding `RUST_LOG`.
    #[arg(long)]
    log_filter: Option<String>,
    /// Print the run summary as JSON.
    #[arg(long)]
    summary_json: bool,
}

fn init_logging(directives: Option<&str>) -> Result<()> {
    let filter = match directives {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter {directives:?}"))?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_filter.as_deref())?;

    let config = Config::load(args.config.as_deref())?;
    let input = ScriptedInput::parse(&args.moves, args.hold).context("invalid --moves script")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, tick_rate_hz = config.tick_rate_hz, "starting run");

    let options = RunOptions {
        seed,
        max_ticks: args.ticks,
        max_sessions: args.sessions.max(1),
        render_every: args.render_every,
        frame_interval: (!args.unthrottled).then(|| config.frame_interval()),
        death_pause: (!args.unthrottled).then(|| config.death_pause()),
    };

    if !args.summary_json {
        println!("{WELCOME_BANNER}");
    }

    let mut runner = Runner::new(
        config.world_config(),
        options,
        TextBackend::new(io::stdout()),
        SilentAudio,
        input,
    );
    let summary = runner.run()?;

    if args.summary_json {
        let json = serde_json::to_string_pretty(&summary).context("failed to encode summary")?;
        println!("{json}");
    } else {
        for (index, session) in summary.sessions.iter().enumerate() {
            println!(
                "session {}: score {} level {} lives {} ticks {}{}",
                index + 1,
                session.score,
                session.level,
                session.lives,
                session.ticks,
                if session.ended { " (game over)" } else { "" }
            );
        }
    }
    Ok(())
}
