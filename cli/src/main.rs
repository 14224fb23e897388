// SPDX-License-Identifier: MIT OR Apache-2.0

//! torus5 CLI - headless self-play driver
//!
//! Plays seeded batches of toroidal five-in-a-row games, prints a summary
//! and optionally writes the collected training examples as CBOR.

mod render;
mod selfplay;

use anyhow::{Context, Result};
use clap::Parser;
use selfplay::{collect_examples, run_games, Policy, SelfPlayStats};
use std::path::PathBuf;
use torus5_core::{cbor, GameConfig, TorusGame};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 10)]
    games: usize,

    /// Base seed; game i uses seed + i
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Board side length
    #[arg(long)]
    size: Option<usize>,

    /// Move policy for both sides
    #[arg(short, long, value_enum, default_value_t = Policy::Heuristic)]
    policy: Policy,

    /// Reward the second player receives for a draw
    #[arg(long, allow_negative_numbers = true)]
    draw_reward: Option<f32>,

    /// Enable the setup-pattern layer of the heuristic policy
    #[arg(long)]
    setup_templates: bool,

    /// Expand every example through the board symmetries
    #[arg(long)]
    augment: bool,

    /// JSON game configuration; flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write training examples to this CBOR file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn build_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            GameConfig::from_json(&text)?
        }
        None => GameConfig::default(),
    };

    if let Some(size) = args.size {
        config.height = size;
        config.width = size;
    }
    if let Some(reward) = args.draw_reward {
        config.draw_reward = reward;
    }
    if args.setup_templates {
        config.setup_templates = true;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let config = build_config(&args)?;
    info!(
        ?config,
        games = args.games,
        seed = args.seed,
        policy = ?args.policy,
        "starting self-play"
    );
    let game = TorusGame::new(config)?;

    let records = run_games(&game, args.games, args.seed, args.policy)?;
    let stats = SelfPlayStats::from_records(&records);

    println!("games:      {}", stats.total_games);
    println!("A wins:     {}", stats.a_wins);
    println!("B wins:     {}", stats.b_wins);
    println!("draws:      {}", stats.draws);
    println!("avg moves:  {:.1}", stats.avg_moves);

    if let Some(last) = records.last() {
        println!();
        print!("{}", render::render_board(&last.final_board, last.actions.last().copied()));
    }

    if let Some(path) = &args.output {
        let examples = collect_examples(&game, &records, args.augment)?;
        let bytes = cbor::serialize_examples(&examples)?;
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        info!(count = examples.len(), path = %path.display(), "wrote training examples");
    }

    Ok(())
}
