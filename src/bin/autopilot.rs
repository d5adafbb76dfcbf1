//! Autopilot
//! The AI rules the kingdom for a number of turns, weathering random events

use std::path::PathBuf;

use clap::Parser;
use stronghold::core::config::GameConfig;
use stronghold::core::error::Result;
use stronghold::game::Game;
use stronghold::save::SaveGame;
use tracing_subscriber::EnvFilter;

/// Autopilot - let the decision engine run the kingdom
#[derive(Parser, Debug)]
#[command(name = "autopilot")]
#[command(about = "Run an AI-controlled kingdom for several turns")]
struct Args {
    /// Number of turns to play
    #[arg(long, default_value_t = 10)]
    turns: u32,

    /// Random seed for events (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// TOML config file with starting values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a save file here when finished
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print every AI decision report
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stronghold=warn")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut game = Game::new(&config);
    game.snapshot("Coronation");

    println!("\n=== AUTOPILOT: {} turns, seed {} ===", args.turns, config.seed);
    println!("{}\n", game.kingdom.overview());

    for _ in 0..args.turns {
        let (_, label) = game.trigger_event();
        let policy = game.apply_leadership();
        let simulated = game.simulate_population();
        let report = game.run_ai_turn();

        if args.verbose {
            println!("{}", report);
            println!("Event: {}", label);
            println!("Policy: {}", policy);
            println!("Population change: {:+}\n", simulated);
        } else {
            println!(
                "Turn {:>3}: tax {} | army {} | conflict {} | {}",
                report.turn,
                report.taxation.code.code(),
                report.recruitment.code.code(),
                report.conflict.code.code(),
                label
            );
        }
    }

    println!("\n{}", game.history_report());

    if let Some(path) = &args.save {
        SaveGame::capture(&game).save_to(path)?;
        println!("Saved to {}", path.display());
    }

    Ok(())
}
