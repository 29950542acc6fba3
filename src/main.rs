mod app;
mod game;
mod input;
mod point;
mod snake;
mod term;
mod ticker;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

pub type TermInt = u16;
pub type Coords = (u16, u16);

#[derive(Parser)]
#[command(name = "snake-game")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Milliseconds between game ticks
    #[arg(long, default_value = "50")]
    delay_ms: u64,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let game = game::Game::new(rng);
    let mut app = app::App::new(game, Duration::from_millis(cli.delay_ms));

    // Quitting from inside the loop returns here with the terminal restored
    app.run()
}
