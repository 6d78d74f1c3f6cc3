use anyhow::{Context, Result};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use client::{
    ControlScheme, GameSession, SessionConfig, camera::CameraMode, constants::DEFAULT_TICKS_PER_STEP, init_tracing,
    run_script,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(author, version, about = "Maze explorer", long_about = None)]
struct Args {
    /// Level to start on
    #[arg(short, long, default_value = "1")]
    level: u32,

    /// Seed for level generation; random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Movement controls
    #[arg(long, value_enum, default_value_t = ControlScheme::Arrows)]
    controls: ControlScheme,

    /// Camera mode
    #[arg(long, value_enum, default_value_t = CameraMode::Orbit)]
    camera: CameraMode,

    /// Build every level before starting
    #[arg(long)]
    preload: bool,

    /// Ticks a movement command runs for when no count is given
    #[arg(long, default_value_t = DEFAULT_TICKS_PER_STEP)]
    ticks_per_step: u32,

    /// Print the starting level as JSON and exit
    #[cfg(feature = "json")]
    #[arg(long)]
    dump_json: bool,
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("using level seed {seed}");

    let config = SessionConfig {
        controls: args.controls,
        camera: args.camera,
    };
    let mut session = GameSession::new(config, StdRng::seed_from_u64(seed));

    if args.preload {
        session.preload_levels().context("failed to preload levels")?;
    }

    let loaded = session
        .load_level(args.level)
        .with_context(|| format!("failed to load level {}", args.level))?;

    #[cfg(feature = "json")]
    if args.dump_json {
        let description = session.description().context("no level loaded")?;
        println!("{}", common::io::encode_level(description)?);
        return Ok(());
    }

    for event in loaded {
        println!("{event}");
    }
    println!("Type help or ? for available commands");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_script(&mut session, args.ticks_per_step, stdin.lock(), &mut stdout)
}
