//! Terminal front end for the coax simulator.
//!
//! # Usage
//!
//! ```bash
//! # Built-in demo scenario, animated at 10 frames/second
//! coax
//!
//! # A scenario file, fixed seed, no frame delay, JSON frames
//! coax scenario.json --seed 7 --frame-delay-ms 0 --json
//! ```

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use coax_core::{Simulation, SimulationConfig};
use log::info;

mod render;
mod scenario;

/// Discrete-time CSMA/CD shared-medium simulator
#[derive(Parser, Debug)]
#[command(name = "coax")]
#[command(about = "Simulates stations contending for a shared Ethernet cable")]
#[command(version)]
struct Args {
    /// Scenario file (JSON SimulationConfig). Runs the built-in demo when omitted.
    scenario: Option<PathBuf>,

    /// Seed for the backoff and packet-length draws
    #[arg(long, default_value = "1")]
    seed: u64,

    /// Pause between rendered rounds, in milliseconds
    #[arg(long, default_value = "100")]
    frame_delay_ms: u64,

    /// Emit one JSON object per round instead of the console view
    #[arg(long)]
    json: bool,

    /// Abort the run after this many rounds
    #[arg(long, default_value = "100000")]
    max_rounds: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config: SimulationConfig = match &args.scenario {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => scenario::demo(),
    };

    let mut sim = Simulation::from_config(&config, args.seed)?;
    info!(
        "cable of {} cells, {} devices, {} scheduled transmissions, seed {}",
        sim.medium.len(),
        sim.devices.len(),
        sim.scheduled_count(),
        args.seed
    );

    if args.json {
        let mut frames = render::JsonFrames;
        let finished = sim.run(&mut frames, args.max_rounds);
        if !finished {
            info!("stopped after {} rounds with devices still active", sim.round);
        }
    } else {
        let mut console = render::Console::new(args.frame_delay_ms);
        let finished = sim.run(&mut console, args.max_rounds);
        console.print_summary(&sim);
        if !finished {
            info!("stopped after {} rounds with devices still active", sim.round);
        }
    }

    Ok(())
}
