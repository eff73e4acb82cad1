use orrery::{Simulation, SystemConfig};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

/// Runs an orrery without a window and logs where everything is.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// YAML system definition; the built-in solar system if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frames to simulate.
    #[arg(short, long, default_value_t = 600)]
    frames: usize,

    /// Log a body report every this many frames.
    #[arg(short, long, default_value_t = 60)]
    report_every: usize,

    /// Start with the sun free to wobble.
    #[arg(long)]
    unlock_sun: bool,

    #[arg(long)]
    relativity: bool,

    /// Let planets attract each other, not just the sun.
    #[arg(long)]
    interactions: bool,

    /// Compute accelerations with Rayon.
    #[arg(long)]
    parallel: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<SystemConfig> {
    match path {
        Some(p) => SystemConfig::load(p).with_context(|| format!("failed to load {}", p.display())),
        None => Ok(SystemConfig::solar_system()),
    }
}

fn report(sim: &Simulation) {
    info!(
        "frame {}: momentum = ({:.3e}, {:.3e})",
        sim.frame(),
        sim.total_momentum().x,
        sim.total_momentum().y
    );
    for (i, body) in sim.bodies().iter().enumerate() {
        info!(
            "  {:<8} dist {:>8.1}  speed {:>6.3}  trail {:>3}",
            body.name,
            sim.distance_to_reference(i).unwrap_or_default(),
            body.speed(),
            body.trail().len()
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = load_config(args.config.as_ref())?;
    config.physics.relativity |= args.relativity;
    config.physics.pairwise_interactions |= args.interactions;
    if args.unlock_sun {
        config.physics.reference_locked = false;
    }

    let mut sim = Simulation::from_config(&config).context("invalid system definition")?;
    sim.set_use_rayon(args.parallel);

    let every = args.report_every.max(1);
    for _ in 0..args.frames {
        sim.advance();
        if sim.frame() % every == 0 {
            report(&sim);
        }
    }
    Ok(())
}
