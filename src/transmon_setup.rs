//! Build the Hamiltonians of a transmon register described in a TOML model
//! file and derive carrier frequencies and a time-step count for the control
//! simulator.
//!
//! ```bash
//! transmon-setup demos/cnot.toml --outdir output/cnot
//! ```
//! writes `setup.npz` (all derived arrays) and `hsys.dat` (the system
//! Hamiltonian, flattened column-major) into the output directory.

use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{ fmt, prelude::*, EnvFilter };
use transmon_model::{
    mkdir,
    config::ModelConfig,
    output::{ write_hamiltonian, write_setup },
    setup::Setup,
};

/// Derive carrier frequencies and time steps for a transmon register.
#[derive(Parser)]
#[command(name = "transmon-setup")]
#[command(version)]
struct Cli {
    /// Path to the model file
    model: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    outdir: PathBuf,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = ModelConfig::load(&cli.model)
        .with_context(|| format!("loading model {}", cli.model.display()))?;
    let setup = Setup::prepare(&config)?;

    let rotfreq = config.rotating_frame();
    for (q, carriers) in setup.carriers.iter().enumerate() {
        let lab: Vec<f64>
            = carriers.frequencies.iter().map(|f| rotfreq[q] + *f).collect();
        info!(
            oscillator = q,
            frequencies_ghz = ?carriers.frequencies,
            lab_frame_ghz = ?lab,
            growth_rates = ?carriers.growth_rates,
            "carrier waves"
        );
    }
    info!(nsteps = setup.nsteps, dt_ns = setup.dt(), "time discretization");

    let outdir = cli.outdir;
    mkdir!(outdir);
    write_setup(outdir.join("setup.npz"), &setup)?;
    write_hamiltonian(outdir.join("hsys.dat"), &setup.hamiltonians.system)?;
    info!(outdir = %outdir.display(), "done");
    Ok(())
}
