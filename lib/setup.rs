//! Everything the control simulator needs for one model, derived in one pass.

use tracing::info;
use crate::{
    config::ModelConfig,
    error::{ Error, Result },
    hamiltonian::{ HBuilder, Hamiltonians },
    resonance::{ get_resonances, Resonances },
    timesteps::estimate_timesteps,
};

/// Hamiltonians, carrier frequencies, and time discretization for a model.
#[derive(Clone, Debug, PartialEq)]
pub struct Setup {
    /// Essential levels per oscillator.
    pub essential: Vec<usize>,
    /// Hamiltonians on the total (essential + guard) levels.
    pub hamiltonians: Hamiltonians,
    /// Carrier frequencies and growth rates per oscillator.
    pub carriers: Vec<Resonances>,
    /// Pulse duration, ns.
    pub duration: f64,
    /// Number of time steps.
    pub nsteps: usize,
}

impl Setup {
    /// Build the Hamiltonians of `config` and derive carriers and the step
    /// count from them.
    pub fn prepare(config: &ModelConfig) -> Result<Self> {
        config.validate()?;
        let params = config.hamiltonian_params();
        let hamiltonians = HBuilder::new(&params)?.build();
        let Hamiltonians { system, control_re, control_im, .. } = &hamiltonians;
        let carriers = get_resonances(
            &config.essential,
            system,
            control_re,
            control_im,
            &config.resonances,
        )?;
        let nsteps = estimate_timesteps(
            config.duration,
            system,
            control_re,
            control_im,
            &config.maxctrl_mhz,
            &config.timesteps,
        )?;
        if nsteps == 0 {
            return Err(Error::invalid(
                "nsteps",
                "spectral radius of the driven Hamiltonian is zero; no time scale to resolve",
            ));
        }
        info!(
            dim = hamiltonians.dim(),
            carriers = ?carriers.iter().map(|c| c.len()).collect::<Vec<_>>(),
            nsteps,
            "model prepared"
        );
        Ok(Self {
            essential: config.essential.clone(),
            hamiltonians,
            carriers,
            duration: config.duration,
            nsteps,
        })
    }

    /// Time step size, ns.
    pub fn dt(&self) -> f64 { self.duration / self.nsteps as f64 }

    /// Total number of carrier waves across all oscillators.
    pub fn num_carriers(&self) -> usize {
        self.carriers.iter().map(|c| c.len()).sum()
    }
}
