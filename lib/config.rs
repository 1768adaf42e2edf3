//! TOML description of an oscillator register and of the analysis run on it.
//!
//! A minimal model file looks like
//! ```toml
//! essential = [2, 2]
//! guard = [1, 1]
//! freq01 = [4.10595, 4.8152]     # GHz
//! selfkerr = [0.2198, 0.2252]    # GHz
//! crosskerr = [0.01]             # GHz, pairs (0,1), (0,2), ..., (1,2), ...
//! rotfreq = "mean"               # or "lab", or a list in GHz
//! duration = 150.0               # ns
//! maxctrl_mhz = [10.0, 10.0]
//!
//! [resonances]
//! amp_threshold = 0.06
//! prox_threshold = 0.001
//!
//! [timesteps]
//! pmin = 40
//! ```

use std::{ path::Path, str::FromStr };
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ check_len, Error, Result },
    hamiltonian::HParams,
    resonance::ResonanceConfig,
    timesteps::TimestepConfig,
};

/// Named choices of rotating frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    /// No rotation; all rotating-frame frequencies are zero.
    Lab,
    /// Every oscillator rotates at the mean of all 0 → 1 frequencies.
    Mean,
}

/// Rotating-frame frequencies, either named or given explicitly in GHz.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RotatingFrame {
    Named(FrameKind),
    Explicit(Vec<f64>),
}

impl Default for RotatingFrame {
    fn default() -> Self { Self::Named(FrameKind::Lab) }
}

impl RotatingFrame {
    /// Resolve to one frequency per oscillator given the 0 → 1 transition
    /// frequencies.
    pub fn resolve(&self, freq01: &[f64]) -> Vec<f64> {
        match self {
            Self::Named(FrameKind::Lab) => vec![0.0; freq01.len()],
            Self::Named(FrameKind::Mean) => {
                let mean: f64
                    = freq01.iter().sum::<f64>() / freq01.len().max(1) as f64;
                vec![mean; freq01.len()]
            },
            Self::Explicit(rot) => rot.clone(),
        }
    }
}

/// Model of an oscillator register, the pulse it is driven with, and the
/// thresholds used to analyze it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Essential levels per oscillator.
    pub essential: Vec<usize>,
    /// Guard levels per oscillator; empty means none.
    #[serde(default)]
    pub guard: Vec<usize>,
    /// 0 → 1 transition frequencies, GHz.
    pub freq01: Vec<f64>,
    /// Self-Kerr anharmonicities, GHz.
    pub selfkerr: Vec<f64>,
    /// Cross-Kerr coefficients per oscillator pair, GHz.
    #[serde(default)]
    pub crosskerr: Vec<f64>,
    /// Jaynes-Cummings coefficients per oscillator pair, GHz.
    #[serde(default)]
    pub jkl: Vec<f64>,
    #[serde(default)]
    pub rotfreq: RotatingFrame,
    /// Pulse duration, ns.
    pub duration: f64,
    /// Bound on the control amplitude of each oscillator, MHz. Entries past
    /// the number of oscillators are ignored.
    pub maxctrl_mhz: Vec<f64>,
    #[serde(default)]
    pub resonances: ResonanceConfig,
    #[serde(default)]
    pub timesteps: TimestepConfig,
}

impl FromStr for ModelConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

impl ModelConfig {
    /// Read a model file and validate it.
    pub fn load<P>(path: P) -> Result<Self>
    where P: AsRef<Path>
    {
        let content = std::fs::read_to_string(path)?;
        let config: Self = content.parse()?;
        config.validate()?;
        Ok(config)
    }

    /// Number of oscillators.
    pub fn num_oscillators(&self) -> usize { self.essential.len() }

    /// Guard levels per oscillator, zero where none were given.
    pub fn guard_levels(&self) -> Vec<usize> {
        if self.guard.is_empty() {
            vec![0; self.num_oscillators()]
        } else {
            self.guard.clone()
        }
    }

    /// Essential plus guard levels per oscillator.
    pub fn total_levels(&self) -> Vec<usize> {
        self.essential.iter().zip(self.guard_levels())
            .map(|(ne, ng)| *ne + ng)
            .collect()
    }

    /// Rotating-frame frequency of every oscillator, GHz.
    pub fn rotating_frame(&self) -> Vec<f64> {
        self.rotfreq.resolve(&self.freq01)
    }

    /// Hamiltonian parameters on the total (essential + guard) levels.
    pub fn hamiltonian_params(&self) -> HParams {
        HParams {
            levels: self.total_levels(),
            freq01: self.freq01.clone(),
            selfkerr: self.selfkerr.clone(),
            crosskerr: self.crosskerr.clone(),
            jkl: self.jkl.clone(),
            rotfreq: Some(self.rotating_frame()),
        }
    }

    /// Check all lengths and scalar domains.
    pub fn validate(&self) -> Result<()> {
        let nosc = self.num_oscillators();
        if nosc == 0 {
            return Err(Error::invalid("essential", "no oscillators given"));
        }
        if let Some(q) = self.essential.iter().position(|n| *n == 0) {
            return Err(Error::invalid(
                "essential",
                format!("oscillator {} has no essential levels", q),
            ));
        }
        if !self.guard.is_empty() {
            check_len("guard", nosc, self.guard.len())?;
        }
        if self.maxctrl_mhz.len() < nosc {
            return Err(Error::mismatch(
                "maxctrl_mhz (at least one per oscillator)",
                nosc,
                self.maxctrl_mhz.len(),
            ));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(Error::invalid(
                "duration",
                format!("must be finite and positive, got {}", self.duration),
            ));
        }
        let ResonanceConfig { amp_threshold, prox_threshold } = self.resonances;
        if !(amp_threshold >= 0.0 && prox_threshold >= 0.0) {
            return Err(Error::invalid(
                "resonances",
                format!(
                    "thresholds must be non-negative, got {} and {}",
                    amp_threshold,
                    prox_threshold,
                ),
            ));
        }
        self.hamiltonian_params().validate()
    }
}
