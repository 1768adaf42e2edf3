//! Extraction of resonant transition frequencies (carrier waves) and their
//! growth rates from a system Hamiltonian and its control Hamiltonians.

use std::f64::consts::TAU;
use ndarray as nd;
use ndarray_linalg::Eig;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use tracing::{ debug, info, warn };
use crate::{
    error::{ check_len, Result },
    ladder::is_hermitian,
};

/// Transition frequencies (GHz) closer to zero than this are set to exactly
/// zero.
pub const ZERO_FREQ_TOL: f64 = 1e-10;

/// Thresholds for [`get_resonances`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResonanceConfig {
    /// Minimum magnitude of a control matrix element in the energy eigenbasis
    /// for the transition to be reported.
    pub amp_threshold: f64,
    /// Minimum separation, in GHz, between two reported frequencies of the same
    /// oscillator.
    pub prox_threshold: f64,
}

impl Default for ResonanceConfig {
    fn default() -> Self {
        Self { amp_threshold: 6e-2, prox_threshold: 1e-3 }
    }
}

/// Resonances of a single oscillator, in the order they were found.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resonances {
    /// Transition frequencies, GHz.
    pub frequencies: Vec<f64>,
    /// Magnitude of the driving matrix element of each transition.
    pub growth_rates: Vec<f64>,
}

impl Resonances {
    /// Create a new, empty set.
    pub fn new() -> Self { Self::default() }

    /// Number of recorded resonances.
    pub fn len(&self) -> usize { self.frequencies.len() }

    /// Return `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool { self.frequencies.is_empty() }

    /// Record a resonance unless an already recorded frequency lies strictly
    /// closer than `prox` to `frequency`. Returns `true` if it was recorded.
    pub fn try_insert(&mut self, frequency: f64, growth_rate: f64, prox: f64)
        -> bool
    {
        if self.frequencies.iter().any(|f| (frequency - *f).abs() < prox) {
            return false;
        }
        self.frequencies.push(frequency);
        self.growth_rates.push(growth_rate);
        true
    }

    /// Iterate over `(frequency, growth rate)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies.iter().copied().zip(self.growth_rates.iter().copied())
    }

    /// Downstream carrier-wave sets must be non-empty, so an oscillator with
    /// no resonance gets a single zero-frequency carrier with unit rate.
    fn or_zero_carrier(mut self) -> Self {
        if self.is_empty() {
            self.frequencies.push(0.0);
            self.growth_rates.push(1.0);
        }
        self
    }
}

/// Compute the resonant frequencies driven by each oscillator's controls.
///
/// `hsys` is diagonalized, and for each oscillator `q` the operator
/// `hc_re[q] - hc_im[q]` (equal to `2 a_q†`) is transformed into its
/// eigenbasis as `Uᵀ M U`. Every lower-triangle element at least
/// `amp_threshold` in magnitude yields a candidate transition frequency equal
/// to the difference of the two eigenvalues (GHz), which is recorded unless
/// it lies within `prox_threshold` of one already recorded. At least one
/// resonance is returned per oscillator.
///
/// `essential` holds the number of essential levels of each oscillator and is
/// only checked against the number of controls; it is the caller's
/// responsibility that it matches the dimension of `hsys`.
pub fn get_resonances(
    essential: &[usize],
    hsys: &nd::Array2<C64>,
    hc_re: &[nd::Array2<C64>],
    hc_im: &[nd::Array2<C64>],
    config: &ResonanceConfig,
) -> Result<Vec<Resonances>>
{
    let n = hsys.nrows();
    check_len("system Hamiltonian columns", n, hsys.ncols())?;
    check_len("imaginary control Hamiltonians", hc_re.len(), hc_im.len())?;
    check_len("essential levels", hc_re.len(), essential.len())?;
    for H in hc_re.iter().chain(hc_im) {
        check_len("control Hamiltonian rows", n, H.nrows())?;
        check_len("control Hamiltonian columns", n, H.ncols())?;
    }

    info!(
        amp_threshold = config.amp_threshold,
        prox_threshold_ghz = config.prox_threshold,
        "extracting resonances"
    );
    let scale: f64 = hsys.iter().map(|h| h.norm()).fold(1.0, f64::max);
    if !is_hermitian(hsys, 1e-12 * scale) {
        warn!("system Hamiltonian is not Hermitian; discarding imaginary parts of its eigenvalues");
    }

    let (evals, U) = hsys.eig()?;
    let freqs: nd::Array1<f64> = evals.mapv(|e| e.re / TAU);

    let mut resonances: Vec<Resonances> = Vec::with_capacity(hc_re.len());
    for (q, (re, im)) in hc_re.iter().zip(hc_im).enumerate() {
        let M: nd::Array2<C64> = U.t().dot(&(re - im)).dot(&U);
        let mut res = Resonances::new();
        for i in 0..n {
            for j in 0..i {
                let amp = M[[i, j]].norm();
                if amp < config.amp_threshold { continue; }
                let mut df = freqs[i] - freqs[j];
                if df.abs() < ZERO_FREQ_TOL { df = 0.0; }
                if res.try_insert(df, amp, config.prox_threshold) {
                    debug!(
                        oscillator = q,
                        from = j,
                        to = i,
                        frequency_ghz = df,
                        growth_rate = amp,
                        "resonance"
                    );
                }
            }
        }
        resonances.push(res.or_zero_carrier());
    }
    Ok(resonances)
}
