//! Heuristic estimate of the number of time steps needed to resolve the
//! dynamics generated by a system Hamiltonian under maximal control.

use std::f64::consts::TAU;
use ndarray as nd;
use ndarray_linalg::EigVals;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use tracing::debug;
use crate::error::{ check_len, Error, Result };

/// Parameters for [`estimate_timesteps`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestepConfig {
    /// Minimum number of time points per period of the fastest dynamics.
    pub pmin: f64,
}

impl Default for TimestepConfig {
    fn default() -> Self { Self { pmin: 40.0 } }
}

/// Convert a control amplitude in MHz to angular frequency in rad/ns.
pub fn mhz_to_radns(amp_mhz: f64) -> f64 { amp_mhz * TAU / 1e3 }

/// Estimate the number of time steps required to evolve over a total time
/// `duration` (ns).
///
/// The worst-case Hamiltonian
/// ```text
/// K = H_sys + Σ_q a_q (H_re,q + i H_im,q)
/// ```
/// is formed with `a_q` the maximum control amplitude of oscillator `q`
/// (`maxctrl_mhz`, converted to rad/ns). The returned step count is
/// `ceil(duration * ρ(K) * pmin / 2π)` for spectral radius `ρ`.
///
/// This is an upper-bound heuristic only: it does not account for quickly
/// varying control signals or dense spline parameterizations, so the resulting
/// resolution of the control functions should be checked independently.
pub fn estimate_timesteps(
    duration: f64,
    hsys: &nd::Array2<C64>,
    hc_re: &[nd::Array2<C64>],
    hc_im: &[nd::Array2<C64>],
    maxctrl_mhz: &[f64],
    config: &TimestepConfig,
) -> Result<usize>
{
    if maxctrl_mhz.len() < hc_re.len() {
        return Err(Error::mismatch(
            "maximum control amplitudes (at least one per control)",
            hc_re.len(),
            maxctrl_mhz.len(),
        ));
    }
    check_len("imaginary control Hamiltonians", hc_re.len(), hc_im.len())?;
    let n = hsys.nrows();
    check_len("system Hamiltonian columns", n, hsys.ncols())?;
    for H in hc_re.iter().chain(hc_im) {
        check_len("control Hamiltonian rows", n, H.nrows())?;
        check_len("control Hamiltonian columns", n, H.ncols())?;
    }
    if !duration.is_finite() || duration < 0.0 {
        return Err(Error::invalid(
            "duration", format!("must be finite and non-negative, got {}", duration)));
    }
    if !config.pmin.is_finite() || config.pmin <= 0.0 {
        return Err(Error::invalid(
            "pmin", format!("must be finite and positive, got {}", config.pmin)));
    }

    let mut K: nd::Array2<C64> = hsys.clone();
    let iter = hc_re.iter().zip(hc_im).zip(maxctrl_mhz);
    for ((re, im), amp_mhz) in iter {
        let amp = mhz_to_radns(*amp_mhz);
        K.scaled_add(C64::from(amp), re);
        K.scaled_add(C64::new(0.0, amp), im);
    }

    let maxeig: f64
        = K.eigvals()?
        .iter()
        .map(|e| e.norm())
        .fold(0.0, f64::max);
    let samplerate = maxeig * config.pmin / TAU;
    let nsteps = (duration * samplerate).ceil() as usize;
    debug!(
        spectral_radius = maxeig,
        samplerate_per_ns = samplerate,
        nsteps,
        "estimated time steps"
    );
    Ok(nsteps)
}

#[cfg(test)]
mod test {
    use crate::hamiltonian::{ hamiltonians, HParams, Hamiltonians };
    use super::*;

    fn two_transmons() -> Hamiltonians {
        let params = HParams {
            levels: vec![3, 3],
            freq01: vec![4.10595, 4.8152],
            selfkerr: vec![0.2198, 0.2252],
            crosskerr: vec![0.01],
            rotfreq: Some(vec![4.460575; 2]),
            ..HParams::default()
        };
        hamiltonians(&params).unwrap()
    }

    #[test]
    fn monotone_in_duration() {
        let ham = two_transmons();
        let config = TimestepConfig::default();
        let steps: Vec<usize>
            = [0.0, 10.0, 50.0, 100.0, 150.0, 400.0].iter()
            .map(|t| {
                estimate_timesteps(
                    *t,
                    &ham.system,
                    &ham.control_re,
                    &ham.control_im,
                    &[10.0, 10.0],
                    &config,
                ).unwrap()
            })
            .collect();
        assert_eq!(steps[0], 0);
        assert!(steps.windows(2).all(|w| w[0] <= w[1]));
        assert!(*steps.last().unwrap() > 0);
    }

    #[test]
    fn monotone_in_pmin() {
        let ham = two_transmons();
        let steps: Vec<usize>
            = [1.0, 10.0, 20.0, 40.0, 80.0].iter()
            .map(|p| {
                estimate_timesteps(
                    150.0,
                    &ham.system,
                    &ham.control_re,
                    &ham.control_im,
                    &[10.0, 10.0, 5.0],
                    &TimestepConfig { pmin: *p },
                ).unwrap()
            })
            .collect();
        assert!(steps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn closed_form_without_controls() {
        // single two-level oscillator at 1 GHz in the lab frame: ρ = 2π rad/ns,
        // so 40 points per ns
        let params = HParams {
            levels: vec![2],
            freq01: vec![1.0],
            selfkerr: vec![0.0],
            ..HParams::default()
        };
        let ham = hamiltonians(&params).unwrap();
        let nsteps = estimate_timesteps(
            10.0,
            &ham.system,
            &ham.control_re,
            &ham.control_im,
            &[0.0],
            &TimestepConfig::default(),
        ).unwrap();
        assert!((400..=401).contains(&nsteps));
    }

    #[test]
    fn rejects_short_amplitude_list() {
        let ham = two_transmons();
        let res = estimate_timesteps(
            100.0,
            &ham.system,
            &ham.control_re,
            &ham.control_im,
            &[10.0],
            &TimestepConfig::default(),
        );
        assert!(matches!(
            res,
            Err(Error::DimensionMismatch { expected: 2, found: 1, .. }),
        ));
    }

    #[test]
    fn rejects_mismatched_matrices() {
        let ham = two_transmons();
        let small = hamiltonians(
            &HParams {
                levels: vec![2],
                freq01: vec![4.1],
                selfkerr: vec![0.2],
                ..HParams::default()
            }
        ).unwrap();
        let config = TimestepConfig::default();
        assert!(matches!(
            estimate_timesteps(
                100.0,
                &ham.system,
                &small.control_re,
                &small.control_im,
                &[10.0],
                &config,
            ),
            Err(Error::DimensionMismatch { expected: 9, found: 2, .. }),
        ));

        let rect: nd::Array2<C64> = nd::Array2::zeros((9, 8));
        assert!(matches!(
            estimate_timesteps(
                100.0, &rect, &[], &[], &[], &config),
            Err(Error::DimensionMismatch { expected: 9, found: 8, .. }),
        ));
    }

    #[test]
    fn rejects_bad_scalars() {
        let ham = two_transmons();
        let est = |t: f64, pmin: f64| {
            estimate_timesteps(
                t,
                &ham.system,
                &ham.control_re,
                &ham.control_im,
                &[10.0, 10.0],
                &TimestepConfig { pmin },
            )
        };
        assert!(matches!(est(-1.0, 40.0), Err(Error::InvalidParameter { .. })));
        assert!(matches!(est(f64::NAN, 40.0), Err(Error::InvalidParameter { .. })));
        assert!(matches!(est(10.0, 0.0), Err(Error::InvalidParameter { .. })));
    }
}
