//! System and control Hamiltonians for a register of coupled Duffing
//! oscillators.
//!
//! All input frequencies are in GHz; every generated matrix is in units of
//! angular frequency (rad/ns), so that `exp(-i H t)` with `t` in ns is
//! dimensionless.

use std::f64::consts::{ PI, TAU };
use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::info;
use crate::{
    error::{ check_len, Error, Result },
    ladder::{ dagger, lowering_ops, num_pairs, pair_indices },
};

/// Physical parameters of the oscillator register.
///
/// Pairwise coefficients (`crosskerr`, `jkl`) are indexed by unordered
/// oscillator pair in the order given by [`pair_indices`]; either may be left
/// empty to switch the corresponding coupling off.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HParams {
    /// Total number of levels (essential + guard) of each oscillator.
    pub levels: Vec<usize>,
    /// 0 → 1 transition frequencies, GHz.
    pub freq01: Vec<f64>,
    /// Self-Kerr anharmonicities, GHz.
    pub selfkerr: Vec<f64>,
    /// Cross-Kerr (number-number) coupling coefficients, GHz.
    pub crosskerr: Vec<f64>,
    /// Jaynes-Cummings (exchange) coupling coefficients, GHz.
    pub jkl: Vec<f64>,
    /// Rotating-frame frequencies, GHz. `None` means the lab frame.
    pub rotfreq: Option<Vec<f64>>,
}

impl HParams {
    /// Number of oscillators.
    pub fn num_oscillators(&self) -> usize { self.levels.len() }

    /// Dimension of the composite Hilbert space.
    pub fn dim(&self) -> usize { self.levels.iter().product() }

    /// Rotating-frame frequencies, defaulting to zero for every oscillator.
    pub fn rotating_frame(&self) -> Vec<f64> {
        self.rotfreq.clone()
            .unwrap_or_else(|| vec![0.0; self.num_oscillators()])
    }

    /// Check that every per-oscillator and per-pair vector has the right
    /// length.
    pub fn validate(&self) -> Result<()> {
        let nosc = self.num_oscillators();
        if nosc == 0 {
            return Err(Error::invalid("levels", "no oscillators given"));
        }
        if let Some(q) = self.levels.iter().position(|n| *n == 0) {
            return Err(Error::invalid(
                "levels", format!("oscillator {} has zero levels", q)));
        }
        check_len("freq01", nosc, self.freq01.len())?;
        check_len("selfkerr", nosc, self.selfkerr.len())?;
        if let Some(rot) = &self.rotfreq {
            check_len("rotfreq", nosc, rot.len())?;
        }
        if !self.crosskerr.is_empty() {
            check_len("crosskerr", num_pairs(nosc), self.crosskerr.len())?;
        }
        if !self.jkl.is_empty() {
            check_len("jkl", num_pairs(nosc), self.jkl.len())?;
        }
        Ok(())
    }
}

/// The drift Hamiltonian together with the per-oscillator control
/// Hamiltonians, all in rad/ns on the same composite space.
#[derive(Clone, Debug, PartialEq)]
pub struct Hamiltonians {
    /// Levels of each oscillator the matrices were built on.
    pub levels: Vec<usize>,
    /// System (drift) Hamiltonian.
    pub system: nd::Array2<C64>,
    /// `a_q + a_q†` for every oscillator `q`.
    pub control_re: Vec<nd::Array2<C64>>,
    /// `a_q - a_q†` for every oscillator `q`.
    pub control_im: Vec<nd::Array2<C64>>,
}

impl Hamiltonians {
    /// Dimension of the composite Hilbert space.
    pub fn dim(&self) -> usize { self.system.nrows() }

    /// Number of oscillators.
    pub fn num_oscillators(&self) -> usize { self.control_re.len() }
}

/// Hamiltonian builder for a register of coupled Duffing oscillators.
///
/// The system Hamiltonian is
/// ```text
/// H = Σ_q 2π (f01_q - rot_q) N_q
///   - Σ_q π ξ_q N_q (N_q - 1)
///   - Σ_{q<p} 2π χ_qp N_q N_p
///   + Σ_{q<p} 2π J_qp (a_q† a_p + a_q a_p†)
/// ```
/// with `N_q = a_q† a_q`, self-Kerr `ξ`, cross-Kerr `χ`, and Jaynes-Cummings
/// coupling `J`. Each oscillator carries the control pair `a_q + a_q†` and
/// `a_q - a_q†`.
#[derive(Clone, Debug)]
pub struct HBuilder<'a> {
    pub(crate) params: &'a HParams,
    pub(crate) rotfreq: Vec<f64>,
    pub(crate) a: Vec<nd::Array2<C64>>,
    pub(crate) ad: Vec<nd::Array2<C64>>,
}

impl<'a> HBuilder<'a> {
    /// Create a new `HBuilder`, checking parameter dimensions and setting up
    /// the embedded ladder operators.
    pub fn new(params: &'a HParams) -> Result<Self> {
        params.validate()?;
        let a = lowering_ops(&params.levels)?;
        let ad: Vec<nd::Array2<C64>> = a.iter().map(dagger).collect();
        let rotfreq = params.rotating_frame();
        Ok(Self { params, rotfreq, a, ad })
    }

    /// Get a reference to the parameters.
    pub fn params(&self) -> &HParams { self.params }

    /// Embedded lowering operators, one per oscillator.
    pub fn lowering_ops(&self) -> &[nd::Array2<C64>] { &self.a }

    /// Embedded number operator of oscillator `q`.
    pub fn number_op(&self, q: usize) -> nd::Array2<C64> {
        self.ad[q].dot(&self.a[q])
    }

    /// Compute the system (drift) Hamiltonian.
    pub fn gen_system(&self) -> nd::Array2<C64> {
        let n = self.params.dim();
        let nosc = self.params.num_oscillators();
        let mut H: nd::Array2<C64> = nd::Array2::zeros((n, n));

        let iter
            = self.params.freq01.iter()
            .zip(&self.rotfreq)
            .zip(&self.params.selfkerr)
            .enumerate();
        for (q, ((f01, rot), kerr)) in iter {
            let (a, ad) = (&self.a[q], &self.ad[q]);
            H.scaled_add(C64::from(TAU * (*f01 - *rot)), &ad.dot(a));
            H.scaled_add(C64::from(-PI * *kerr), &ad.dot(ad).dot(a).dot(a));
        }

        for ((q, p), chi) in pair_indices(nosc).zip(&self.params.crosskerr) {
            let NqNp: nd::Array2<C64>
                = self.number_op(q).dot(&self.number_op(p));
            H.scaled_add(C64::from(-TAU * *chi), &NqNp);
        }

        for ((q, p), J) in pair_indices(nosc).zip(&self.params.jkl) {
            let exchange: nd::Array2<C64>
                = self.ad[q].dot(&self.a[p]) + self.a[q].dot(&self.ad[p]);
            H.scaled_add(C64::from(TAU * *J), &exchange);
        }
        H
    }

    /// Compute the control Hamiltonians `(a_q + a_q†, a_q - a_q†)` for every
    /// oscillator.
    pub fn gen_controls(&self)
        -> (Vec<nd::Array2<C64>>, Vec<nd::Array2<C64>>)
    {
        self.a.iter().zip(&self.ad)
            .map(|(a, ad)| (a + ad, a - ad))
            .unzip()
    }

    /// Build the system and control Hamiltonians.
    pub fn build(&self) -> Hamiltonians {
        info!(
            oscillators = self.params.num_oscillators(),
            levels = ?self.params.levels,
            freq01_ghz = ?self.params.freq01,
            rotfreq_ghz = ?self.rotfreq,
            selfkerr_ghz = ?self.params.selfkerr,
            crosskerr_ghz = ?self.params.crosskerr,
            jkl_ghz = ?self.params.jkl,
            "coupled oscillator register set up"
        );
        let system = self.gen_system();
        let (control_re, control_im) = self.gen_controls();
        Hamiltonians {
            levels: self.params.levels.clone(),
            system,
            control_re,
            control_im,
        }
    }
}

/// Build the system and control Hamiltonians for `params`.
pub fn hamiltonians(params: &HParams) -> Result<Hamiltonians> {
    Ok(HBuilder::new(params)?.build())
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;
    use crate::ladder::is_hermitian;
    use super::*;

    fn three_oscillators() -> HParams {
        HParams {
            levels: vec![3, 2, 2],
            freq01: vec![4.1, 4.8, 5.2],
            selfkerr: vec![0.22, 0.23, 0.21],
            crosskerr: vec![0.01, 0.02, 0.005],
            jkl: vec![0.003, 0.0, 0.004],
            rotfreq: Some(vec![4.0, 4.7, 5.1]),
        }
    }

    #[test]
    fn duffing_spectrum() {
        let params = HParams {
            levels: vec![6],
            freq01: vec![5.0],
            selfkerr: vec![0.25],
            rotfreq: Some(vec![4.8]),
            ..HParams::default()
        };
        let H = hamiltonians(&params).unwrap().system;
        for ((i, j), h) in H.indexed_iter() {
            if i == j {
                let n = i as f64;
                let expected = TAU * (5.0 - 4.8) * n - PI * 0.25 * n * (n - 1.0);
                assert_abs_diff_eq!(h.re, expected, epsilon = 1e-10);
                assert_abs_diff_eq!(h.im, 0.0, epsilon = 1e-14);
            } else {
                assert_eq!(h.norm(), 0.0);
            }
        }
    }

    #[test]
    fn lab_frame_by_default() {
        let params = HParams {
            levels: vec![2],
            freq01: vec![3.0],
            selfkerr: vec![0.1],
            ..HParams::default()
        };
        let H = hamiltonians(&params).unwrap().system;
        assert_abs_diff_eq!(H[[1, 1]].re, TAU * 3.0, epsilon = 1e-12);
    }

    #[test]
    fn controls_are_hermitian() {
        let params = three_oscillators();
        let ham = hamiltonians(&params).unwrap();
        assert_eq!(ham.num_oscillators(), 3);
        assert_eq!(ham.dim(), 12);
        for (re, im) in ham.control_re.iter().zip(&ham.control_im) {
            assert!(is_hermitian(re, 1e-14));
            assert!(is_hermitian(&im.mapv(|x| C64::i() * x), 1e-14));
            assert!(!is_hermitian(im, 1e-14));
        }
        assert!(is_hermitian(&ham.system, 1e-12));
        assert!(ham.system.iter().all(|h| h.im == 0.0));
    }

    #[test]
    fn jaynes_cummings_exchange() {
        let params = HParams {
            levels: vec![2, 2],
            freq01: vec![5.0, 5.0],
            selfkerr: vec![0.3, 0.3],
            jkl: vec![0.005],
            rotfreq: Some(vec![5.0, 5.0]),
            ..HParams::default()
        };
        let H = hamiltonians(&params).unwrap().system;
        // |0,1⟩ (index 1) <-> |1,0⟩ (index 2)
        assert_abs_diff_eq!(H[[1, 2]].re, TAU * 0.005, epsilon = 1e-14);
        assert_abs_diff_eq!(H[[2, 1]].re, TAU * 0.005, epsilon = 1e-14);
        let others: f64
            = H.indexed_iter()
            .filter(|((i, j), _)| !matches!((i, j), (1, 2) | (2, 1)))
            .map(|(_, h)| h.norm())
            .sum();
        assert_eq!(others, 0.0);
    }

    #[test]
    fn summation_order_is_irrelevant() {
        let params = three_oscillators();
        let builder = HBuilder::new(&params).unwrap();
        let H = builder.gen_system();
        // diagonal of |2,1,1⟩: every number operator is non-zero
        let k = 11;
        let (n0, n1, n2) = (2.0, 1.0, 1.0);
        let expected
            = TAU * (0.1 * n0 + 0.1 * n1 + 0.1 * n2)
            - PI * 0.22 * n0 * (n0 - 1.0)
            - TAU * (0.01 * n0 * n1 + 0.02 * n0 * n2 + 0.005 * n1 * n2);
        assert_abs_diff_eq!(H[[k, k]].re, expected, epsilon = 1e-10);
        assert_eq!(builder.number_op(0)[[k, k]], C64::from(2.0));
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let mut params = three_oscillators();
        params.freq01.pop();
        assert!(matches!(
            hamiltonians(&params),
            Err(Error::DimensionMismatch { expected: 3, found: 2, .. }),
        ));

        let mut params = three_oscillators();
        params.selfkerr.push(0.1);
        assert!(matches!(
            hamiltonians(&params),
            Err(Error::DimensionMismatch { expected: 3, found: 4, .. }),
        ));

        let mut params = three_oscillators();
        params.rotfreq = Some(vec![0.0]);
        assert!(hamiltonians(&params).is_err());

        let mut params = three_oscillators();
        params.crosskerr = vec![0.01];
        assert!(matches!(
            hamiltonians(&params),
            Err(Error::DimensionMismatch { expected: 3, found: 1, .. }),
        ));

        let params = HParams::default();
        assert!(matches!(
            hamiltonians(&params),
            Err(Error::InvalidParameter { .. }),
        ));
    }
}
