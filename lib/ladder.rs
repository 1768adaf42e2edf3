//! Ladder operators for truncated harmonic oscillators and their embedding into
//! a composite Hilbert space.
//!
//! Oscillator 0 is always the leftmost (most significant) factor of the
//! Kronecker product, so that the composite basis index of the product state
//! `|n_0, n_1, ..., n_{Q-1}⟩` is the mixed-radix number with digits `n_q`.

use itertools::Itertools;
use ndarray::{ self as nd, linalg::kron };
use num_complex::Complex64 as C64;
use crate::error::{ check_len, Error, Result };

/// Identity operator of dimension `n`.
pub fn ident(n: usize) -> nd::Array2<C64> { nd::Array2::eye(n) }

/// Lowering operator of dimension `n`.
///
/// Acts as `a|k⟩ = √k |k - 1⟩`, so the only non-zero entries are
/// `a[[k - 1, k]] = √k` for `k = 1, ..., n - 1`.
pub fn lowering(n: usize) -> nd::Array2<C64> {
    let mut a: nd::Array2<C64> = nd::Array2::zeros((n, n));
    (1..n).for_each(|k| { a[[k - 1, k]] = C64::from((k as f64).sqrt()); });
    a
}

/// Number operator of dimension `n`.
pub fn number(n: usize) -> nd::Array2<C64> {
    let diag: nd::Array1<C64> = (0..n).map(|k| C64::from(k as f64)).collect();
    nd::Array2::from_diag(&diag)
}

/// Conjugate transpose.
pub fn dagger(A: &nd::Array2<C64>) -> nd::Array2<C64> {
    A.t().mapv(|a| a.conj())
}

/// Return `true` if `A` is square and equal to its conjugate transpose to
/// within `tol` in every element.
pub fn is_hermitian(A: &nd::Array2<C64>, tol: f64) -> bool {
    A.is_square()
        && A.indexed_iter()
            .all(|((i, j), a)| (*a - A[[j, i]].conj()).norm() <= tol)
}

/// Embed the single-oscillator operator `op` at position `q` of the composite
/// space with sub-system dimensions `dims`, placing identities on every other
/// factor.
pub fn embed(dims: &[usize], q: usize, op: &nd::Array2<C64>)
    -> Result<nd::Array2<C64>>
{
    let Some(&n) = dims.get(q) else {
        return Err(Error::invalid(
            "q",
            format!("oscillator {} does not exist among {}", q, dims.len()),
        ));
    };
    check_len("embedded operator rows", n, op.nrows())?;
    check_len("embedded operator columns", n, op.ncols())?;
    let embedded: nd::Array2<C64>
        = dims.iter().enumerate()
        .fold(nd::Array2::<C64>::eye(1), |acc, (k, &nk)| {
            if k == q { kron(&acc, op) } else { kron(&acc, &ident(nk)) }
        });
    Ok(embedded)
}

/// Embedded lowering operators `a_q` for every oscillator in the composite
/// space with sub-system dimensions `dims`.
pub fn lowering_ops(dims: &[usize]) -> Result<Vec<nd::Array2<C64>>> {
    dims.iter().enumerate()
        .map(|(q, &n)| embed(dims, q, &lowering(n)))
        .collect()
}

/// Unordered oscillator pairs `(q, p)`, `q < p`, in canonical order
/// `(0, 1), (0, 2), ..., (1, 2), ...`.
///
/// Pairwise coupling coefficients are always indexed in this order.
pub fn pair_indices(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).tuple_combinations()
}

/// Number of unordered oscillator pairs among `n` oscillators.
pub fn num_pairs(n: usize) -> usize { n * n.saturating_sub(1) / 2 }
