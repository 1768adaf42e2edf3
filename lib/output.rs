//! Serialization of a [`Setup`] for the external control simulator and for
//! later inspection.
//!
//! Matrices are stored row-major in memory everywhere in this crate. The
//! simulator reads flattened matrices in column-major order, so
//! [`write_hamiltonian`] goes through [`flatten_column_major`]; arrays in
//! `.npz` archives keep their natural (row, column) shape instead.

use std::{
    fs::File,
    io::{ BufWriter, Write },
    path::Path,
};
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    error::Result,
    setup::Setup,
    write_npz,
};

/// Entries of `A` in column-major order.
pub fn flatten_column_major(A: &nd::Array2<C64>) -> Vec<C64> {
    A.t().iter().copied().collect()
}

/// Write `A` as a flat text file in column-major order, one `re im` pair per
/// line.
pub fn write_hamiltonian<P>(path: P, A: &nd::Array2<C64>) -> Result<()>
where P: AsRef<Path>
{
    let mut out = BufWriter::new(File::create(path)?);
    for a in flatten_column_major(A) {
        writeln!(out, "{:.16e} {:.16e}", a.re, a.im)?;
    }
    out.flush()?;
    Ok(())
}

fn stack(mats: &[nd::Array2<C64>], n: usize) -> nd::Array3<C64> {
    nd::Array3::from_shape_fn((mats.len(), n, n), |(q, i, j)| mats[q][[i, j]])
}

/// Write all arrays of `setup` to a `.npz` archive.
///
/// Carrier frequencies and growth rates of all oscillators are concatenated;
/// `carrier_counts` gives the number belonging to each oscillator.
pub fn write_setup<P>(path: P, setup: &Setup) -> Result<()>
where P: AsRef<Path>
{
    let ham = &setup.hamiltonians;
    let n = ham.dim();
    let levels: nd::Array1<u64>
        = ham.levels.iter().map(|l| *l as u64).collect();
    let essential: nd::Array1<u64>
        = setup.essential.iter().map(|l| *l as u64).collect();
    let carrier_freqs: nd::Array1<f64>
        = setup.carriers.iter()
        .flat_map(|c| c.frequencies.iter().copied())
        .collect();
    let growth_rates: nd::Array1<f64>
        = setup.carriers.iter()
        .flat_map(|c| c.growth_rates.iter().copied())
        .collect();
    let carrier_counts: nd::Array1<u64>
        = setup.carriers.iter().map(|c| c.len() as u64).collect();

    write_npz!(
        path.as_ref(),
        arrays: {
            "levels" => &levels,
            "essential" => &essential,
            "hsys" => &ham.system,
            "hc_re" => &stack(&ham.control_re, n),
            "hc_im" => &stack(&ham.control_im, n),
            "carrier_freqs" => &carrier_freqs,
            "growth_rates" => &growth_rates,
            "carrier_counts" => &carrier_counts,
            "duration" => &nd::array![setup.duration],
            "nsteps" => &nd::array![setup.nsteps as u64],
            "dt" => &nd::array![setup.dt()],
        }
    );
    Ok(())
}
