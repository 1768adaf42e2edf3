//! Small filesystem helpers for binaries writing results.

pub use ndarray_npy::NpzWriter;

/// Create a directory and all of its parents if it does not already exist.
///
/// Expands to a `?`-propagating expression, so it can only be used in
/// functions returning a `Result` whose error type is `From<std::io::Error>`.
#[macro_export]
macro_rules! mkdir {
    ( $dir:expr ) => {
        if !$dir.is_dir() {
            std::fs::create_dir_all(&$dir)?;
        }
    }
}

/// Write a collection of arrays to a `.npz` archive.
///
/// ```ignore
/// write_npz!(
///     outdir.join("data.npz"),
///     arrays: {
///         "time" => &time,
///         "psi" => &psi,
///     }
/// );
/// ```
/// Errors are propagated with `?`, so the calling function's error type must
/// be `From<std::io::Error>` and `From<ndarray_npy::WriteNpzError>`.
#[macro_export]
macro_rules! write_npz {
    (
        $filename:expr,
        arrays: { $( $name:expr => $arr:expr ),* $(,)? }
    ) => {
        {
            let mut __npz
                = $crate::utils::NpzWriter::new(
                    std::fs::File::create($filename)?);
            $( __npz.add_array($name, $arr)?; )*
            __npz.finish()?;
        }
    }
}
