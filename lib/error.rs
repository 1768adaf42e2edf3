//! Error type shared by all model-building operations.

use thiserror::Error;

/// Result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A vector or matrix argument does not have the size implied by the
    /// other arguments.
    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    /// A scalar argument is outside its allowed domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    #[error("linear algebra error: {0}")]
    Linalg(#[from] ndarray_linalg::error::LinalgError),

    #[error("malformed model description: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("npz write error: {0}")]
    Npz(#[from] ndarray_npy::WriteNpzError),
}

impl Error {
    pub(crate) fn mismatch<S>(what: S, expected: usize, found: usize) -> Self
    where S: Into<String>
    {
        Self::DimensionMismatch { what: what.into(), expected, found }
    }

    pub(crate) fn invalid<S>(name: &'static str, reason: S) -> Self
    where S: Into<String>
    {
        Self::InvalidParameter { name, reason: reason.into() }
    }
}

/// Return a [`Error::DimensionMismatch`] unless `found == expected`.
pub(crate) fn check_len(what: &str, expected: usize, found: usize)
    -> Result<()>
{
    if expected == found {
        Ok(())
    } else {
        Err(Error::mismatch(what, expected, found))
    }
}
