//! Error type shared by every module of the crate.

use thiserror::Error;

/// Errors raised by noise modules, builders, rasters and renderers.
///
/// `InvalidParam` is always raised before any state is touched, so the
/// caller can fix the input and retry. `OutOfMemory` leaves the affected
/// raster empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoiseError {
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),
    #[error("Out of memory")]
    OutOfMemory,
    #[error("No source module connected at index {0}")]
    NoModule(usize),
}

impl NoiseError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        NoiseError::InvalidParam(reason.into())
    }
}
