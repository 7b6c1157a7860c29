//! Errors for normal-inverse-gamma inference (hyperparameter validation,
//! data validation, interval estimation and wrapped backend failures).
//!
//! Every fallible operation in the crate returns [`NigResult`]. Errors coming
//! from `ndarray`, `ndarray-stats`, `rand_distr` and `statrs` are normalized
//! into [`NigError`] so callers only match on one type.

use ndarray::ShapeError;
use ndarray_stats::errors::QuantileError;

/// Crate-wide result alias.
pub type NigResult<T> = Result<T, NigError>;

/// Unified error type for normal-inverse-gamma inference.
#[derive(Debug, Clone, PartialEq)]
pub enum NigError {
    // ---- Hyperparameters ----
    /// A hyperparameter is non-finite or outside its domain.
    InvalidParam {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    // ---- Observed data ----
    /// An observation is NaN/±inf.
    NonFiniteData { index: usize, value: f64 },

    /// Finite data whose sufficient statistics or posterior leave the `f64` range.
    DataOverflow { n: usize },

    // ---- Interval estimation ----
    /// Credible level must lie strictly between 0 and 1.
    InvalidLevel { level: f64 },

    /// At least one draw is needed to estimate percentiles.
    EmptyDraws,

    /// Draws must be split into at least one block.
    InvalidChunks,

    /// A draw came out NaN or ±inf, e.g. `sigma2 = inf` when a gamma draw underflows to 0
    /// for a very small `alpha`.
    NonFiniteDraw { index: usize },

    // ---- Backend errors ----
    /// Wrapper for [`ndarray::ShapeError`].
    Shape(ShapeError),

    /// Wrapper for [`ndarray_stats::errors::QuantileError`].
    Quantile(String),

    /// A `rand_distr` or `statrs` distribution rejected its parameters.
    Distribution(String),
}

impl std::error::Error for NigError {}

impl std::fmt::Display for NigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NigError::InvalidParam {
                name,
                value,
                reason,
            } => {
                write!(f, "Hyperparameter {name} is invalid; got: {value}. {reason}")
            }
            NigError::NonFiniteData { index, value } => {
                write!(f, "Data point at index {index} is non-finite: {value}")
            }
            NigError::DataOverflow { n } => {
                write!(f, "Statistics of {n} data points overflow the f64 range.")
            }
            NigError::InvalidLevel { level } => {
                write!(f, "Credible level must satisfy 0 < level < 1; got: {level}")
            }
            NigError::EmptyDraws => {
                write!(f, "Cannot compute percentiles of zero draws.")
            }
            NigError::InvalidChunks => {
                write!(f, "Number of sampling blocks must be at least 1.")
            }
            NigError::NonFiniteDraw { index } => {
                write!(f, "Draw at index {index} is non-finite.")
            }
            NigError::Shape(e) => {
                write!(f, "Array shape error: {e}")
            }
            NigError::Quantile(msg) => {
                write!(f, "Quantile computation failed: {msg}")
            }
            NigError::Distribution(msg) => {
                write!(f, "Distribution rejected its parameters: {msg}")
            }
        }
    }
}

impl From<ShapeError> for NigError {
    fn from(err: ShapeError) -> NigError {
        NigError::Shape(err)
    }
}

impl From<QuantileError> for NigError {
    fn from(err: QuantileError) -> NigError {
        NigError::Quantile(format!("{err:?}"))
    }
}
