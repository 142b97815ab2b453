//! Shared optimizer error types.
//!
//! ┌ [`OptimizationError`] : common runtime and configuration errors
//! │   ├ non-finite objective evaluation
//! │   ├ invalid tolerance
//! │   └ invalid max_iter
//! │
//! └ [`FailureKind`]       : coarse classification of any optimizer failure,
//!                           used when comparing methods side by side

use serde::Serialize;
use thiserror::Error;


/// Optimizer runtime and configuration errors shared by every method.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum OptimizationError {
    #[error("objective non-finite at x={x}, f(x)={fx}")]
    NonFiniteEvaluation { x: f64, fx: f64 },

    #[error("invalid tolerance: must be finite and > 0. got {got}")]
    InvalidTolerance { got: f64 },

    #[error("invalid max_iter: must be >= 1. got max_iter={got}")]
    InvalidMaxIter { got: usize },
}


/// Failure taxonomy shared across methods.
///
/// ┌ `InvalidParameter`    : σ <= 0 (or a non-finite parameter) reached the objective
/// ├ `DegenerateObjective` : a required quantity (variance, step) is zero or non-finite
/// ├ `InvalidBracket`      : bracket ordering or sign-change precondition failed
/// └ `InvalidConfig`       : tolerance / max_iter / initial guess rejected
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    InvalidParameter,
    DegenerateObjective,
    InvalidBracket,
    InvalidConfig,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FailureKind::InvalidParameter    => "invalid_parameter",
            FailureKind::DegenerateObjective => "degenerate_objective",
            FailureKind::InvalidBracket      => "invalid_bracket",
            FailureKind::InvalidConfig       => "invalid_config",
        };
        write!(f, "{s}")
    }
}

impl OptimizationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            OptimizationError::NonFiniteEvaluation { .. } => FailureKind::DegenerateObjective,
            OptimizationError::InvalidTolerance { .. }
            | OptimizationError::InvalidMaxIter { .. }    => FailureKind::InvalidConfig,
        }
    }
}
