//! Objective error types.
//!
//! ┌ [`ObjectiveError::InvalidParameter`]     : μ or σ outside its domain
//! ├ [`ObjectiveError::EmptySample`]          : sample with no observations
//! └ [`ObjectiveError::NonFiniteObservation`] : NaN/inf observation

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ObjectiveError {
    #[error("invalid parameter `{name}`: got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("empty sample: at least one observation is required")]
    EmptySample,

    #[error("non-finite observation at index {index}: got {value}")]
    NonFiniteObservation { index: usize, value: f64 },
}
