//! Maximum likelihood estimation of Normal parameters with three scalar
//! optimizers: Newton's method and bisection on the score for μ, and
//! golden-section search on the log-likelihood for σ.

pub mod objective;
pub mod optimization;
pub mod estimator;
pub mod cli;
