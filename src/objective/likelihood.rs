//! Normal log-likelihood and its derivatives with respect to μ.
//!
//! [`Objective`] pairs a borrowed [`Sample`] with its [`ObjectiveState`]
//! so repeated evaluations cost O(1). The free functions are one-shot
//! conveniences that build the state on every call.
//!
//! ┌ `log_likelihood(μ, σ)`      : -n/2·ln(2πσ²) − Σ(xᵢ−μ)²/(2σ²)
//! ├ `score_mu(μ, σ)`            : Σ(xᵢ−μ)/σ²
//! ├ `info_mu(σ)`                : n/σ²
//! ├ `likelihood_of_sigma(σ, μ)` : log-likelihood in σ, μ fixed
//! └ `likelihood_of_mu(μ, σ)`    : log-likelihood in μ, σ fixed

use std::f64::consts::PI;

use super::errors::ObjectiveError;
use super::sample::Sample;
use super::state::ObjectiveState;

#[inline]
fn check_mu(mu: f64) -> Result<f64, ObjectiveError> {
    if !mu.is_finite() {
        return Err(ObjectiveError::InvalidParameter { name: "mu", value: mu });
    }
    Ok(mu)
}

#[inline]
fn check_sigma(sigma: f64) -> Result<f64, ObjectiveError> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ObjectiveError::InvalidParameter { name: "sigma", value: sigma });
    }
    Ok(sigma)
}

#[derive(Debug, Copy, Clone)]
pub struct Objective<'a> {
    sample: &'a Sample,
    state: ObjectiveState,
}

impl<'a> Objective<'a> {
    pub fn new(sample: &'a Sample) -> Self {
        Self { sample, state: ObjectiveState::new(sample) }
    }

    /// Reuses a state computed earlier for the same sample.
    pub fn with_state(sample: &'a Sample, state: ObjectiveState) -> Self {
        Self { sample, state }
    }

    #[inline] pub fn sample(&self) -> &'a Sample { self.sample }
    #[inline] pub fn state(&self) -> &ObjectiveState { &self.state }

    /// Normal log-likelihood of `(mu, sigma)`.
    ///
    /// # Errors
    /// - [`ObjectiveError::InvalidParameter`] if `sigma <= 0`, or either
    ///   parameter is non-finite.
    pub fn log_likelihood(&self, mu: f64, sigma: f64) -> Result<f64, ObjectiveError> {
        let mu = check_mu(mu)?;
        let sigma = check_sigma(sigma)?;
        let n = self.state.n() as f64;
        let var = sigma * sigma;

        Ok(-0.5 * n * (2.0 * PI * var).ln() - self.state.sum_sq_dev_about(mu) / (2.0 * var))
    }

    /// ∂ℓ/∂μ = Σ(xᵢ − μ) / σ²
    pub fn score_mu(&self, mu: f64, sigma: f64) -> Result<f64, ObjectiveError> {
        let mu = check_mu(mu)?;
        let sigma = check_sigma(sigma)?;
        Ok(self.state.sum_dev(mu) / (sigma * sigma))
    }

    /// −∂²ℓ/∂μ² = n / σ². Strictly positive for any valid σ.
    pub fn info_mu(&self, sigma: f64) -> Result<f64, ObjectiveError> {
        let sigma = check_sigma(sigma)?;
        Ok(self.state.n() as f64 / (sigma * sigma))
    }

    pub fn likelihood_of_sigma(&self, sigma: f64, mu: f64) -> Result<f64, ObjectiveError> {
        self.log_likelihood(mu, sigma)
    }

    pub fn likelihood_of_mu(&self, mu: f64, sigma: f64) -> Result<f64, ObjectiveError> {
        self.log_likelihood(mu, sigma)
    }
}


pub fn log_likelihood(mu: f64, sigma: f64, sample: &Sample) -> Result<f64, ObjectiveError> {
    Objective::new(sample).log_likelihood(mu, sigma)
}

pub fn score_mu(mu: f64, sigma: f64, sample: &Sample) -> Result<f64, ObjectiveError> {
    Objective::new(sample).score_mu(mu, sigma)
}

pub fn info_mu(sigma: f64, sample: &Sample) -> Result<f64, ObjectiveError> {
    Objective::new(sample).info_mu(sigma)
}

pub fn likelihood_of_sigma(sigma: f64, mu: f64, sample: &Sample) -> Result<f64, ObjectiveError> {
    Objective::new(sample).likelihood_of_sigma(sigma, mu)
}

pub fn likelihood_of_mu(mu: f64, sigma: f64, sample: &Sample) -> Result<f64, ObjectiveError> {
    Objective::new(sample).likelihood_of_mu(mu, sigma)
}
