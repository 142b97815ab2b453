//! Newton's method on the score ∂ℓ/∂μ.

use super::algorithms::{Algorithm, GLOBAL_MAX_ITER_FALLBACK};
use super::config::{CommonCfg, impl_common_cfg, resolve_sigma};
use super::errors::{FailureKind, OptimizationError};
use super::report::{OptimizationReport, Termination, ToleranceSatisfied};
use super::trace::{Trace, TracePoint};
use crate::objective::{Objective, ObjectiveError, Sample};
use thiserror::Error;


#[derive(Debug, Error)]
pub enum NewtonError {
    #[error(transparent)]
    Optimization(#[from] OptimizationError),

    #[error(transparent)]
    Objective(#[from] ObjectiveError),

    #[error("invalid initial guess: x0={x0} must be finite")]
    InvalidGuess { x0: f64 },

    #[error("degenerate objective: sigma^2={variance} must be finite and > 0")]
    DegenerateObjective { variance: f64 },

    #[error("step non-finite at mu={mu}, step={step}; mu + step undefined")]
    StepNotFinite { mu: f64, step: f64 },
}

impl NewtonError {
    pub fn kind(&self) -> FailureKind {
        match self {
            NewtonError::Optimization(e)              => e.kind(),
            NewtonError::Objective(_)                 => FailureKind::InvalidParameter,
            NewtonError::InvalidGuess { .. }          => FailureKind::InvalidConfig,
            NewtonError::DegenerateObjective { .. }
            | NewtonError::StepNotFinite { .. }       => FailureKind::DegenerateObjective,
        }
    }
}


/// Where Newton starts.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InitialGuess {
    Fixed(f64),
    Median,
}


/// Newton configuration.
///
/// # Fields
/// - `common` : [`CommonCfg`] with tolerance and optional `max_iter`.
/// - `x0`     : starting point (default: `Fixed(0.0)`).
/// - `sigma`  : σ held fixed while solving for μ (default: population std).
///
/// # Defaults
/// - If `common.max_iter` is `None`, [`newton`] resolves it using
///   [`Algorithm::default_max_iter`], or [`GLOBAL_MAX_ITER_FALLBACK`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NewtonCfg {
    common: CommonCfg,
    x0: InitialGuess,
    sigma: Option<f64>,
}
impl NewtonCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common: CommonCfg::new(),
            x0: InitialGuess::Fixed(0.0),
            sigma: None,
        }
    }
    pub fn set_x0(mut self, v: f64) -> Result<Self, NewtonError> {
        if !v.is_finite() {
            return Err(NewtonError::InvalidGuess { x0: v });
        }
        self.x0 = InitialGuess::Fixed(v);
        Ok(self)
    }
    #[must_use]
    pub fn start_at_median(mut self) -> Self {
        self.x0 = InitialGuess::Median;
        self
    }
    pub fn set_sigma(mut self, v: f64) -> Result<Self, NewtonError> {
        if !v.is_finite() || v <= 0.0 {
            return Err(ObjectiveError::InvalidParameter { name: "sigma", value: v }.into());
        }
        self.sigma = Some(v);
        Ok(self)
    }

    #[inline] pub fn x0(&self) -> InitialGuess { self.x0 }
    #[inline] pub fn sigma(&self) -> Option<f64> { self.sigma }
}
impl Default for NewtonCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(NewtonCfg);


#[inline]
fn eval_score_checked(
    objective: &Objective<'_>,
    mu: f64,
    sigma: f64,
    evals: &mut usize
) -> Result<f64, NewtonError> {
    let score = { *evals += 1; objective.score_mu(mu, sigma)? };
    if !score.is_finite() {
        return Err(OptimizationError::NonFiniteEvaluation { x: mu, fx: score }.into());
    }

    Ok(score)
}


/// Estimates μ by
/// [Newton's method](https://en.wikipedia.org/wiki/Newton%27s_method_in_optimization)
/// on the score, with σ held fixed.
///
/// Update: `μ_{k+1} = μ_k + score(μ_k) / info`, with `info = n/σ²`.
/// The score is linear in μ, so the first step lands on the sample mean;
/// the loop confirms it and records the trace.
///
/// # Returns
/// [`OptimizationReport`] with:
/// - `estimate`            : μ̂
/// - `objective`           : ℓ(μ̂, σ)
/// - `iterations`          : Newton steps taken, 0 if `x0` already satisfies the score tolerance
/// - `evaluations`         : score evaluations
/// - `termination`         : [`Termination::Converged`] or [`Termination::MaxIterationsReached`]
/// - `tolerance_satisfied` : score, step size or machine precision
/// - `bracket`             : `None`
/// - `algorithm_name`      : "newton"
///
/// # Errors
/// - [`NewtonError::DegenerateObjective`] : σ² zero or non-finite
/// - [`NewtonError::StepNotFinite`]       : `μ + step` not representable
/// - [`NewtonError::InvalidGuess`]        : `x0` non-finite
///
/// * Propagated via [`NewtonError::Optimization`]:
/// - [`OptimizationError::NonFiniteEvaluation`] : score produced NaN/inf
pub fn newton(sample: &Sample, cfg: NewtonCfg) -> Result<OptimizationReport, NewtonError> {
    newton_on(&Objective::new(sample), cfg)
}

/// [`newton`] over a prebuilt [`Objective`], reusing its sufficient statistics.
pub fn newton_on(
    objective: &Objective<'_>,
    cfg: NewtonCfg
) -> Result<OptimizationReport, NewtonError> {
    let algorithm = Algorithm::NEWTON;
    let algo_name = algorithm.algorithm_name();

    let tol      = cfg.tol();
    let num_iter = cfg
        .max_iter()
        .or(algorithm.default_max_iter())
        .unwrap_or(GLOBAL_MAX_ITER_FALLBACK);

    let sigma = resolve_sigma(cfg.sigma, objective.state())
        .map_err(|variance| NewtonError::DegenerateObjective { variance })?;
    let info  = objective.info_mu(sigma)?;

    let x0 = match cfg.x0 {
        InitialGuess::Fixed(v) => v,
        InitialGuess::Median   => objective.state().median(),
    };
    if !x0.is_finite() {
        return Err(NewtonError::InvalidGuess { x0 });
    }

    let mut evals = 0;
    let mut trace = Trace::new();

    let report = |estimate: f64,
                  iterations: usize,
                  evaluations: usize,
                  termination: Termination,
                  tolerance_satisfied: ToleranceSatisfied,
                  trace: Trace| -> Result<OptimizationReport, NewtonError> {
        Ok(OptimizationReport {
            estimate,
            objective: objective.log_likelihood(estimate, sigma)?,
            iterations,
            evaluations,
            termination,
            tolerance_satisfied,
            bracket: None,
            trace,
            algorithm_name: algo_name,
        })
    };

    // early exit: x0 is root
    let mut x     = x0;
    let mut score = eval_score_checked(objective, x, sigma, &mut evals)?;
    if score.abs() < tol {
        return report(
            x, 0, evals, Termination::Converged, ToleranceSatisfied::ScoreReached, trace
        );
    }

    for iter in 1..=num_iter {
        let step = score / info;
        let x_next = x + step;
        if !step.is_finite() || !x_next.is_finite() {
            return Err(NewtonError::StepNotFinite { mu: x, step });
        }

        trace.push(TracePoint {
            iteration : iter,
            estimate  : x_next,
            objective : objective.log_likelihood(x_next, sigma)?,
            bracket   : None,
        });

        // machine stagnation
        if x_next == x {
            return report(
                x, iter, evals,
                Termination::Converged, ToleranceSatisfied::MachinePrecisionReached, trace
            );
        }

        let score_next = eval_score_checked(objective, x_next, sigma, &mut evals)?;
        if score_next.abs() < tol {
            return report(
                x_next, iter, evals,
                Termination::Converged, ToleranceSatisfied::ScoreReached, trace
            );
        }
        if (x_next - x).abs() < tol {
            return report(
                x_next, iter, evals,
                Termination::Converged, ToleranceSatisfied::StepSizeReached, trace
            );
        }

        x     = x_next;
        score = score_next;
    }

    report(
        x, num_iter, evals,
        Termination::MaxIterationsReached, ToleranceSatisfied::ToleranceNotReached, trace
    )
}
