use super::algorithms::{Algorithm, GLOBAL_MAX_ITER_FALLBACK};
use super::config::{CommonCfg, impl_common_cfg, resolve_sigma};
use super::errors::{FailureKind, OptimizationError};
use super::report::{OptimizationReport, Termination, ToleranceSatisfied};
use super::signs::same_sign;
use super::trace::{Trace, TracePoint};
use crate::objective::{Objective, ObjectiveError, Sample};
use thiserror::Error;


#[derive(Debug, Error)]
pub enum BisectionError {
    #[error(transparent)]
    Optimization(#[from] OptimizationError),

    #[error(transparent)]
    Objective(#[from] ObjectiveError),

    #[error("no sign change on [{lo}, {hi}]: score(lo)={score_lo}, score(hi)={score_hi}")]
    NoSignChange { lo: f64, hi: f64, score_lo: f64, score_hi: f64 },

    #[error("invalid bracket: lo and hi must be finite with lo < hi. got [{lo}, {hi}]")]
    InvalidBracket { lo: f64, hi: f64 },

    #[error("degenerate objective: sigma^2={variance} must be finite and > 0")]
    DegenerateObjective { variance: f64 },
}

impl BisectionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            BisectionError::Optimization(e)            => e.kind(),
            BisectionError::Objective(_)               => FailureKind::InvalidParameter,
            BisectionError::NoSignChange { .. }
            | BisectionError::InvalidBracket { .. }    => FailureKind::InvalidBracket,
            BisectionError::DegenerateObjective { .. } => FailureKind::DegenerateObjective,
        }
    }
}


/// Bisection configuration.
///
/// # Fields
/// ┌ `common` : [`CommonCfg`] with tolerance ε and optional `max_iter`
/// └ `sigma`  : σ held fixed while solving score(μ) = 0 (default: population std)
///
/// # Notes
/// └ If `max_iter` is `None`, it is set to the theoretical bound
///   `floor(log2((hi - lo) / ε)) + 1`, capped at [`GLOBAL_MAX_ITER_FALLBACK`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BisectionCfg {
    common: CommonCfg,
    sigma: Option<f64>,
}
impl BisectionCfg {
    #[must_use]
    pub fn new() -> Self {
        Self { common: CommonCfg::new(), sigma: None }
    }
    pub fn set_sigma(mut self, v: f64) -> Result<Self, BisectionError> {
        if !v.is_finite() || v <= 0.0 {
            return Err(ObjectiveError::InvalidParameter { name: "sigma", value: v }.into());
        }
        self.sigma = Some(v);
        Ok(self)
    }

    #[inline] pub fn sigma(&self) -> Option<f64> { self.sigma }
}
impl Default for BisectionCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(BisectionCfg);


/// Calculates midpoint of [lo, hi]
#[inline]
pub(crate) fn midpoint(lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * 0.5
}


/// Estimates μ by solving score(μ) = 0 with the
/// [bisection method](https://en.wikipedia.org/wiki/Bisection_method).
///
/// The score is continuous and strictly decreasing in μ, so any bracket
/// around the sample mean carries a sign change.
///
/// # Arguments
///
/// ┌ `sample` - observations
/// ├ `lo`     - lower bound of the bracket. Must be finite and less than `hi`.
/// ├ `hi`     - upper bound of the bracket. Must be finite and greater than `lo`.
/// └ `cfg`    - [`BisectionCfg`]
///
/// # Returns
///
/// [`OptimizationReport`] with:
/// ├ `estimate`            : final midpoint
/// ├ `iterations`          : 0 if an endpoint is an exact root or the bracket is already narrow
/// ├ `evaluations`         : score evaluations
/// ├ `tolerance_satisfied` : [`ToleranceSatisfied::ScoreReached`] / [`ToleranceSatisfied::WidthTolReached`]
/// ├ `bracket`             : final `[lo, hi]`
/// └ `algorithm_name`      : "bisection"
///
/// # Errors
///
/// ┌ [`BisectionError::InvalidBracket`]      - `lo` or `hi` is NaN/inf or `lo >= hi`.
/// ├ [`BisectionError::NoSignChange`]        - score(lo) and score(hi) share a sign.
/// └ [`BisectionError::DegenerateObjective`] - σ² zero or non-finite.
///
/// # Notes
/// ├ An exact zero score at the midpoint terminates immediately.
/// └ No bracket expansion is attempted.
pub fn bisection(
    sample: &Sample,
    lo: f64,
    hi: f64,
    cfg: BisectionCfg
) -> Result<OptimizationReport, BisectionError> {
    bisection_on(&Objective::new(sample), lo, hi, cfg)
}

/// [`bisection`] over a prebuilt [`Objective`].
pub fn bisection_on(
    objective: &Objective<'_>,
    mut lo: f64,
    mut hi: f64,
    cfg: BisectionCfg
) -> Result<OptimizationReport, BisectionError> {
    let algorithm = Algorithm::BISECTION;
    let algo_name = algorithm.algorithm_name();

    if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
        return Err(BisectionError::InvalidBracket { lo, hi });
    }

    let sigma = resolve_sigma(cfg.sigma, objective.state())
        .map_err(|variance| BisectionError::DegenerateObjective { variance })?;

    let tol      = cfg.tol();
    let num_iter = match cfg.max_iter() {
        Some(m) => m,
        None    => algorithm
            .theoretical_iter(hi - lo, tol)
            .unwrap_or(GLOBAL_MAX_ITER_FALLBACK),
    };

    let mut evals = 0;
    let mut eval = |mu: f64| -> Result<f64, BisectionError> {
        let score = { evals += 1; objective.score_mu(mu, sigma)? };
        if !score.is_finite() {
            return Err(OptimizationError::NonFiniteEvaluation { x: mu, fx: score }.into());
        }
        Ok(score)
    };

    let mut trace = Trace::with_capacity(num_iter.min(GLOBAL_MAX_ITER_FALLBACK));
    let report = |estimate: f64,
                  iterations: usize,
                  evaluations: usize,
                  termination: Termination,
                  tolerance_satisfied: ToleranceSatisfied,
                  bracket: [f64; 2],
                  trace: Trace| -> Result<OptimizationReport, BisectionError> {
        Ok(OptimizationReport {
            estimate,
            objective: objective.log_likelihood(estimate, sigma)?,
            iterations,
            evaluations,
            termination,
            tolerance_satisfied,
            bracket: Some(bracket),
            trace,
            algorithm_name: algo_name,
        })
    };

    // endpoints are exact roots
    let mut score_lo = eval(lo)?;
    if score_lo == 0.0 {
        return report(
            lo, 0, evals, Termination::Converged, ToleranceSatisfied::ScoreReached, [lo, hi], trace
        );
    }
    let score_hi = eval(hi)?;
    if score_hi == 0.0 {
        return report(
            hi, 0, evals, Termination::Converged, ToleranceSatisfied::ScoreReached, [lo, hi], trace
        );
    }

    if same_sign(score_lo, score_hi) {
        return Err(BisectionError::NoSignChange { lo, hi, score_lo, score_hi });
    }

    // immediate narrow width success
    if hi - lo < tol {
        return report(
            midpoint(lo, hi), 0, evals,
            Termination::Converged, ToleranceSatisfied::WidthTolReached, [lo, hi], trace
        );
    }

    let mut mid = midpoint(lo, hi);
    for iter in 1..=num_iter {
        mid = midpoint(lo, hi);
        let score_mid = eval(mid)?;

        // exact root, bracket left untouched
        if score_mid == 0.0 {
            trace.push(TracePoint {
                iteration : iter,
                estimate  : mid,
                objective : objective.log_likelihood(mid, sigma)?,
                bracket   : Some([lo, hi]),
            });
            return report(
                mid, iter, evals,
                Termination::Converged, ToleranceSatisfied::ScoreReached, [lo, hi], trace
            );
        }

        // shrink bracket, keeping the sign change
        if same_sign(score_lo, score_mid) {
            lo = mid;
            score_lo = score_mid;
        } else {
            hi = mid;
        }

        trace.push(TracePoint {
            iteration : iter,
            estimate  : mid,
            objective : objective.log_likelihood(mid, sigma)?,
            bracket   : Some([lo, hi]),
        });

        if score_mid.abs() < tol {
            return report(
                mid, iter, evals,
                Termination::Converged, ToleranceSatisfied::ScoreReached, [lo, hi], trace
            );
        }
        if hi - lo < tol {
            return report(
                mid, iter, evals,
                Termination::Converged, ToleranceSatisfied::WidthTolReached, [lo, hi], trace
            );
        }
    }

    report(
        mid, num_iter, evals,
        Termination::MaxIterationsReached, ToleranceSatisfied::ToleranceNotReached, [lo, hi], trace
    )
}
