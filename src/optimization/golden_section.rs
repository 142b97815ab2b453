//! Golden-section search maximizing the log-likelihood over one parameter.
//!
//! # Algorithm
//!
//! Two interior probes split `[lo, hi]` at ratios 1−φ and φ, where
//! φ = (√5 − 1)/2. After comparing the probes, the side holding the lower
//! value is dropped and the surviving probe lands exactly on one of the
//! next iteration's probe positions, so only one new evaluation is needed
//! per iteration. The bracket shrinks by φ every iteration.
//!
//! # Limitations
//!
//! - **Unimodal assumption**: not verified; a multimodal objective yields
//!   some local maximum rather than an error.

use serde::Serialize;

use super::algorithms::{Algorithm, GLOBAL_MAX_ITER_FALLBACK};
use super::config::{CommonCfg, impl_common_cfg, resolve_sigma};
use super::errors::{FailureKind, OptimizationError};
use super::report::{OptimizationReport, Termination, ToleranceSatisfied};
use super::trace::{Trace, TracePoint};
use crate::objective::{Objective, ObjectiveError, Sample};
use thiserror::Error;

/// φ = (√5 − 1) / 2
pub const GOLDEN_RATIO: f64 = 0.618_033_988_749_894_9;


#[derive(Debug, Error)]
pub enum GoldenSectionError {
    #[error(transparent)]
    Optimization(#[from] OptimizationError),

    #[error(transparent)]
    Objective(#[from] ObjectiveError),

    #[error("invalid bracket: lo and hi must be finite with lo < hi. got [{lo}, {hi}]")]
    InvalidBracket { lo: f64, hi: f64 },

    #[error("degenerate objective: sigma^2={variance} must be finite and > 0")]
    DegenerateObjective { variance: f64 },
}

impl GoldenSectionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GoldenSectionError::Optimization(e)            => e.kind(),
            GoldenSectionError::Objective(_)               => FailureKind::InvalidParameter,
            GoldenSectionError::InvalidBracket { .. }      => FailureKind::InvalidBracket,
            GoldenSectionError::DegenerateObjective { .. } => FailureKind::DegenerateObjective,
        }
    }
}


/// Parameter searched by golden section; the other one is held fixed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Parameter {
    Mu,
    Sigma,
}


/// Golden-section configuration.
///
/// # Fields
/// - `common`    : [`CommonCfg`] with tolerance ε and optional `max_iter`
/// - `parameter` : searched parameter (default [`Parameter::Sigma`])
/// - `fixed`     : value of the other parameter; defaults to the sample mean
///                 when searching σ and to the population std when searching μ
///
/// # Defaults
/// - If `max_iter` is `None`: `floor(ln((hi - lo) / ε) / ln(1/φ)) + 1`, capped at
///   [`GLOBAL_MAX_ITER_FALLBACK`].
///
/// `fixed` belongs to the parameter it was set for: switching `parameter`
/// clears it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GoldenSectionCfg {
    common: CommonCfg,
    parameter: Parameter,
    fixed: Option<f64>,
}
impl GoldenSectionCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common: CommonCfg::new(),
            parameter: Parameter::Sigma,
            fixed: None,
        }
    }
    #[must_use]
    pub fn set_parameter(mut self, p: Parameter) -> Self {
        if p != self.parameter {
            self.fixed = None;
        }
        self.parameter = p;
        self
    }
    /// Holds the non-searched parameter at `v`.
    /// Call after [`GoldenSectionCfg::set_parameter`]; a fixed σ must be positive.
    pub fn set_fixed(mut self, v: f64) -> Result<Self, GoldenSectionError> {
        let (name, valid) = match self.parameter {
            Parameter::Sigma => ("mu",    v.is_finite()),
            Parameter::Mu    => ("sigma", v.is_finite() && v > 0.0),
        };
        if !valid {
            return Err(ObjectiveError::InvalidParameter { name, value: v }.into());
        }
        self.fixed = Some(v);
        Ok(self)
    }

    #[inline] pub fn parameter(&self) -> Parameter { self.parameter }
    #[inline] pub fn fixed(&self) -> Option<f64> { self.fixed }
}
impl Default for GoldenSectionCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(GoldenSectionCfg);


/// Probe positions inside `[lo, hi]`.
#[inline]
fn probes(lo: f64, hi: f64) -> (f64, f64) {
    let d = GOLDEN_RATIO * (hi - lo);
    (hi - d, lo + d)
}


/// Maximizes the log-likelihood over σ (or μ) with
/// [golden-section search](https://en.wikipedia.org/wiki/Golden-section_search).
///
/// # Returns
/// [`OptimizationReport`] with:
/// - `estimate`            : midpoint of the final bracket
/// - `objective`           : log-likelihood at `estimate`
/// - `evaluations`         : `iterations + 2` (two initial probes, one per iteration)
/// - `tolerance_satisfied` : [`ToleranceSatisfied::WidthTolReached`] on success
/// - `bracket`             : final `[lo, hi]`
/// - `trace`               : objective column holds the better retained probe
/// - `algorithm_name`      : "golden_section"
///
/// # Errors
/// - [`GoldenSectionError::InvalidBracket`]      : `hi <= lo` or non-finite bounds
/// - [`GoldenSectionError::DegenerateObjective`] : searching μ with a zero default σ
/// - [`GoldenSectionError::Objective`]           : a probe fell outside the
///   parameter domain (e.g. σ <= 0)
pub fn golden_section(
    sample: &Sample,
    lo: f64,
    hi: f64,
    cfg: GoldenSectionCfg
) -> Result<OptimizationReport, GoldenSectionError> {
    golden_section_on(&Objective::new(sample), lo, hi, cfg)
}

/// [`golden_section`] over a prebuilt [`Objective`].
pub fn golden_section_on(
    objective: &Objective<'_>,
    mut lo: f64,
    mut hi: f64,
    cfg: GoldenSectionCfg
) -> Result<OptimizationReport, GoldenSectionError> {
    let algorithm = Algorithm::GOLDEN_SECTION;
    let algo_name = algorithm.algorithm_name();

    if !(lo.is_finite() && hi.is_finite()) || hi <= lo {
        return Err(GoldenSectionError::InvalidBracket { lo, hi });
    }

    let parameter = cfg.parameter;
    let fixed = match parameter {
        Parameter::Sigma => cfg.fixed.unwrap_or_else(|| objective.state().mean()),
        Parameter::Mu    => resolve_sigma(cfg.fixed, objective.state())
            .map_err(|variance| GoldenSectionError::DegenerateObjective { variance })?,
    };
    let loglik = |x: f64| -> Result<f64, ObjectiveError> {
        match parameter {
            Parameter::Sigma => objective.likelihood_of_sigma(x, fixed),
            Parameter::Mu    => objective.likelihood_of_mu(x, fixed),
        }
    };

    let tol      = cfg.tol();
    let num_iter = match cfg.max_iter() {
        Some(m) => m,
        None    => algorithm
            .theoretical_iter(hi - lo, tol)
            .unwrap_or(GLOBAL_MAX_ITER_FALLBACK),
    };

    let mut evals = 0;
    let mut eval = |x: f64| -> Result<f64, GoldenSectionError> {
        let fx = { evals += 1; loglik(x)? };
        if !fx.is_finite() {
            return Err(OptimizationError::NonFiniteEvaluation { x, fx }.into());
        }
        Ok(fx)
    };

    let (mut x1, mut x2) = probes(lo, hi);
    let mut f1 = eval(x1)?;
    let mut f2 = eval(x2)?;

    let mut trace = Trace::with_capacity(num_iter.min(GLOBAL_MAX_ITER_FALLBACK));
    let mut iterations = 0;
    let mut converged = hi - lo < tol;

    while !converged && iterations < num_iter {
        iterations += 1;

        if f1 < f2 {
            // maximum lies in [x1, hi]
            lo = x1;
            x1 = x2;
            f1 = f2;
            x2 = lo + GOLDEN_RATIO * (hi - lo);
            f2 = eval(x2)?;
        } else {
            // maximum lies in [lo, x2]
            hi = x2;
            x2 = x1;
            f2 = f1;
            x1 = hi - GOLDEN_RATIO * (hi - lo);
            f1 = eval(x1)?;
        }

        trace.push(TracePoint {
            iteration : iterations,
            estimate  : 0.5 * (lo + hi),
            objective : f1.max(f2),
            bracket   : Some([lo, hi]),
        });

        converged = hi - lo < tol;
    }

    let estimate = 0.5 * (lo + hi);
    let (termination, tolerance_satisfied) = if converged {
        (Termination::Converged, ToleranceSatisfied::WidthTolReached)
    } else {
        (Termination::MaxIterationsReached, ToleranceSatisfied::ToleranceNotReached)
    };

    Ok(OptimizationReport {
        estimate,
        objective: loglik(estimate)?,
        iterations,
        evaluations: evals,
        termination,
        tolerance_satisfied,
        bracket: Some([lo, hi]),
        trace,
        algorithm_name: algo_name,
    })
}
