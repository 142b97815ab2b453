//! Runs all three optimizers against one sample and collects their results.
//!
//! The sample's [`ObjectiveState`] is computed once and shared read-only.
//! Each optimizer owns its own trace, and a failure in one method is
//! recorded in its [`MethodOutcome`] without touching the others.

use serde::Serialize;
use slog::{debug, info, o, trace, warn, Logger};

use crate::objective::{Objective, ObjectiveState, Sample};
use crate::optimization::bisection::{bisection_on, BisectionCfg};
use crate::optimization::errors::FailureKind;
use crate::optimization::golden_section::{golden_section_on, GoldenSectionCfg, Parameter};
use crate::optimization::newton::{newton_on, NewtonCfg};
use crate::optimization::report::OptimizationReport;


/// Terminal status of one method.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Status {
    Converged,
    MaxIterationsReached,
    Failed(FailureKind),
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Converged            => write!(f, "converged"),
            Status::MaxIterationsReached => write!(f, "max_iterations_reached"),
            Status::Failed(kind)         => write!(f, "failed({kind})"),
        }
    }
}


/// A failed run, flattened so outcomes of different methods share one type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodFailure {
    pub kind: FailureKind,
    pub message: String,
}


#[derive(Debug, Clone, Serialize)]
pub struct MethodOutcome {
    pub algorithm_name: &'static str,
    pub result: Result<OptimizationReport, MethodFailure>,
}

impl MethodOutcome {
    fn from_result<E>(algorithm_name: &'static str, result: Result<OptimizationReport, E>) -> Self
    where
        E: std::error::Error + HasKind,
    {
        let result = result.map_err(|e| MethodFailure { kind: e.kind(), message: e.to_string() });
        Self { algorithm_name, result }
    }

    pub fn status(&self) -> Status {
        match &self.result {
            Ok(r) if r.converged() => Status::Converged,
            Ok(_)                  => Status::MaxIterationsReached,
            Err(e)                 => Status::Failed(e.kind),
        }
    }

    pub fn report(&self) -> Option<&OptimizationReport> {
        self.result.as_ref().ok()
    }

    pub fn estimate(&self) -> Option<f64> {
        self.report().map(|r| r.estimate)
    }
}

/// Bridges each method's error enum to [`FailureKind`].
pub trait HasKind {
    fn kind(&self) -> FailureKind;
}

macro_rules! impl_has_kind {
    ($($err:ty),* $(,)?) => {
        $(impl HasKind for $err {
            fn kind(&self) -> FailureKind { <$err>::kind(self) }
        })*
    };
}
impl_has_kind!(
    crate::optimization::newton::NewtonError,
    crate::optimization::bisection::BisectionError,
    crate::optimization::golden_section::GoldenSectionError,
);


/// Closed-form Normal MLE, used as the reference every method is compared to.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ClosedForm {
    pub mu: f64,
    pub sigma: f64,
}


/// Configuration for [`estimate`].
///
/// Brackets left as `None` are derived from the sample:
/// ┌ μ bracket : `[min − 1, max + 1]`, which always straddles the mean
/// └ σ bracket : `[0, (max − min) + 1]`; the population std never exceeds
///               half the range, and golden-section probes stay strictly inside
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct EstimatorCfg {
    pub newton: NewtonCfg,
    pub bisection: BisectionCfg,
    pub golden_section: GoldenSectionCfg,
    pub mu_bracket: Option<[f64; 2]>,
    pub sigma_bracket: Option<[f64; 2]>,
    pub parallel: bool,
}

impl EstimatorCfg {
    pub fn new() -> Self { Self::default() }

    /// Applies one tolerance and optional cap to all three methods.
    pub fn with_common(
        mut self,
        tol: f64,
        max_iter: Option<usize>,
    ) -> Result<Self, crate::optimization::errors::OptimizationError> {
        self.newton = self.newton.set_tol(tol)?;
        self.bisection = self.bisection.set_tol(tol)?;
        self.golden_section = self.golden_section.set_tol(tol)?;
        if let Some(m) = max_iter {
            self.newton = self.newton.set_max_iter(m)?;
            self.bisection = self.bisection.set_max_iter(m)?;
            self.golden_section = self.golden_section.set_max_iter(m)?;
        }
        Ok(self)
    }
}


/// Results of all three methods for one sample.
#[derive(Debug, Clone, Serialize)]
pub struct Estimation {
    pub n: usize,
    pub closed_form: ClosedForm,
    pub golden_parameter: Parameter,
    pub newton: MethodOutcome,
    pub bisection: MethodOutcome,
    pub golden_section: MethodOutcome,
}

impl Estimation {
    pub fn outcomes(&self) -> [&MethodOutcome; 3] {
        [&self.newton, &self.bisection, &self.golden_section]
    }

    /// Largest distance between a successful μ estimate and the sample mean.
    /// `None` when no μ estimate is available.
    pub fn mu_discrepancy(&self) -> Option<f64> {
        let mut mus = vec![self.newton.estimate(), self.bisection.estimate()];
        if self.golden_parameter == Parameter::Mu {
            mus.push(self.golden_section.estimate());
        }
        mus.into_iter()
            .flatten()
            .map(|m| (m - self.closed_form.mu).abs())
            .reduce(f64::max)
    }
}


fn default_mu_bracket(sample: &Sample) -> [f64; 2] {
    let (min, max) = min_max(sample);
    [min - 1.0, max + 1.0]
}

fn default_sigma_bracket(sample: &Sample) -> [f64; 2] {
    let (min, max) = min_max(sample);
    [0.0, (max - min) + 1.0]
}

fn min_max(sample: &Sample) -> (f64, f64) {
    sample.values().iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), &x| (lo.min(x), hi.max(x)),
    )
}


fn log_outcome(log: &Logger, outcome: &MethodOutcome) {
    match &outcome.result {
        Ok(r) => {
            for p in &r.trace {
                trace!(log, "iteration";
                    "iteration" => p.iteration,
                    "estimate" => p.estimate,
                    "objective" => p.objective
                );
            }
            info!(log, "finished";
                "status" => %outcome.status(),
                "estimate" => r.estimate,
                "iterations" => r.iterations,
                "evaluations" => r.evaluations
            );
        }
        Err(e) => warn!(log, "failed"; "kind" => %e.kind, "error" => &e.message),
    }
}


/// Runs Newton and bisection for μ and golden section for σ (or μ, per
/// `cfg.golden_section`) on `sample`.
///
/// Never fails as a whole: per-method errors are captured in each
/// [`MethodOutcome`].
pub fn estimate(sample: &Sample, cfg: &EstimatorCfg, log: &Logger) -> Estimation {
    let state = ObjectiveState::new(sample);
    let objective = Objective::with_state(sample, state);

    let closed_form = ClosedForm { mu: state.mean(), sigma: state.std_dev() };
    debug!(log, "sample loaded";
        "n" => state.n(),
        "mean" => closed_form.mu,
        "std" => closed_form.sigma,
        "parallel" => cfg.parallel
    );

    let [mu_lo, mu_hi] = cfg.mu_bracket.unwrap_or_else(|| default_mu_bracket(sample));
    let golden_parameter = cfg.golden_section.parameter();
    let [g_lo, g_hi] = match golden_parameter {
        Parameter::Sigma => cfg.sigma_bracket.unwrap_or_else(|| default_sigma_bracket(sample)),
        Parameter::Mu    => cfg.mu_bracket.unwrap_or_else(|| default_mu_bracket(sample)),
    };

    let run_newton = || {
        let log = log.new(o!("algorithm" => "newton"));
        debug!(log, "starting"; "x0" => ?cfg.newton.x0());
        let out = MethodOutcome::from_result("newton", newton_on(&objective, cfg.newton));
        log_outcome(&log, &out);
        out
    };
    let run_bisection = || {
        let log = log.new(o!("algorithm" => "bisection"));
        debug!(log, "starting"; "lo" => mu_lo, "hi" => mu_hi);
        let out = MethodOutcome::from_result(
            "bisection",
            bisection_on(&objective, mu_lo, mu_hi, cfg.bisection),
        );
        log_outcome(&log, &out);
        out
    };
    let run_golden = || {
        let log = log.new(o!("algorithm" => "golden_section"));
        debug!(log, "starting"; "lo" => g_lo, "hi" => g_hi, "parameter" => ?golden_parameter);
        let out = MethodOutcome::from_result(
            "golden_section",
            golden_section_on(&objective, g_lo, g_hi, cfg.golden_section),
        );
        log_outcome(&log, &out);
        out
    };

    let (newton, bisection, golden_section) = if cfg.parallel {
        std::thread::scope(|s| {
            let n = s.spawn(run_newton);
            let b = s.spawn(run_bisection);
            let g = run_golden();
            (
                n.join().unwrap_or_else(|e| std::panic::resume_unwind(e)),
                b.join().unwrap_or_else(|e| std::panic::resume_unwind(e)),
                g,
            )
        })
    } else {
        (run_newton(), run_bisection(), run_golden())
    };

    Estimation { n: state.n(), closed_form, golden_parameter, newton, bisection, golden_section }
}
