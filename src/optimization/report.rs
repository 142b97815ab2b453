//! Defines the [`OptimizationReport`] struct returned by all
//! optimizers.

use serde::Serialize;

use super::trace::Trace;

/// Reasons an optimizer may terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    Converged,
    MaxIterationsReached,
}


/// Which tolerance condition was satisfied (or not).
/// - [`ToleranceSatisfied::ScoreReached`]
///     - score-based methods (newton, bisection)
///     - |∂ℓ/∂μ| < tol, or exactly zero
/// - [`ToleranceSatisfied::WidthTolReached`]
///     - bracketing methods (bisection, golden section)
///     - hi - lo < tol
/// - [`ToleranceSatisfied::StepSizeReached`]
///     - open methods (newton)
///     - |x_n - x_{n - 1}| < tol
/// - [`ToleranceSatisfied::MachinePrecisionReached`]
///     - open methods; the step no longer changes the iterate
/// - [`ToleranceSatisfied::ToleranceNotReached`]
///     - all methods, together with [`Termination::MaxIterationsReached`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToleranceSatisfied {
    ScoreReached,
    WidthTolReached,
    StepSizeReached,
    MachinePrecisionReached,
    ToleranceNotReached,
}


/// Final report returned by all optimizers.
///
/// [`OptimizationReport`]
/// - `estimate`            : final parameter estimate
/// - `objective`           : log-likelihood at `estimate`
/// - `iterations`          : total iterations
/// - `evaluations`         : evaluations of the function driving the method
///                           (score for root-finders, log-likelihood for golden section)
/// - `termination`         : why the optimizer stopped ([`Termination`])
/// - `tolerance_satisfied` : which tolerance was met ([`ToleranceSatisfied`])
/// - `bracket`             : final bracket (bracketing methods only)
/// - `trace`               : per-iteration convergence trace
/// - `algorithm_name`      : algorithm name (e.g. `"bisection"`)
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationReport {
    pub estimate            : f64,
    pub objective           : f64,
    pub iterations          : usize,
    pub evaluations         : usize,
    pub termination         : Termination,
    pub tolerance_satisfied : ToleranceSatisfied,
    pub bracket             : Option<[f64; 2]>,
    pub trace               : Trace,
    pub algorithm_name      : &'static str,
}

impl OptimizationReport {
    #[inline]
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}
