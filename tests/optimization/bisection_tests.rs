//! tests for bisection on the score
use approx::{assert_abs_diff_eq, assert_relative_eq};
use normal_mle::objective::Sample;
use normal_mle::optimization::bisection::{bisection, BisectionCfg, BisectionError};
use normal_mle::optimization::errors::FailureKind;
use normal_mle::optimization::report::{Termination, ToleranceSatisfied};

type TestResult = Result<(), BisectionError>;

fn sample(xs: &[f64]) -> Sample {
    Sample::from_slice(xs).expect("valid sample")
}

#[test]
fn scenario_converges_to_mean() -> TestResult {
    let s   = sample(&[3.0, 4.0, 5.0, 6.0, 7.0]);
    let cfg = BisectionCfg::new().set_tol(1e-4)?;

    let res = bisection(&s, 0.0, 10.0, cfg)?;

    assert_eq!(res.termination, Termination::Converged);
    assert!(res.iterations <= 24);
    assert_abs_diff_eq!(res.estimate, 5.0, epsilon = 1e-4);
    assert_eq!(res.algorithm_name, "bisection");
    Ok(())
}

#[test]
fn exact_zero_at_midpoint_stops_immediately() -> TestResult {
    // mean 5 is the first midpoint of [0, 10]
    let s   = sample(&[3.0, 4.0, 5.0, 6.0, 7.0]);
    let res = bisection(&s, 0.0, 10.0, BisectionCfg::new())?;

    assert_eq!(res.iterations, 1);
    assert_eq!(res.estimate, 5.0);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::ScoreReached);
    Ok(())
}

#[test]
fn widths_halve_every_iteration() -> TestResult {
    let s   = sample(&[1.0, 2.0, 4.0]);
    let cfg = BisectionCfg::new().set_tol(1e-4)?;
    let res = bisection(&s, 0.0, 10.0, cfg)?;

    assert_eq!(res.termination, Termination::Converged);
    assert!(res.iterations <= 17);
    assert_abs_diff_eq!(res.estimate, 7.0 / 3.0, epsilon = 1e-4);

    let widths: Vec<f64> = res.trace.iter().filter_map(|p| p.width()).collect();
    assert_eq!(widths.len(), res.iterations);
    assert_relative_eq!(widths[0], 5.0, max_relative = 1e-12);
    for w in widths.windows(2) {
        assert!(w[1] <= w[0]);
        assert_relative_eq!(w[1], 0.5 * w[0], max_relative = 1e-9);
    }
    Ok(())
}

#[test]
fn bracket_keeps_the_mean_inside() -> TestResult {
    let s   = sample(&[1.0, 2.0, 4.0]);
    let res = bisection(&s, -20.0, 30.0, BisectionCfg::new())?;
    let mean = 7.0 / 3.0;

    for p in &res.trace {
        let [lo, hi] = p.bracket.expect("bisection records its bracket");
        assert!(lo <= mean && mean <= hi, "[{lo}, {hi}] lost the root");
    }
    Ok(())
}

#[test]
fn same_sign_bracket_is_rejected() {
    let s   = sample(&[3.0, 4.0, 5.0, 6.0, 7.0]);
    let err = bisection(&s, 6.0, 10.0, BisectionCfg::new()).unwrap_err();

    assert!(matches!(err, BisectionError::NoSignChange { lo, hi, .. } if lo == 6.0 && hi == 10.0));
    assert_eq!(err.kind(), FailureKind::InvalidBracket);
}

#[test]
fn reversed_bracket_is_rejected() {
    let s   = sample(&[3.0, 4.0, 5.0]);
    let err = bisection(&s, 10.0, 0.0, BisectionCfg::new()).unwrap_err();

    assert!(matches!(err, BisectionError::InvalidBracket { .. }));
    assert_eq!(err.kind(), FailureKind::InvalidBracket);
}

#[test]
fn non_finite_bracket_is_rejected() {
    let s   = sample(&[3.0, 4.0, 5.0]);
    let err = bisection(&s, f64::NEG_INFINITY, 1.0, BisectionCfg::new()).unwrap_err();
    assert!(matches!(err, BisectionError::InvalidBracket { .. }));
}

#[test]
fn endpoint_root_needs_no_iterations() -> TestResult {
    let s   = sample(&[3.0, 4.0, 5.0, 6.0, 7.0]);
    let res = bisection(&s, 5.0, 9.0, BisectionCfg::new())?;

    assert_eq!(res.iterations, 0);
    assert_eq!(res.estimate, 5.0);
    assert_eq!(res.evaluations, 1);
    Ok(())
}

#[test]
fn uses_max_iter() -> TestResult {
    let s   = sample(&[1.0, 2.0, 4.0]);
    let cfg = BisectionCfg::new().set_tol(1e-12)?.set_max_iter(3)?;
    let res = bisection(&s, 0.0, 10.0, cfg)?;

    assert_eq!(res.termination, Termination::MaxIterationsReached);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::ToleranceNotReached);
    assert_eq!(res.iterations, 3);
    assert_eq!(res.trace.len(), 3);
    assert_eq!(res.bracket, Some([1.25, 2.5]));

    let pairs: Vec<(usize, f64)> = res.trace.estimates().collect();
    assert_eq!(pairs, vec![(1, 5.0), (2, 2.5), (3, 1.25)]);
    Ok(())
}

#[test]
fn narrow_bracket_converges_without_iterating() -> TestResult {
    let s   = sample(&[1.0, 2.0, 4.0]);
    let cfg = BisectionCfg::new().set_tol(1e-2)?;
    let res = bisection(&s, 2.33, 2.335, cfg)?;

    assert_eq!(res.iterations, 0);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::WidthTolReached);
    assert_abs_diff_eq!(res.estimate, 2.3325, epsilon = 1e-12);
    Ok(())
}

#[test]
fn constant_sample_is_degenerate() {
    let s   = sample(&[1.5, 1.5]);
    let err = bisection(&s, 0.0, 3.0, BisectionCfg::new()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::DegenerateObjective);
}

#[test]
fn huge_cap_is_only_a_bound() -> TestResult {
    let s   = sample(&[3.0, 4.0, 5.0, 6.0, 7.0]);
    let cfg = BisectionCfg::new().set_tol(1e-4)?.set_max_iter(usize::MAX)?;
    let res = bisection(&s, 0.0, 10.0, cfg)?;

    assert_eq!(res.termination, Termination::Converged);
    assert_abs_diff_eq!(res.estimate, 5.0, epsilon = 1e-4);

    let s   = sample(&[1.0, 2.0, 4.0]);
    let cfg = BisectionCfg::new().set_tol(1e-4)?.set_max_iter(usize::MAX)?;
    let res = bisection(&s, 0.0, 10.0, cfg)?;

    assert_eq!(res.termination, Termination::Converged);
    assert!(res.iterations <= 17);
    Ok(())
}

#[test]
fn width_equal_to_tol_keeps_halving() -> TestResult {
    // mean 1/3 is never within 2^-13 of a dyadic midpoint reached in 11 steps,
    // so only the width test can stop the run
    let s   = sample(&[0.0, 1.0, 0.0]);
    let cfg = BisectionCfg::new().set_tol(2.0_f64.powi(-10))?;
    let res = bisection(&s, 0.0, 1.0, cfg)?;

    assert_eq!(res.termination, Termination::Converged);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::WidthTolReached);
    assert_eq!(res.iterations, 11);
    assert_eq!(res.trace.last().and_then(|p| p.width()), Some(2.0_f64.powi(-11)));
    assert_abs_diff_eq!(res.estimate, 1.0 / 3.0, epsilon = 2.0_f64.powi(-11));
    Ok(())
}

#[test]
fn bracket_as_wide_as_tol_still_iterates() -> TestResult {
    let s   = sample(&[1.0, 2.0, 4.0]);
    let cfg = BisectionCfg::new().set_tol(1.0)?;
    let res = bisection(&s, 2.0, 3.0, cfg)?;

    assert!(res.iterations >= 1);
    Ok(())
}
