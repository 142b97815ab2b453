//! tests for Newton's method on the score
use approx::assert_abs_diff_eq;
use normal_mle::objective::{ObjectiveError, Sample};
use normal_mle::optimization::errors::{FailureKind, OptimizationError};
use normal_mle::optimization::newton::{newton, InitialGuess, NewtonCfg, NewtonError};
use normal_mle::optimization::report::{Termination, ToleranceSatisfied};

type TestResult = Result<(), NewtonError>;

fn sample(xs: &[f64]) -> Sample {
    Sample::from_slice(xs).expect("valid sample")
}

#[test]
fn scenario_lands_on_mean_in_one_step() -> TestResult {
    let s   = sample(&[3.0, 4.0, 5.0, 6.0, 7.0]);
    let cfg = NewtonCfg::new().set_x0(0.0)?.set_tol(1e-6)?;

    let res = newton(&s, cfg)?;

    assert_eq!(res.termination, Termination::Converged);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::ScoreReached);
    assert_eq!(res.iterations, 1);
    assert_abs_diff_eq!(res.estimate, 5.0, epsilon = 1e-12);
    assert_eq!(res.trace.len(), 1);
    assert_eq!(res.algorithm_name, "newton");
    assert!(res.bracket.is_none());
    Ok(())
}

#[test]
fn trace_records_estimate_and_log_likelihood() -> TestResult {
    let s   = sample(&[3.0, 4.0, 5.0, 6.0, 7.0]);
    let res = newton(&s, NewtonCfg::new())?;

    let p = res.trace.points()[0];
    assert_eq!(p.iteration, 1);
    assert_abs_diff_eq!(p.estimate, 5.0, epsilon = 1e-12);
    assert_abs_diff_eq!(p.objective, res.objective, epsilon = 1e-12);
    assert!(p.bracket.is_none());
    Ok(())
}

#[test]
fn converges_within_three_iterations_from_far_guesses() -> TestResult {
    let s = sample(&[-2.5, 0.1, 7.75, 3.3, 1.0, 12.0, -4.4]);
    let mean = s.values().iter().sum::<f64>() / s.len() as f64;

    for x0 in [-1e4, -3.0, 0.0, 2.2, 1e6] {
        let res = newton(&s, NewtonCfg::new().set_x0(x0)?)?;
        assert_eq!(res.termination, Termination::Converged);
        assert!(res.iterations <= 3, "x0={x0}: {} iterations", res.iterations);
        assert_abs_diff_eq!(res.estimate, mean, epsilon = 1e-6);
    }
    Ok(())
}

#[test]
fn median_start_on_symmetric_sample_needs_no_step() -> TestResult {
    let s   = sample(&[3.0, 4.0, 5.0, 6.0, 7.0]);
    let cfg = NewtonCfg::new().start_at_median();
    assert_eq!(cfg.x0(), InitialGuess::Median);

    let res = newton(&s, cfg)?;
    assert_eq!(res.iterations, 0);
    assert_eq!(res.evaluations, 1);
    assert!(res.trace.is_empty());
    assert_eq!(res.estimate, 5.0);
    Ok(())
}

#[test]
fn explicit_sigma_does_not_move_the_root() -> TestResult {
    let s   = sample(&[1.0, 2.0, 6.0]);
    let res = newton(&s, NewtonCfg::new().set_sigma(10.0)?)?;
    assert_abs_diff_eq!(res.estimate, 3.0, epsilon = 1e-9);
    Ok(())
}

#[test]
fn constant_sample_is_degenerate() {
    let s   = sample(&[2.0, 2.0, 2.0]);
    let err = newton(&s, NewtonCfg::new()).unwrap_err();

    assert!(matches!(err, NewtonError::DegenerateObjective { variance } if variance == 0.0));
    assert_eq!(err.kind(), FailureKind::DegenerateObjective);
}

#[test]
fn rejects_non_finite_guess() {
    let err = NewtonCfg::new().set_x0(f64::NAN).unwrap_err();
    assert!(matches!(err, NewtonError::InvalidGuess { .. }));
    assert_eq!(err.kind(), FailureKind::InvalidConfig);
}

#[test]
fn rejects_non_positive_sigma() {
    let err = NewtonCfg::new().set_sigma(-1.0).unwrap_err();
    assert!(matches!(
        err,
        NewtonError::Objective(ObjectiveError::InvalidParameter { name: "sigma", value }) if value == -1.0
    ));
    assert_eq!(err.kind(), FailureKind::InvalidParameter);
}

#[test]
fn rejects_invalid_tolerance_and_cap() {
    assert!(matches!(
        NewtonCfg::new().set_tol(0.0),
        Err(OptimizationError::InvalidTolerance { .. })
    ));
    assert!(matches!(
        NewtonCfg::new().set_tol(f64::INFINITY),
        Err(OptimizationError::InvalidTolerance { .. })
    ));
    assert!(matches!(
        NewtonCfg::new().set_max_iter(0),
        Err(OptimizationError::InvalidMaxIter { got: 0 })
    ));
}

#[test]
fn single_observation_with_explicit_sigma() -> TestResult {
    let s   = sample(&[4.0]);
    let res = newton(&s, NewtonCfg::new().set_sigma(1.0)?)?;
    assert_abs_diff_eq!(res.estimate, 4.0, epsilon = 1e-12);
    Ok(())
}
