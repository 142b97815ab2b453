//! tests for golden-section search on the log-likelihood
use approx::{assert_abs_diff_eq, assert_relative_eq};
use normal_mle::objective::{ObjectiveError, Sample};
use normal_mle::optimization::errors::FailureKind;
use normal_mle::optimization::golden_section::{
    golden_section, GoldenSectionCfg, GoldenSectionError, Parameter, GOLDEN_RATIO,
};
use normal_mle::optimization::report::{Termination, ToleranceSatisfied};

type TestResult = Result<(), GoldenSectionError>;

fn scenario() -> Sample {
    Sample::from_slice(&[3.0, 4.0, 5.0, 6.0, 7.0]).expect("valid sample")
}

#[test]
fn scenario_recovers_population_std() -> TestResult {
    let cfg = GoldenSectionCfg::new().set_tol(1e-4)?;
    let res = golden_section(&scenario(), 0.1, 5.0, cfg)?;

    assert_eq!(res.termination, Termination::Converged);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::WidthTolReached);
    assert!(res.iterations <= 40);
    assert_abs_diff_eq!(res.estimate, 2.0_f64.sqrt(), epsilon = 1e-3);
    assert_eq!(res.algorithm_name, "golden_section");
    Ok(())
}

#[test]
fn one_evaluation_per_iteration() -> TestResult {
    let cfg = GoldenSectionCfg::new().set_tol(1e-6)?;
    let res = golden_section(&scenario(), 0.1, 5.0, cfg)?;

    assert!(res.iterations > 0);
    assert_eq!(res.evaluations, res.iterations + 2);
    Ok(())
}

#[test]
fn bracket_shrinks_by_golden_ratio() -> TestResult {
    let cfg = GoldenSectionCfg::new().set_tol(1e-4)?;
    let res = golden_section(&scenario(), 0.1, 5.0, cfg)?;

    let widths: Vec<f64> = res.trace.iter().filter_map(|p| p.width()).collect();
    assert_relative_eq!(widths[0], GOLDEN_RATIO * 4.9, max_relative = 1e-12);
    for w in widths.windows(2) {
        assert_relative_eq!(w[1] / w[0], GOLDEN_RATIO, max_relative = 1e-6);
    }
    Ok(())
}

#[test]
fn best_retained_value_never_decreases() -> TestResult {
    let res = golden_section(&scenario(), 0.1, 5.0, GoldenSectionCfg::new())?;
    for pair in res.trace.points().windows(2) {
        assert!(pair[1].objective >= pair[0].objective);
    }
    Ok(())
}

#[test]
fn fixed_mu_shifts_the_optimum() -> TestResult {
    // Σ(xᵢ − 4)² / n = 2 + 1
    let cfg = GoldenSectionCfg::new().set_fixed(4.0)?;
    let res = golden_section(&scenario(), 0.1, 5.0, cfg)?;
    assert_abs_diff_eq!(res.estimate, 3.0_f64.sqrt(), epsilon = 1e-5);
    Ok(())
}

#[test]
fn searches_mu_when_asked() -> TestResult {
    let cfg = GoldenSectionCfg::new().set_parameter(Parameter::Mu);
    let res = golden_section(&scenario(), 0.0, 10.0, cfg)?;

    assert_eq!(res.termination, Termination::Converged);
    assert_abs_diff_eq!(res.estimate, 5.0, epsilon = 1e-5);
    Ok(())
}

#[test]
fn uses_max_iter() -> TestResult {
    let cfg = GoldenSectionCfg::new().set_max_iter(5)?;
    let res = golden_section(&scenario(), 0.1, 5.0, cfg)?;

    assert_eq!(res.termination, Termination::MaxIterationsReached);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::ToleranceNotReached);
    assert_eq!(res.iterations, 5);
    assert_eq!(res.evaluations, 7);
    Ok(())
}

#[test]
fn inverted_bracket_is_rejected() {
    for (lo, hi) in [(5.0, 0.1), (1.0, 1.0)] {
        let err = golden_section(&scenario(), lo, hi, GoldenSectionCfg::new()).unwrap_err();
        assert!(matches!(err, GoldenSectionError::InvalidBracket { .. }));
        assert_eq!(err.kind(), FailureKind::InvalidBracket);
    }
}

#[test]
fn probe_below_zero_is_invalid_parameter() {
    let err = golden_section(&scenario(), -5.0, 5.0, GoldenSectionCfg::new()).unwrap_err();
    assert!(matches!(
        err,
        GoldenSectionError::Objective(ObjectiveError::InvalidParameter { name: "sigma", .. })
    ));
    assert_eq!(err.kind(), FailureKind::InvalidParameter);
}

#[test]
fn zero_lower_bound_is_allowed() -> TestResult {
    let res = golden_section(&scenario(), 0.0, 5.0, GoldenSectionCfg::new())?;
    assert_abs_diff_eq!(res.estimate, 2.0_f64.sqrt(), epsilon = 1e-5);
    Ok(())
}

#[test]
fn mu_search_on_constant_sample_is_degenerate() {
    let s   = Sample::from_slice(&[1.0, 1.0]).expect("valid sample");
    let cfg = GoldenSectionCfg::new().set_parameter(Parameter::Mu);
    let err = golden_section(&s, 0.0, 2.0, cfg).unwrap_err();
    assert_eq!(err.kind(), FailureKind::DegenerateObjective);
}

#[test]
fn huge_cap_is_only_a_bound() -> TestResult {
    let cfg = GoldenSectionCfg::new().set_tol(1e-4)?.set_max_iter(usize::MAX)?;
    let res = golden_section(&scenario(), 0.1, 5.0, cfg)?;

    assert_eq!(res.termination, Termination::Converged);
    assert!(res.iterations <= 40);
    assert_abs_diff_eq!(res.estimate, 2.0_f64.sqrt(), epsilon = 1e-3);
    Ok(())
}

#[test]
fn final_width_is_strictly_below_tol() -> TestResult {
    let cfg = GoldenSectionCfg::new().set_tol(1e-4)?;
    let res = golden_section(&scenario(), 0.1, 5.0, cfg)?;

    let [lo, hi] = res.bracket.expect("golden section records its bracket");
    assert!(hi - lo < 1e-4);
    Ok(())
}

#[test]
fn switching_parameter_drops_fixed_value() -> TestResult {
    // 4.0 was meant as μ; searching μ must fall back to the population std
    let cfg = GoldenSectionCfg::new().set_fixed(4.0)?.set_parameter(Parameter::Mu);
    assert_eq!(cfg.fixed(), None);

    let res = golden_section(&scenario(), 0.0, 10.0, cfg)?;
    assert_abs_diff_eq!(res.estimate, 5.0, epsilon = 1e-5);

    let kept = GoldenSectionCfg::new().set_fixed(4.0)?.set_parameter(Parameter::Sigma);
    assert_eq!(kept.fixed(), Some(4.0));
    Ok(())
}

#[test]
fn fixed_sigma_must_be_positive() -> TestResult {
    for v in [-1.0, 0.0, f64::NAN] {
        let err = GoldenSectionCfg::new()
            .set_parameter(Parameter::Mu)
            .set_fixed(v)
            .unwrap_err();
        assert!(matches!(
            err,
            GoldenSectionError::Objective(ObjectiveError::InvalidParameter { name: "sigma", .. })
        ));
    }

    // a negative μ is fine
    let cfg = GoldenSectionCfg::new().set_fixed(-1.0)?;
    assert_eq!(cfg.fixed(), Some(-1.0));

    let cfg = GoldenSectionCfg::new().set_parameter(Parameter::Mu).set_fixed(2.0)?;
    assert_eq!(cfg.fixed(), Some(2.0));
    Ok(())
}
