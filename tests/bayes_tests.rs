use linkexplain::bayes::{
    bayes_factor_to_probability, checked_log2, log2_bayes_factor_to_probability,
    probability_to_bayes_factor, probability_to_log2_bayes_factor,
};
use linkexplain::ExplainError;
use rstest::rstest;

const TOL: f64 = 1e-9;

#[rstest]
#[case(0.0, 0.0)]
#[case(1.0, 0.5)]
#[case(3.0, 0.75)]
#[case(9.0, 0.9)]
fn test_bayes_factor_to_probability(#[case] b: f64, #[case] expected: f64) {
    let p = bayes_factor_to_probability(b).unwrap();
    assert!((p - expected).abs() < TOL, "bf {} -> {} (expected {})", b, p, expected);
}

#[test]
fn test_infinite_bayes_factor_is_certainty() {
    assert_eq!(bayes_factor_to_probability(f64::INFINITY).unwrap(), 1.0);
}

#[rstest]
#[case(0.5, 1.0)]
#[case(0.75, 3.0)]
#[case(0.2, 0.25)]
#[case(0.0, 0.0)]
fn test_probability_to_bayes_factor(#[case] p: f64, #[case] expected: f64) {
    let b = probability_to_bayes_factor(p).unwrap();
    assert!((b - expected).abs() < TOL);
}

#[rstest]
#[case(1.0)]
#[case(1.5)]
#[case(-0.1)]
#[case(f64::NAN)]
fn test_probability_outside_domain_is_rejected(#[case] p: f64) {
    let err = probability_to_bayes_factor(p).unwrap_err();
    assert!(
        matches!(err, ExplainError::DomainEdgeCase { operation: "probability_to_bayes_factor", .. }),
        "unexpected error for p = {}: {:?}",
        p,
        err
    );
}

#[rstest]
#[case(0.5, 0.0)]
#[case(0.8, 2.0)]
#[case(0.2, -2.0)]
fn test_probability_to_log2_bayes_factor(#[case] p: f64, #[case] expected: f64) {
    let w = probability_to_log2_bayes_factor(p).unwrap();
    assert!((w - expected).abs() < TOL);
}

#[test]
fn test_zero_probability_has_no_match_weight() {
    assert!(matches!(
        probability_to_log2_bayes_factor(0.0),
        Err(ExplainError::DomainEdgeCase { .. })
    ));
}

#[rstest]
#[case(0.0, 0.5)]
#[case(2.0, 0.8)]
#[case(-2.0, 0.2)]
#[case(5.0, 32.0 / 33.0)]
fn test_log2_bayes_factor_to_probability(#[case] w: f64, #[case] expected: f64) {
    let p = log2_bayes_factor_to_probability(w).unwrap();
    assert!((p - expected).abs() < TOL);
}

#[test]
fn test_huge_match_weight_saturates() {
    assert_eq!(log2_bayes_factor_to_probability(5000.0).unwrap(), 1.0);
    assert_eq!(log2_bayes_factor_to_probability(-5000.0).unwrap(), 0.0);
    assert!(log2_bayes_factor_to_probability(f64::NAN).is_err());
}

#[rstest]
#[case(0.0)]
#[case(-1.0)]
#[case(f64::INFINITY)]
fn test_checked_log2_rejects_non_positive(#[case] b: f64) {
    assert!(checked_log2(b).is_err());
}

#[test]
fn test_round_trip_examples() {
    for p in [0.001, 0.1, 0.333, 0.5, 0.9, 0.999_999] {
        let back = bayes_factor_to_probability(probability_to_bayes_factor(p).unwrap()).unwrap();
        assert!((back - p).abs() < TOL, "{} -> {}", p, back);
    }
}
