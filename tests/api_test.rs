use linkexplain::api::{explain, Explainer};
use linkexplain::config::Config;
use linkexplain::records::RecordPair;
use linkexplain::ExplainError;
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

fn scored_row() -> Value {
    json!({
        "match_weight": 5,
        "gamma_first_name": 2,
        "bf_first_name": 4,
        "bf_tf_adj_first_name": 1,
        "gamma_surname": 1,
        "bf_surname": 2,
        "bf_tf_adj_surname": 0.5
    })
}

fn pair() -> RecordPair {
    serde_json::from_value(json!({
        "record_left": {"first_name": "John", "surname": "Smith", "dob": "1990-01-01"},
        "record_right": {"first_name": "Jon", "surname": "Smith", "dob": "1990-10-01"}
    }))
    .unwrap()
}

#[test]
fn test_explain_without_records() {
    let explanation = explain(&scored_row(), None).unwrap();

    assert_eq!(explanation.waterfall.len(), 6);
    assert_eq!(explanation.prior_match_weight, 3.0);
    assert!(explanation.comparisons.is_empty());
    assert!(explanation.records_json.is_none());
    assert!(explanation.headline.text.starts_with("Match weight 5.0000"));
}

#[test]
fn test_explain_with_records_builds_comparison_table() {
    let explanation = explain(&scored_row(), Some(&pair())).unwrap();

    assert_eq!(explanation.comparisons.len(), 6);
    assert_eq!(explanation.comparisons[0].field, "first_name");
    assert_eq!(explanation.comparisons[0].diff.to_plain(), "Jo[-h-]n");
    assert!(explanation.comparisons[1].diff.is_empty());

    let records: Value = serde_json::from_str(explanation.records_json.as_deref().unwrap()).unwrap();
    assert_eq!(records["record_right"]["first_name"], "Jon");
}

#[test]
fn test_chart_spec_publishes_waterfall_dataset() {
    let explanation = explain(&scored_row(), None).unwrap();
    let chart = explanation.chart.unwrap();

    assert_eq!(chart["data"]["name"], "data-1");
    let bars = chart["datasets"]["data-1"].as_array().unwrap();
    assert_eq!(bars.len(), explanation.waterfall.len());
    assert_eq!(bars[0]["column_name"], "Prior");
    assert_eq!(bars[5]["column_name"], "Final score");
}

#[test]
fn test_custom_template_and_dataset() {
    let mut template = NamedTempFile::new().unwrap();
    write!(template, r#"{{"mark": "bar", "datasets": "stale"}}"#).unwrap();

    let mut config = Config::default();
    config.display.chart_dataset = "bars".to_string();
    config.display.chart_template = Some(template.path().to_string_lossy().into_owned());

    let explainer = Explainer::new(config).unwrap();
    let explanation = explainer.explain_value(&scored_row(), None).unwrap();
    let chart = explanation.chart.unwrap();

    assert_eq!(chart["mark"], "bar");
    assert_eq!(chart["datasets"]["bars"].as_array().unwrap().len(), 6);
}

#[test]
fn test_non_object_template_is_rejected_on_use() {
    let mut template = NamedTempFile::new().unwrap();
    write!(template, "[1, 2, 3]").unwrap();

    let mut config = Config::default();
    config.display.chart_template = Some(template.path().to_string_lossy().into_owned());

    let explainer = Explainer::new(config).unwrap();
    let err = explainer.explain_value(&scored_row(), None).unwrap_err();
    assert!(matches!(err, ExplainError::Config(_)));
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = Config::default();
    config.display.chart_dataset = String::new();
    assert!(Explainer::new(config).is_err());
}

#[test]
fn test_batch_preserves_order_and_isolates_errors() {
    let explainer = Explainer::new(Config::default()).unwrap();
    let rows = vec![
        json!({"match_weight": 1.0}),
        json!({"match_weight": "bad"}),
        json!({"match_weight": -2.0, "gamma_a": 0, "bf_a": 0.25}),
    ];

    let results = explainer.explain_batch(&rows);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().headline.match_weight, 1.0);
    assert!(matches!(results[1], Err(ExplainError::MalformedInput { .. })));
    assert_eq!(results[2].as_ref().unwrap().prior_match_weight, 0.0);
}

#[test]
fn test_overflowing_final_weight_never_reaches_the_chart() {
    let err = explain(&json!({"match_weight": 1100.0, "gamma_a": 1, "bf_a": 2.0}), None).unwrap_err();
    assert!(matches!(err, ExplainError::DomainEdgeCase { operation: "exp2", .. }));
}
