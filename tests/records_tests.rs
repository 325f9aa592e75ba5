use linkexplain::config::TermFrequencyDefaults;
use linkexplain::diff::{DiffOperation, DiffSegment};
use linkexplain::records::{
    comparison_table, prepare_record, scale_tf_value, tf_reciprocal_label, Record, RecordDeck,
    RecordPair, TfScale,
};
use linkexplain::summary::{format_error_rate, group_thousands, Headline};
use linkexplain::ExplainError;
use rstest::rstest;
use serde_json::{json, Value};

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => panic!("test record must be an object"),
    }
}

fn deck_json() -> &'static str {
    r#"[
        {"record_left": {"first_name": "John"}, "record_right": {"first_name": "Jon"}},
        {"record_left": {"first_name": "Mary"}, "record_right": {"first_name": "Marie"}},
        {"record_left": {"first_name": "Ann"}, "record_right": {"first_name": "Anne"}}
    ]"#
}

// --- PREPARE RECORD ---

#[test]
fn test_prepare_record_nulls_blanks_and_builds_concat() {
    let input = record(json!({
        "first_name": "John",
        "surname": "Smith",
        "dob": "",
        "occupation": null
    }));
    let out = prepare_record(&input, json!(7), &TermFrequencyDefaults::default()).unwrap();

    assert_eq!(out["unique_id"], json!(7));
    assert_eq!(out["first_name"], json!("John"));
    assert_eq!(out["dob"], Value::Null);
    assert_eq!(out["occupation"], Value::Null);
    assert_eq!(out["birth_place"], Value::Null);
    assert_eq!(out["first_name_surname_concat"], json!("John Smith"));
}

#[test]
fn test_prepare_record_concat_trims_missing_half() {
    let input = record(json!({"surname": "Smith"}));
    let out = prepare_record(&input, json!(1), &TermFrequencyDefaults::default()).unwrap();
    assert_eq!(out["first_name_surname_concat"], json!("Smith"));

    let out = prepare_record(&Record::new(), json!(1), &TermFrequencyDefaults::default()).unwrap();
    assert_eq!(out["first_name_surname_concat"], Value::Null);
}

#[test]
fn test_prepare_record_sends_only_overridden_term_frequencies() {
    let input = record(json!({
        "tf_surname": "0.0003449",
        "tf_first_name": "0.01",
        "tf_birth_place": "  ",
        "tf_occupation": 0.5
    }));
    let out = prepare_record(&input, json!(1), &TermFrequencyDefaults::default()).unwrap();

    assert_eq!(out["tf_surname"], Value::Null);
    assert_eq!(out["tf_first_name"], json!(0.01));
    assert_eq!(out["tf_birth_place"], Value::Null);
    assert_eq!(out["tf_occupation"], json!(0.5));
    assert_eq!(out["tf_first_name_surname_concat"], Value::Null);
}

#[test]
fn test_prepare_record_rejects_non_numeric_term_frequency() {
    let input = record(json!({"tf_occupation": "common"}));
    let err = prepare_record(&input, json!(1), &TermFrequencyDefaults::default()).unwrap_err();
    match err {
        ExplainError::MalformedInput { key, .. } => assert_eq!(key, "tf_occupation"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_record_pair_prepare_numbers_sides_and_uses_given_defaults() {
    let pair = RecordPair {
        record_left: record(json!({"surname": "Smith", "tf_surname": "0.0003449"})),
        record_right: record(json!({"surname": "Smyth", "tf_surname": "0.5"})),
    };
    let defaults = TermFrequencyDefaults {
        tf_surname: 0.5,
        ..TermFrequencyDefaults::default()
    };
    let prepared = pair.prepare(&defaults).unwrap();

    assert_eq!(prepared.record_left["unique_id"], json!(1));
    assert_eq!(prepared.record_right["unique_id"], json!(2));
    assert_eq!(prepared.record_left["tf_surname"], json!(0.0003449));
    assert_eq!(prepared.record_right["tf_surname"], Value::Null);
    assert_eq!(prepared.record_right["first_name_surname_concat"], json!("Smyth"));
}

// --- COMPARISON TABLE ---

#[test]
fn test_comparison_table_follows_field_order() {
    let pair = RecordPair {
        record_left: record(json!({"first_name": "John", "surname": "Smith", "occupation": ["nurse"]})),
        record_right: record(json!({"first_name": "Jon", "surname": "Smith", "occupation": ["nurse", "chef"]})),
    };
    let table = comparison_table(&pair, &["surname", "first_name", "dob", "occupation"]);

    let fields: Vec<&str> = table.iter().map(|c| c.field.as_str()).collect();
    assert_eq!(fields, vec!["surname", "first_name", "dob", "occupation"]);

    assert!(table[0].diff.is_empty());
    assert_eq!(
        table[1].diff.segments,
        vec![
            DiffSegment::new(DiffOperation::Unchanged, "Jo"),
            DiffSegment::new(DiffOperation::Removed, "h"),
            DiffSegment::new(DiffOperation::Unchanged, "n"),
        ]
    );
    assert_eq!(table[2].left_value, "");
    assert!(table[2].diff.is_empty());
    assert_eq!(table[3].diff.to_plain(), "nurse, {+chef+}");
}

#[test]
fn test_record_pair_json_uses_left_right_keys() {
    let pair = RecordPair {
        record_left: record(json!({"unique_id": 1})),
        record_right: record(json!({"unique_id": 2})),
    };
    let text = pair.to_pretty_json().unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, json!({"record_left": {"unique_id": 1}, "record_right": {"unique_id": 2}}));
}

// --- TERM FREQUENCY HELPERS ---

#[rstest]
#[case("0.5", Some("1 in 2"))]
#[case("0.0003449", Some("1 in 2,899"))]
#[case(" 0.001 ", Some("1 in 1,000"))]
#[case("0", None)]
#[case("rare", None)]
fn test_tf_reciprocal_label(#[case] input: &str, #[case] expected: Option<&str>) {
    assert_eq!(tf_reciprocal_label(input).as_deref(), expected);
}

#[rstest]
#[case("0.01", TfScale::Double, "0.02")]
#[case("0.5", TfScale::Halve, "0.25")]
#[case("n/a", TfScale::Double, "n/a")]
fn test_scale_tf_value(#[case] input: &str, #[case] scale: TfScale, #[case] expected: &str) {
    assert_eq!(scale_tf_value(input, scale), expected);
}

// --- RECORD DECK ---

#[test]
fn test_deck_navigation_is_clamped() {
    let mut deck = RecordDeck::from_json_str(deck_json()).unwrap();
    assert_eq!(deck.len(), 3);
    assert_eq!(deck.position_label(), "Record 1 of 3");

    deck.previous_record();
    assert_eq!(deck.index(), 0);

    deck.next_record();
    deck.next_record();
    let last = deck.next_record().unwrap();
    assert_eq!(last.record_left["first_name"], json!("Ann"));
    assert_eq!(deck.position_label(), "Record 3 of 3");
}

#[test]
fn test_deck_select_out_of_range() {
    let mut deck = RecordDeck::from_json_str(deck_json()).unwrap();
    assert_eq!(deck.select(1).unwrap().record_right["first_name"], json!("Marie"));
    assert!(matches!(deck.select(3), Err(ExplainError::MalformedInput { .. })));
    assert_eq!(deck.index(), 1);
}

#[test]
fn test_empty_deck() {
    let mut deck = RecordDeck::from_json_str("[]").unwrap();
    assert!(deck.is_empty());
    assert!(deck.current().is_none());
    assert!(deck.next_record().is_none());
}

// --- HEADLINE ---

#[rstest]
#[case(1234.0, "1,234")]
#[case(999.0, "999")]
#[case(1_000_000.0, "1,000,000")]
#[case(-12345.0, "-12,345")]
#[case(0.0, "0")]
fn test_group_thousands(#[case] value: f64, #[case] expected: &str) {
    assert_eq!(group_thousands(value), expected);
}

#[rstest]
#[case(0.5, "error rate: 1 in 2")]
#[case(0.8, "error rate: 1 in 5")]
#[case(0.999, "error rate: 1 in 1,000")]
#[case(1.0, "error rate: 1 in ∞")]
#[case(0.25, "75.00% chance of error")]
fn test_format_error_rate(#[case] p: f64, #[case] expected: &str) {
    assert_eq!(format_error_rate(p), expected);
}

#[test]
fn test_headline_text() {
    let headline = Headline::for_match_weight(5.0).unwrap();
    assert!((headline.match_probability - 32.0 / 33.0).abs() < 1e-12);
    assert_eq!(
        headline.text,
        "Match weight 5.0000 corresponding to match probability 96.97% i.e. error rate: 1 in 33"
    );
}
