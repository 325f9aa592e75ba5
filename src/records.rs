use crate::config::TermFrequencyDefaults;
use crate::diff::{value_text, ValueDiff};
use crate::error::{ExplainError, ExplainResult};
use crate::summary::group_thousands;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumString};

pub const COMPARED_FIELDS: [&str; 6] = [
    "first_name",
    "surname",
    "dob",
    "birth_place",
    "postcode_fake",
    "occupation",
];

pub const CONCAT_FIELD: &str = "first_name_surname_concat";

pub type Record = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordPair {
    #[serde(default)]
    pub record_left: Record,
    #[serde(default)]
    pub record_right: Record,
}

impl RecordPair {
    /// Pretty-printed `{record_left, record_right}`, ready to paste elsewhere.
    pub fn to_pretty_json(&self) -> ExplainResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Both sides run through [`prepare_record`], left as id 1 and right as id 2.
    pub fn prepare(&self, defaults: &TermFrequencyDefaults) -> ExplainResult<RecordPair> {
        Ok(RecordPair {
            record_left: prepare_record(&self.record_left, Value::from(1), defaults)?,
            record_right: prepare_record(&self.record_right, Value::from(2), defaults)?,
        })
    }
}

/// One column of the left/right/diff comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldComparison {
    pub field: String,
    pub left_value: String,
    pub right_value: String,
    pub diff: ValueDiff,
}

pub fn comparison_table<S: AsRef<str>>(pair: &RecordPair, fields: &[S]) -> Vec<FieldComparison> {
    fields
        .iter()
        .map(|field| {
            let field = field.as_ref();
            let left = field_value(&pair.record_left, field);
            let right = field_value(&pair.record_right, field);
            FieldComparison {
                field: field.to_string(),
                left_value: value_text(&left),
                right_value: value_text(&right),
                diff: ValueDiff::between(&left, &right),
            }
        })
        .collect()
}

/// Absent and null both read as an empty string.
fn field_value(record: &Record, field: &str) -> Value {
    match record.get(field) {
        None | Some(Value::Null) => Value::String(String::new()),
        Some(v) => v.clone(),
    }
}

/// Builds the record handed to the scorer from what the user entered.
///
/// Blank compared fields become null, `first_name_surname_concat` is
/// derived, and a `tf_` field is only sent (as a number) when it differs
/// from its default.
pub fn prepare_record(
    input: &Record,
    unique_id: Value,
    defaults: &TermFrequencyDefaults,
) -> ExplainResult<Record> {
    let mut record = Record::new();
    record.insert("unique_id".to_string(), unique_id);

    for field in COMPARED_FIELDS {
        let text = input.get(field).map(value_text).unwrap_or_default();
        record.insert(field.to_string(), non_empty(text));
    }

    let first = input.get("first_name").map(value_text).unwrap_or_default();
    let surname = input.get("surname").map(value_text).unwrap_or_default();
    let concat = format!("{} {}", first, surname).trim().to_string();
    record.insert(CONCAT_FIELD.to_string(), non_empty(concat));

    for (name, default) in defaults.entries() {
        let value = match input.get(name) {
            None | Some(Value::Null) => Value::Null,
            Some(raw) => tf_override(name, raw, default)?,
        };
        record.insert(name.to_string(), value);
    }

    Ok(record)
}

fn non_empty(text: String) -> Value {
    if text.is_empty() {
        Value::Null
    } else {
        Value::String(text)
    }
}

fn tf_override(name: &str, raw: &Value, default: f64) -> ExplainResult<Value> {
    let text = value_text(raw);
    let text = text.trim();
    if text.is_empty() {
        return Ok(Value::Null);
    }
    let parsed: f64 = text
        .parse()
        .map_err(|_| ExplainError::malformed(name, format!("'{}' is not a number", text)))?;
    if parsed == default {
        return Ok(Value::Null);
    }
    Number::from_f64(parsed)
        .map(Value::Number)
        .ok_or_else(|| ExplainError::malformed(name, format!("'{}' is not a finite number", text)))
}

/// `"1 in N"` for a term frequency, the way users tend to think about rarity.
pub fn tf_reciprocal_label(value: &str) -> Option<String> {
    let v: f64 = value.trim().parse().ok()?;
    if v == 0.0 || !v.is_finite() {
        return None;
    }
    Some(format!("1 in {}", group_thousands((1.0 / v).round())))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum TfScale {
    Double,
    Halve,
}

/// Doubles or halves a term frequency typed as text; non-numeric text is
/// returned untouched.
pub fn scale_tf_value(value: &str, scale: TfScale) -> String {
    match value.trim().parse::<f64>() {
        Ok(v) => match scale {
            TfScale::Double => (v * 2.0).to_string(),
            TfScale::Halve => (v / 2.0).to_string(),
        },
        Err(_) => value.to_string(),
    }
}

/// The example record pairs a user can step through.
#[derive(Debug, Clone, Default)]
pub struct RecordDeck {
    pairs: Vec<RecordPair>,
    index: usize,
}

impl RecordDeck {
    pub fn new(pairs: Vec<RecordPair>) -> Self {
        Self { pairs, index: 0 }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ExplainResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(text: &str) -> ExplainResult<Self> {
        let pairs: Vec<RecordPair> = serde_json::from_str(text)?;
        Ok(Self::new(pairs))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&RecordPair> {
        self.pairs.get(self.index)
    }

    pub fn select(&mut self, index: usize) -> ExplainResult<&RecordPair> {
        if index >= self.pairs.len() {
            return Err(ExplainError::malformed(
                "index",
                format!("record {} requested but only {} available", index + 1, self.pairs.len()),
            ));
        }
        self.index = index;
        Ok(&self.pairs[index])
    }

    /// Moves back one pair; stays put on the first.
    pub fn previous_record(&mut self) -> Option<&RecordPair> {
        self.index = self.index.saturating_sub(1);
        self.current()
    }

    /// Moves forward one pair; stays put on the last.
    pub fn next_record(&mut self) -> Option<&RecordPair> {
        if self.index + 1 < self.pairs.len() {
            self.index += 1;
        }
        self.current()
    }

    pub fn position_label(&self) -> String {
        format!("Record {} of {}", self.index + 1, self.pairs.len())
    }
}
