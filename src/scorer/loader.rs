use super::types::{
    FieldEvidence, ScoredComparisonRow, BF_PREFIX, BF_TF_ADJ_PREFIX, GAMMA_PREFIX,
    MATCH_WEIGHT_KEY,
};
use crate::error::{ExplainError, ExplainResult};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

impl ScoredComparisonRow {
    /// Groups a flat scorer row into per-field evidence.
    ///
    /// A `bf_tf_adj_X` key is a tf adjustment only when `gamma_X` exists;
    /// otherwise it is tried as the standard factor of field `tf_adj_X`.
    pub fn from_map(row: &Map<String, Value>) -> ExplainResult<Self> {
        let match_weight = match row.get(MATCH_WEIGHT_KEY) {
            None | Some(Value::Null) => {
                return Err(ExplainError::malformed(MATCH_WEIGHT_KEY, "missing"));
            }
            Some(v) => v
                .as_f64()
                .ok_or_else(|| ExplainError::malformed(MATCH_WEIGHT_KEY, format!("not a number: {}", v)))?,
        };

        let mut fields: BTreeMap<String, FieldEvidence> = row
            .iter()
            .filter_map(|(k, v)| {
                k.strip_prefix(GAMMA_PREFIX).map(|name| {
                    (
                        name.to_string(),
                        FieldEvidence {
                            gamma: v.clone(),
                            ..Default::default()
                        },
                    )
                })
            })
            .collect();

        let mut unattributed = BTreeMap::new();

        for (key, value) in row.iter().filter(|(k, _)| k.starts_with(BF_PREFIX)) {
            let factor = parse_bayes_factor(key, value)?;

            if let Some(field) = key
                .strip_prefix(BF_TF_ADJ_PREFIX)
                .and_then(|name| fields.get_mut(name))
            {
                field.tf_adjustment = factor;
                continue;
            }

            let name = &key[BF_PREFIX.len()..];
            if let Some(field) = fields.get_mut(name) {
                field.bayes_factor = factor;
            } else if let Some(f) = factor {
                unattributed.insert(key.clone(), f);
            }
        }

        if !unattributed.is_empty() {
            warn!(
                "{} Bayes factor column(s) have no gamma_ column and only move the prior: {:?}",
                unattributed.len(),
                unattributed.keys().collect::<Vec<_>>()
            );
        }
        debug!(
            "Parsed scored row: match_weight={:.4}, {} compared fields",
            match_weight,
            fields.len()
        );

        Ok(Self {
            match_weight,
            fields,
            unattributed,
        })
    }

    pub fn from_value(value: &Value) -> ExplainResult<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            other => Err(ExplainError::malformed(
                "row",
                format!("expected a JSON object, found {}", json_kind(other)),
            )),
        }
    }

    pub fn from_json_str(text: &str) -> ExplainResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Reads a row file. Accepts either a single row object or a query
    /// result array, in which case the first row is used.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ExplainResult<Self> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;
        match value {
            Value::Array(_) => Self::from_value(&first_row_from_query_result(&value)?),
            other => Self::from_value(&other),
        }
    }
}

/// Null or absent means "no contribution". Zero and negative factors are
/// rejected: log2 is undefined there.
fn parse_bayes_factor(key: &str, value: &Value) -> ExplainResult<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            let f = n
                .as_f64()
                .ok_or_else(|| ExplainError::malformed(key, "number out of range"))?;
            if f <= 0.0 {
                return Err(ExplainError::DomainEdgeCase {
                    operation: "log2",
                    value: f,
                    reason: format!("Bayes factor '{}' must be strictly positive", key),
                });
            }
            Ok(Some(f))
        }
        other => Err(ExplainError::malformed(
            key,
            format!("expected a number or null, found {}", json_kind(other)),
        )),
    }
}

/// The SQL collaborator hands back every result row; the explainer
/// works on the first.
pub fn first_row_from_query_result(result: &Value) -> ExplainResult<Value> {
    let rows = result.as_array().ok_or_else(|| {
        ExplainError::malformed(
            "query_result",
            format!("expected an array of rows, found {}", json_kind(result)),
        )
    })?;
    let first = rows
        .first()
        .ok_or_else(|| ExplainError::malformed("query_result", "result contains no rows"))?;
    if !first.is_object() {
        return Err(ExplainError::malformed(
            "query_result[0]",
            format!("expected a row object, found {}", json_kind(first)),
        ));
    }
    Ok(first.clone())
}

pub fn parse_query_result(text: &str) -> ExplainResult<ScoredComparisonRow> {
    let value: Value = serde_json::from_str(text)?;
    ScoredComparisonRow::from_value(&first_row_from_query_result(&value)?)
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
