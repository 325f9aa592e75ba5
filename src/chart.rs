use crate::error::{ExplainError, ExplainResult};
use crate::scorer::WaterfallRow;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Vega-Lite waterfall template shipped with the crate.
pub const DEFAULT_WATERFALL_TEMPLATE: &str = include_str!("../data/waterfall_spec.json");

pub fn default_template() -> ExplainResult<Value> {
    Ok(serde_json::from_str(DEFAULT_WATERFALL_TEMPLATE)?)
}

pub fn load_template<P: AsRef<Path>>(path: P) -> ExplainResult<Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Copies `template` and publishes `rows` as `datasets[dataset]`.
///
/// Returns `None` when there are no rows: the renderer keeps whatever it
/// showed before rather than drawing an empty chart.
pub fn build_chart_spec(
    template: &Value,
    rows: &[WaterfallRow],
    dataset: &str,
) -> ExplainResult<Option<Value>> {
    if rows.is_empty() {
        return Ok(None);
    }

    let mut spec = template.clone();
    let root = spec.as_object_mut().ok_or_else(|| {
        ExplainError::Config("chart template must be a JSON object".to_string())
    })?;

    let datasets = root
        .entry("datasets")
        .or_insert_with(|| Value::Object(Map::new()));
    if !datasets.is_object() {
        *datasets = Value::Object(Map::new());
    }
    if let Value::Object(datasets) = datasets {
        datasets.insert(dataset.to_string(), serde_json::to_value(rows)?);
    }

    Ok(Some(spec))
}
