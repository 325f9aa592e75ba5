use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const GAMMA_PREFIX: &str = "gamma_";
pub const BF_PREFIX: &str = "bf_";
pub const BF_TF_ADJ_PREFIX: &str = "bf_tf_adj_";
pub const MATCH_WEIGHT_KEY: &str = "match_weight";

/// Evidence recorded for one compared field.
///
/// `None` means the scorer emitted no Bayes factor for that slot, which
/// contributes nothing (an implicit factor of 1).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldEvidence {
    pub gamma: Value,
    pub bayes_factor: Option<f64>,
    pub tf_adjustment: Option<f64>,
}

impl FieldEvidence {
    #[inline]
    pub fn standard_factor(&self) -> f64 {
        self.bayes_factor.unwrap_or(1.0)
    }

    #[inline]
    pub fn tf_factor(&self) -> f64 {
        self.tf_adjustment.unwrap_or(1.0)
    }
}

/// A scored comparison between two records, with its `gamma_` / `bf_` /
/// `bf_tf_adj_` keys already grouped per field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoredComparisonRow {
    pub match_weight: f64,
    /// Keyed by field name; iteration order is lexicographic.
    pub fields: BTreeMap<String, FieldEvidence>,
    /// `bf_`-prefixed keys with no matching `gamma_` column, keyed by the
    /// full column name. They still move the prior.
    pub unattributed: BTreeMap<String, f64>,
}

impl ScoredComparisonRow {
    /// Every Bayes factor the row carries with the column it came from, in
    /// a fixed order: per field (standard then tf), then unattributed
    /// columns. Absent factors appear as 1.
    pub fn keyed_bayes_factors(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        self.fields
            .iter()
            .flat_map(|(name, f)| {
                [
                    (format!("{}{}", BF_PREFIX, name), f.standard_factor()),
                    (format!("{}{}", BF_TF_ADJ_PREFIX, name), f.tf_factor()),
                ]
            })
            .chain(self.unattributed.iter().map(|(key, &f)| (key.clone(), f)))
    }
}

/// One bar of the waterfall chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallRow {
    pub column_name: String,
    pub label_for_charts: String,
    pub log2_bayes_factor: f64,
    pub bayes_factor: f64,
    pub comparison_vector_value: Option<Value>,
    pub term_frequency_adjustment: Option<bool>,
    pub bar_sort_order: usize,
}

impl WaterfallRow {
    /// True for the per-field increments (neither prior nor final score).
    pub fn is_increment(&self) -> bool {
        self.term_frequency_adjustment.is_some()
    }
}
