use super::types::ScoredComparisonRow;
use crate::bayes::checked_log2;
use crate::error::{ExplainError, ExplainResult};

/// Recovers the starting match weight before any field evidence:
/// `match_weight - log2(product of every bf_ column)`.
///
/// The log of the product is taken as a sum of logs so that it matches
/// the per-row increments of the waterfall to the last bit.
pub fn derive_prior_match_weight(row: &ScoredComparisonRow) -> ExplainResult<f64> {
    let mut log_product = 0.0;
    for (key, factor) in row.keyed_bayes_factors() {
        log_product += keyed_log2(&key, factor)?;
    }
    Ok(row.match_weight - log_product)
}

/// `log2` of the factor stored under `key`; the error names the column.
pub(crate) fn keyed_log2(key: &str, factor: f64) -> ExplainResult<f64> {
    checked_log2(factor).map_err(|_| {
        ExplainError::domain(
            "log2",
            factor,
            format!("Bayes factor '{}' must be a positive finite number", key),
        )
    })
}
