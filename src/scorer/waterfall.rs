use super::prior::{derive_prior_match_weight, keyed_log2};
use super::types::{
    ScoredComparisonRow, WaterfallRow, BF_PREFIX, BF_TF_ADJ_PREFIX, MATCH_WEIGHT_KEY,
};
use crate::error::{ExplainError, ExplainResult};

pub const PRIOR_COLUMN: &str = "Prior";
pub const PRIOR_LABEL: &str = "Starting match weight (prior)";
pub const FINAL_COLUMN: &str = "Final score";
pub const TF_COLUMN_PREFIX: &str = "tf adj on ";

/// Breaks a scored row into waterfall bars.
///
/// Layout: the prior, then for each compared field (lexicographic) its
/// standard bar and its tf-adjusted bar, then the final score. The prior
/// and final bars carry absolute weights; the field bars are increments,
/// so `prior + sum(increments) == match_weight`.
pub fn decompose(row: &ScoredComparisonRow) -> ExplainResult<Vec<WaterfallRow>> {
    let mut output = Vec::with_capacity(2 * row.fields.len() + 2);
    let mut bar_sort_order = 0;

    let prior = derive_prior_match_weight(row)?;
    output.push(WaterfallRow {
        column_name: PRIOR_COLUMN.to_string(),
        label_for_charts: PRIOR_LABEL.to_string(),
        log2_bayes_factor: prior,
        bayes_factor: bayes_factor_of(PRIOR_COLUMN, prior)?,
        comparison_vector_value: None,
        term_frequency_adjustment: None,
        bar_sort_order: advance(&mut bar_sort_order),
    });

    for (name, evidence) in &row.fields {
        let label = format!("Gamma value for {}", name);
        let standard = evidence.standard_factor();
        let tf = evidence.tf_factor();

        output.push(WaterfallRow {
            column_name: name.clone(),
            label_for_charts: label.clone(),
            log2_bayes_factor: keyed_log2(&format!("{}{}", BF_PREFIX, name), standard)?,
            bayes_factor: standard,
            comparison_vector_value: Some(evidence.gamma.clone()),
            term_frequency_adjustment: Some(false),
            bar_sort_order: advance(&mut bar_sort_order),
        });

        output.push(WaterfallRow {
            column_name: format!("{}{}", TF_COLUMN_PREFIX, name),
            label_for_charts: label,
            log2_bayes_factor: keyed_log2(&format!("{}{}", BF_TF_ADJ_PREFIX, name), tf)?,
            bayes_factor: tf,
            comparison_vector_value: Some(evidence.gamma.clone()),
            term_frequency_adjustment: Some(true),
            bar_sort_order: advance(&mut bar_sort_order),
        });
    }

    output.push(WaterfallRow {
        column_name: FINAL_COLUMN.to_string(),
        label_for_charts: FINAL_COLUMN.to_string(),
        log2_bayes_factor: row.match_weight,
        bayes_factor: bayes_factor_of(MATCH_WEIGHT_KEY, row.match_weight)?,
        comparison_vector_value: None,
        term_frequency_adjustment: None,
        bar_sort_order: advance(&mut bar_sort_order),
    });

    Ok(output)
}

#[inline]
fn advance(order: &mut usize) -> usize {
    let current = *order;
    *order += 1;
    current
}

/// `2^weight` for an absolute bar. A weight past the f64 range would put
/// an unbounded factor in the chart data, so it is rejected instead.
fn bayes_factor_of(column: &str, weight: f64) -> ExplainResult<f64> {
    let factor = weight.exp2();
    if !factor.is_finite() {
        return Err(ExplainError::domain(
            "exp2",
            weight,
            format!("'{}' weight {} has no finite Bayes factor", column, weight),
        ));
    }
    Ok(factor)
}
