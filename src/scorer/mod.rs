pub mod loader;
pub mod prior;
pub mod types;
pub mod waterfall;

pub use self::loader::{first_row_from_query_result, parse_query_result};
pub use self::prior::derive_prior_match_weight;
pub use self::types::{FieldEvidence, ScoredComparisonRow, WaterfallRow};
pub use self::waterfall::decompose;

use crate::error::ExplainResult;

impl ScoredComparisonRow {
    pub fn prior_match_weight(&self) -> ExplainResult<f64> {
        prior::derive_prior_match_weight(self)
    }

    /// Bars for the waterfall chart, prior first and final score last.
    pub fn waterfall(&self) -> ExplainResult<Vec<WaterfallRow>> {
        waterfall::decompose(self)
    }
}
