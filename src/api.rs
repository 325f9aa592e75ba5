use crate::chart;
use crate::config::Config;
use crate::error::ExplainResult;
use crate::records::{comparison_table, FieldComparison, RecordPair};
use crate::scorer::{ScoredComparisonRow, WaterfallRow};
use crate::summary::Headline;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Everything needed to render one explained comparison.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Explanation {
    pub headline: Headline,
    pub prior_match_weight: f64,
    pub waterfall: Vec<WaterfallRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comparisons: Vec<FieldComparison>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_json: Option<String>,
    pub chart: Option<Value>,
}

/// Holds the parsed chart template so repeated explanations don't re-read it.
pub struct Explainer {
    config: Config,
    template: Value,
}

impl Explainer {
    pub fn new(config: Config) -> ExplainResult<Self> {
        config.validate()?;
        let template = match &config.display.chart_template {
            Some(path) => {
                info!("Loading chart template from: {}", path);
                chart::load_template(path)?
            }
            None => chart::default_template()?,
        };
        Ok(Self { config, template })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn explain(
        &self,
        row: &ScoredComparisonRow,
        pair: Option<&RecordPair>,
    ) -> ExplainResult<Explanation> {
        let waterfall = row.waterfall()?;
        let prior_match_weight = waterfall
            .first()
            .map_or(row.match_weight, |prior| prior.log2_bayes_factor);
        let headline = Headline::for_match_weight(row.match_weight)?;

        let (comparisons, records_json) = match pair {
            Some(pair) => {
                let fields = self.config.display.get_compared_fields();
                (comparison_table(pair, &fields), Some(pair.to_pretty_json()?))
            }
            None => (Vec::new(), None),
        };

        let chart =
            chart::build_chart_spec(&self.template, &waterfall, &self.config.display.chart_dataset)?;

        debug!(
            "Explained comparison: {} bars, {} compared fields",
            waterfall.len(),
            comparisons.len()
        );

        Ok(Explanation {
            headline,
            prior_match_weight,
            waterfall,
            comparisons,
            records_json,
            chart,
        })
    }

    /// Parses and explains a raw scorer row.
    pub fn explain_value(
        &self,
        row: &Value,
        pair: Option<&RecordPair>,
    ) -> ExplainResult<Explanation> {
        let row = ScoredComparisonRow::from_value(row)?;
        self.explain(&row, pair)
    }

    /// Explains independent rows in parallel. Output order follows input
    /// order; one bad row does not affect the others.
    pub fn explain_batch(&self, rows: &[Value]) -> Vec<ExplainResult<Explanation>> {
        info!("Explaining batch of {} scored rows", rows.len());
        rows.par_iter()
            .map(|row| self.explain_value(row, None))
            .collect()
    }
}

/// One-shot explanation with the default configuration.
pub fn explain(row: &Value, pair: Option<&RecordPair>) -> ExplainResult<Explanation> {
    Explainer::new(Config::default())?.explain_value(row, pair)
}
