use crate::reports;
use clap::Args;
use linkexplain::api::{Explainer, Explanation};
use linkexplain::config::{Config, DisplayParams};
use linkexplain::error::{ExplainError, ExplainResult};
use linkexplain::records::RecordDeck;
use linkexplain::scorer::{first_row_from_query_result, WaterfallRow};
use serde_json::Value;
use std::fs;
use std::io;
use strum_macros::{Display, EnumString};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug, Clone)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub display: DisplayParams,

    /// Scored row as JSON: a single object, or a query result array.
    #[arg(short, long)]
    pub row: String,

    /// JSON array of {record_left, record_right} pairs.
    #[arg(long)]
    pub records: Option<String>,

    /// Which record pair to compare (0-based).
    #[arg(long, default_value_t = 0)]
    pub index: usize,

    /// Explain every row of a query result instead of only the first.
    #[arg(long, default_value_t = false)]
    pub all: bool,

    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

pub fn run(args: &ExplainArgs, config: Config) -> ExplainResult<()> {
    let explainer = Explainer::new(config)?;

    info!("📂 Loading scored row(s): {}", args.row);
    let raw: Value = serde_json::from_str(&fs::read_to_string(&args.row)?)?;

    if args.all {
        let rows = match raw {
            Value::Array(rows) => rows,
            other => vec![other],
        };
        let mut explanations = Vec::with_capacity(rows.len());
        for (i, result) in explainer.explain_batch(&rows).into_iter().enumerate() {
            match result {
                Ok(explanation) => explanations.push(explanation),
                Err(e) => warn!("⚠️  Row {} skipped: {}", i, e),
            }
        }
        return emit_many(&explanations, args.format);
    }

    let row = match raw {
        Value::Array(_) => first_row_from_query_result(&raw)?,
        other => other,
    };

    let mut deck = match &args.records {
        Some(path) => {
            info!("📂 Loading record pairs: {}", path);
            Some(RecordDeck::load_from_file(path)?)
        }
        None => None,
    };
    let pair = match deck.as_mut() {
        Some(deck) => {
            let pair = deck.select(args.index)?.clone();
            info!("{}", deck.position_label());
            Some(pair)
        }
        None => None,
    };

    let explanation = explainer.explain_value(&row, pair.as_ref())?;
    emit_many(std::slice::from_ref(&explanation), args.format)
}

fn emit_many(explanations: &[Explanation], format: OutputFormat) -> ExplainResult<()> {
    match format {
        OutputFormat::Table => {
            for explanation in explanations {
                reports::print_explanation(explanation);
            }
            Ok(())
        }
        OutputFormat::Json => {
            let text = match explanations {
                [single] => serde_json::to_string_pretty(single)?,
                many => serde_json::to_string_pretty(many)?,
            };
            println!("{}", text);
            Ok(())
        }
        OutputFormat::Csv => {
            let rows: Vec<&WaterfallRow> =
                explanations.iter().flat_map(|e| e.waterfall.iter()).collect();
            write_waterfall_csv(io::stdout(), &rows)
        }
    }
}

pub fn write_waterfall_csv<W: io::Write>(out: W, rows: &[&WaterfallRow]) -> ExplainResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "bar_sort_order",
        "column_name",
        "label_for_charts",
        "log2_bayes_factor",
        "bayes_factor",
        "comparison_vector_value",
        "term_frequency_adjustment",
    ])?;
    for row in rows {
        writer.write_record([
            row.bar_sort_order.to_string(),
            row.column_name.clone(),
            row.label_for_charts.clone(),
            row.log2_bayes_factor.to_string(),
            row.bayes_factor.to_string(),
            row.comparison_vector_value
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_default(),
            row.term_frequency_adjustment
                .map(|b| b.to_string())
                .unwrap_or_default(),
        ])?;
    }
    writer.flush().map_err(ExplainError::from)
}
