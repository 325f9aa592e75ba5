use crate::reports;
use clap::Args;
use linkexplain::diff::ValueDiff;
use linkexplain::error::ExplainResult;
use serde_json::Value;

#[derive(Args, Debug, Clone)]
pub struct DiffArgs {
    /// Left value. A JSON array (e.g. '["a","b"]') is compared as a set.
    pub left: String,

    /// Right value.
    pub right: String,

    /// Print the segments as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &DiffArgs) -> ExplainResult<()> {
    let left = parse_operand(&args.left);
    let right = parse_operand(&args.right);
    let diff = ValueDiff::between(&left, &right);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
    } else {
        reports::print_value_diff(&args.left, &args.right, &diff);
    }
    Ok(())
}

/// Only arrays are taken as JSON; anything else is compared as typed.
fn parse_operand(text: &str) -> Value {
    match serde_json::from_str::<Value>(text) {
        Ok(v @ Value::Array(_)) => v,
        _ => Value::String(text.to_string()),
    }
}
