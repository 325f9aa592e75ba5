use crate::reports;
use clap::{ArgGroup, Args};
use linkexplain::bayes;
use linkexplain::error::{ExplainError, ExplainResult};

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("input").required(true).multiple(false)))]
pub struct ConvertArgs {
    #[arg(short, long, group = "input", allow_negative_numbers = true)]
    pub probability: Option<f64>,

    #[arg(short, long, group = "input", allow_negative_numbers = true)]
    pub bayes_factor: Option<f64>,

    #[arg(short, long, group = "input", allow_negative_numbers = true)]
    pub match_weight: Option<f64>,
}

pub struct Conversion {
    pub probability: f64,
    pub bayes_factor: f64,
    pub match_weight: f64,
}

pub fn convert(args: &ConvertArgs) -> ExplainResult<Conversion> {
    match (args.probability, args.bayes_factor, args.match_weight) {
        (Some(p), _, _) => Ok(Conversion {
            probability: p,
            bayes_factor: bayes::probability_to_bayes_factor(p)?,
            match_weight: bayes::probability_to_log2_bayes_factor(p)?,
        }),
        (_, Some(b), _) => Ok(Conversion {
            probability: bayes::bayes_factor_to_probability(b)?,
            bayes_factor: b,
            match_weight: bayes::checked_log2(b)?,
        }),
        (_, _, Some(w)) => Ok(Conversion {
            probability: bayes::log2_bayes_factor_to_probability(w)?,
            bayes_factor: w.exp2(),
            match_weight: w,
        }),
        (None, None, None) => Err(ExplainError::Config(
            "one of --probability, --bayes-factor or --match-weight is required".to_string(),
        )),
    }
}

pub fn run(args: &ConvertArgs) -> ExplainResult<()> {
    let conversion = convert(args)?;
    reports::print_conversion(&conversion);
    Ok(())
}
