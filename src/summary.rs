use crate::bayes::log2_bayes_factor_to_probability;
use crate::error::ExplainResult;
use serde::{Deserialize, Serialize};

/// The sentence shown above the waterfall chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub match_weight: f64,
    pub match_probability: f64,
    pub text: String,
}

impl Headline {
    pub fn for_match_weight(match_weight: f64) -> ExplainResult<Self> {
        let match_probability = log2_bayes_factor_to_probability(match_weight)?;
        let text = format!(
            "Match weight {} corresponding to match probability {} i.e. {}",
            format_match_weight(match_weight),
            format_match_probability(match_probability),
            format_error_rate(match_probability)
        );
        Ok(Self {
            match_weight,
            match_probability,
            text,
        })
    }
}

pub fn format_match_weight(weight: f64) -> String {
    format!("{:.4}", weight)
}

pub fn format_match_probability(prob: f64) -> String {
    format!("{:.2}%", prob * 100.0)
}

/// Likely matches read as "1 in N" odds of being wrong; unlikely ones as
/// a percentage, since `1 / (1 - p)` sits near 1 there.
pub fn format_error_rate(prob: f64) -> String {
    if prob >= 0.5 {
        let error_rate = 1.0 / (1.0 - prob);
        let shown = if !error_rate.is_finite() {
            "∞".to_string()
        } else if error_rate < 2.0 {
            format!("{:.2}", error_rate)
        } else {
            group_thousands(error_rate.round())
        };
        format!("error rate: 1 in {}", shown)
    } else {
        format!("{:.2}% chance of error", (1.0 - prob) * 100.0)
    }
}

/// Formats a whole number with `,` between thousands: `1234567` → `1,234,567`.
pub fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 && digits != "0" {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
