//! Conversions between probability, Bayes factor (odds) and log2 Bayes
//! factor (match weight).
//!
//! Every conversion that can leave the finite reals reports a
//! [`ExplainError::DomainEdgeCase`] instead of handing back `inf`/`NaN`,
//! so nothing unbounded reaches chart data.

use crate::error::{ExplainError, ExplainResult};

/// `b / (b + 1)`. Defined for `b >= 0`; an infinite factor maps to 1.
pub fn bayes_factor_to_probability(b: f64) -> ExplainResult<f64> {
    if b.is_nan() || b < 0.0 {
        return Err(ExplainError::domain(
            "bayes_factor_to_probability",
            b,
            "Bayes factor must be a non-negative number",
        ));
    }
    if b.is_infinite() {
        return Ok(1.0);
    }
    Ok(b / (b + 1.0))
}

/// `p / (1 - p)`. Fails at `p = 1` (infinite odds) and outside `[0, 1]`.
pub fn probability_to_bayes_factor(p: f64) -> ExplainResult<f64> {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return Err(ExplainError::domain(
            "probability_to_bayes_factor",
            p,
            "probability must lie in [0, 1]",
        ));
    }
    if p == 1.0 {
        return Err(ExplainError::domain(
            "probability_to_bayes_factor",
            p,
            "probability of 1 has infinite odds",
        ));
    }
    Ok(p / (1.0 - p))
}

/// `log2(p / (1 - p))`. Additionally fails at `p = 0`, where the log is undefined.
pub fn probability_to_log2_bayes_factor(p: f64) -> ExplainResult<f64> {
    let b = probability_to_bayes_factor(p)?;
    if b == 0.0 {
        return Err(ExplainError::domain(
            "probability_to_log2_bayes_factor",
            p,
            "probability of 0 has a match weight of -infinity",
        ));
    }
    Ok(b.log2())
}

pub fn log2_bayes_factor_to_probability(w: f64) -> ExplainResult<f64> {
    if w.is_nan() {
        return Err(ExplainError::domain(
            "log2_bayes_factor_to_probability",
            w,
            "match weight is not a number",
        ));
    }
    bayes_factor_to_probability(w.exp2())
}

/// `log2(b)` for a strictly positive, finite factor.
pub fn checked_log2(b: f64) -> ExplainResult<f64> {
    if !b.is_finite() || b <= 0.0 {
        return Err(ExplainError::domain(
            "log2",
            b,
            "Bayes factor must be a positive finite number",
        ));
    }
    Ok(b.log2())
}
