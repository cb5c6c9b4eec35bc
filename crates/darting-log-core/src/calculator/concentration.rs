//! Concentration parsing for free-text drug concentration fields.

use std::sync::LazyLock;

use regex::Regex;

/// Concentration used when the text holds no number at all.
pub const FALLBACK_CONCENTRATION: f64 = 1.0;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]*\.?[0-9]+").expect("valid digit run pattern"));

/// Extract a concentration in mg/mL from free text such as `"100mg/ml"`.
///
/// The whole string is tried as a number first, then the first run of digits
/// with at most one decimal point. Text without any digit yields
/// [`FALLBACK_CONCENTRATION`] rather than an error.
pub fn parse_concentration(text: &str) -> f64 {
    let trimmed = text.trim();

    if let Some(value) = trimmed.parse::<f64>().ok().filter(|v| v.is_finite()) {
        return value;
    }

    if let Some(value) = DIGIT_RUN
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
    {
        return value;
    }

    tracing::warn!(
        concentration = text,
        fallback = FALLBACK_CONCENTRATION,
        "No number in concentration, using fallback"
    );
    FALLBACK_CONCENTRATION
}
