//! Dose-to-volume calculation engine.
//!
//! Pipeline: Concentration Parser → Dose Calculator → (History | Case log)
//!
//! Input validation never produces an `Err`. Bad input turns into inline
//! message lines and the remaining rows still compute.

mod concentration;
mod dose;
mod standalone;

pub use concentration::*;
pub use dose::*;
pub use standalone::*;

use std::sync::LazyLock;

use regex::Regex;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").expect("valid number pattern")
});

/// Parse the leading decimal number of a user-typed string.
///
/// Leading whitespace is skipped and trailing text ignored, so `"50kg"` is
/// `50.0`. Returns `None` when there is no leading number.
pub fn parse_number(text: &str) -> Option<f64> {
    let m = LEADING_NUMBER.find(text.trim_start())?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a volume for display with exactly two decimals.
pub fn format_volume(volume: f64) -> String {
    format!("{:.2}", volume)
}
