//! Money parsing and the storefront's tax arithmetic.
//!
//! Labels such as `"Item total: $12.99"` are parsed by extracting the first
//! dollar amount; bare numbers elsewhere in the label are ignored. Text without an amount is a [`ProbeError::Parse`], never a
//! silent zero.

use crate::fixtures::TAX_RATE;
use crate::result::{ProbeError, ProbeResult};
use regex::Regex;
use std::sync::OnceLock;

/// Two amounts closer than this are the same number of cents
pub const CENT_TOLERANCE: f64 = 0.01;

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\s*(\d+(?:\.\d+)?)").expect("static amount pattern"))
}

/// Parse a displayed price such as `"$29.99"`
pub fn parse_price(text: &str) -> ProbeResult<f64> {
    let trimmed = text.trim();
    trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .trim()
        .parse::<f64>()
        .map_err(|_| ProbeError::parse("price", text))
}

/// Extract the first `$` amount from a label such as `"Tax: $2.40"`
pub fn extract_amount(label: &str) -> ProbeResult<f64> {
    amount_pattern()
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .ok_or_else(|| ProbeError::parse("amount", label))
}

/// Round to whole cents
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Tax the storefront charges on a subtotal, rounded to cents
#[must_use]
pub fn calculate_tax(subtotal: f64) -> f64 {
    round_cents(subtotal * TAX_RATE)
}

/// Subtotal plus tax
#[must_use]
pub fn calculate_total(subtotal: f64) -> f64 {
    round_cents(subtotal + calculate_tax(subtotal))
}

/// Sum of prices, rounded to cents
#[must_use]
pub fn sum_prices(prices: &[f64]) -> f64 {
    round_cents(prices.iter().sum())
}

/// Compare two amounts to the cent
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < CENT_TOLERANCE
}

/// Render an amount the way the storefront does (`$7.99`)
#[must_use]
pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}
