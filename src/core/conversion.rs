//! Conversion arithmetic, input validation and chart windowing.

use super::indicator::{SeriesPoint, is_supported};

/// Number of most recent points drawn in the history chart.
pub const HISTORY_POINTS: usize = 10;

/// A validated conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub code: String,
}

impl ConversionRequest {
    /// Validates raw user input. The amount must be a finite number above
    /// zero and the code one of the supported indicators.
    pub fn parse(amount: &str, code: &str) -> Option<Self> {
        let amount = amount.trim().parse::<f64>().ok()?;
        if !amount.is_finite() || amount <= 0.0 {
            return None;
        }
        let code = code.trim();
        if code.is_empty() || !is_supported(code) {
            return None;
        }
        Some(Self {
            amount,
            code: code.to_string(),
        })
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub code: String,
    /// Latest CLP value of one unit of the target currency.
    pub rate: f64,
    pub converted: f64,
    pub status: String,
    /// Points handed to the chart, oldest first.
    pub history: Vec<SeriesPoint>,
}

pub fn convert_amount(amount: f64, rate: f64) -> f64 {
    amount / rate
}

/// Status line for a finished conversion. Cents are rounded half away from
/// zero, so exact ties such as 0.125 show as 0.13.
pub fn format_status(amount: f64, converted: f64, code: &str) -> String {
    let rounded = (converted * 100.0).round() / 100.0;
    format!(
        "${amount} CLP ≈ {rounded:.2} {}",
        code.to_uppercase()
    )
}

/// Takes the newest `HISTORY_POINTS` points from a newest-first series and
/// returns them oldest first.
pub fn chart_window(series: &[SeriesPoint]) -> Vec<SeriesPoint> {
    series.iter().take(HISTORY_POINTS).rev().copied().collect()
}
