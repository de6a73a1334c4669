//! Per-side summary statistics.
//!
//! Summaries characterize each series independently of the other
//! side's availability, so they run over the full unjoined sequence,
//! not the aligned overlap.

use comparison_core::{FieldMap, SeriesSummary};
use serde_json::Value;
use statrs::statistics::Statistics;

/// Conventional trading-day count used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Extract one side's finite numeric sequence, in percent units.
///
/// Applies the same x100 scaling as the aligner so metric cards, table,
/// and chart all share units. Invalid points are skipped, matching the
/// join's filtering policy.
pub fn numeric_series(points: &[Value], fields: &FieldMap) -> Vec<f64> {
    points
        .iter()
        .filter_map(|p| fields.value_of(p))
        .filter(|v| v.is_finite())
        .map(|v| v * 100.0)
        .collect()
}

/// Mean and annualized volatility over one return sequence.
///
/// Volatility is the population standard deviation (sum of squared
/// deviations over n, not n-1) scaled by sqrt of the annualization
/// factor. `None` for an empty sequence — "metrics unavailable" is a
/// distinct state, not a computed zero, and no NaN ever escapes.
pub fn summarize(values: &[f64], annualization_factor: f64) -> Option<SeriesSummary> {
    if values.is_empty() {
        return None;
    }

    let mean = values.mean();
    let volatility = values.population_std_dev() * annualization_factor.sqrt();

    Some(SeriesSummary {
        mean_return: mean,
        annualized_volatility: volatility,
        observation_count: values.len(),
    })
}
