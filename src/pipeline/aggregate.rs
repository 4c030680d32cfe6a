//! Summary statistics over the dominant currency.

use crate::models::{PriceSeries, Summary};

/// Count, min, max, mean and median over the points quoted in the series'
/// dominant currency.
///
/// Points in any other currency are ignored. Returns `None` for an empty
/// series.
pub fn summarize(series: &PriceSeries) -> Option<Summary> {
    let currency = series.dominant_currency()?;
    let mut prices = series.in_currency(&currency).prices();
    prices.sort_by(f64::total_cmp);

    let count = prices.len();
    let min = *prices.first()?;
    let max = *prices.last()?;
    let mean = prices.iter().sum::<f64>() / count as f64;

    Some(Summary {
        currency,
        count,
        min,
        max,
        mean,
        median: median_sorted(&prices)?,
    })
}

/// Median of an ascending slice; the mean of the two middle values when the
/// length is even.
pub fn median_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    if n % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}
