//! Linear trend over time.

use crate::models::{PriceSeries, TrendLine};

/// Ordinary least-squares line through (time, price).
///
/// Times are epoch seconds centered on their mean before fitting, so the
/// intercept is the mean price and large epoch values do not cost precision.
///
/// Returns `None` with fewer than two points, or when every point shares the
/// same timestamp.
pub fn fit_trend(series: &PriceSeries) -> Option<TrendLine> {
    let n = series.len();
    if n < 2 {
        return None;
    }

    let times: Vec<f64> = series.iter().map(|p| p.epoch_seconds()).collect();
    let center = times.iter().sum::<f64>() / n as f64;
    let intercept = series.iter().map(|p| p.price).sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (t, point) in times.iter().zip(series.iter()) {
        let x = t - center;
        sxy += x * point.price;
        sxx += x * x;
    }

    if sxx == 0.0 {
        return None;
    }

    Some(TrendLine {
        slope: sxy / sxx,
        intercept,
        center,
    })
}
