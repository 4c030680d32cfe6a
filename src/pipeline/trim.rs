//! Symmetric outlier trimming.

use crate::error::{PriceError, Result};
use crate::models::PriceSeries;

/// Drop `floor(n * percent / 100)` points from each end of the price-sorted
/// series and return the middle.
///
/// The result is ordered by price (ties keep their input order), not by time.
/// When the cut would consume the whole series the result is empty.
///
/// # Errors
///
/// [`PriceError::InvalidArgument`] unless `0 <= percent < 50`.
pub fn trim_outliers(series: &PriceSeries, percent: f64) -> Result<PriceSeries> {
    if !percent.is_finite() || !(0.0..50.0).contains(&percent) {
        return Err(PriceError::InvalidArgument(format!(
            "trim percent must be in [0, 50), got {}",
            percent
        )));
    }

    let mut points = series.points().to_vec();
    points.sort_by(|a, b| a.price.total_cmp(&b.price));

    let n = points.len();
    let cut = cut_count(n, percent);
    if cut == 0 {
        return Ok(PriceSeries::new(points));
    }
    if 2 * cut >= n {
        log::debug!("trim of {}% removes all {} points", percent, n);
        return Ok(PriceSeries::default());
    }

    Ok(points.into_iter().skip(cut).take(n - 2 * cut).collect())
}

/// Points removed from each end for a series of `n` points.
pub fn cut_count(n: usize, percent: f64) -> usize {
    (n as f64 * percent / 100.0).floor() as usize
}
