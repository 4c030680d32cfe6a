//! Equal-width price histogram.

use crate::config::MAX_BINS;
use crate::error::{PriceError, Result};
use crate::models::{Bin, Histogram};

/// Bucket `prices` into `bins` equal-width bins spanning `[min, max]`.
///
/// Each bin includes its lower edge and excludes its upper edge, except the
/// last bin which includes both. If every price is the same a single bin
/// holds them all. Empty input gives an empty histogram.
///
/// # Errors
///
/// [`PriceError::InvalidArgument`] if `bins` is zero or above
/// [`MAX_BINS`].
pub fn histogram(prices: &[f64], bins: usize) -> Result<Histogram> {
    check_bins(bins)?;

    let values: Vec<f64> = prices.iter().copied().filter(|p| p.is_finite()).collect();
    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return Ok(Histogram::default());
    };

    if min == max {
        return Ok(Histogram {
            bins: vec![Bin {
                lower: min,
                upper: max,
                count: values.len(),
            }],
        });
    }

    let width = (max - min) / bins as f64;
    let edge = |i: usize| if i == bins { max } else { min + width * i as f64 };
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            lower: edge(i),
            upper: edge(i + 1),
            count: 0,
        })
        .collect();

    for value in values {
        let mut idx = (((value - min) / width).floor() as usize).min(bins - 1);
        // Division rounding can land a value one bin off its reported edges
        if idx > 0 && value < out[idx].lower {
            idx -= 1;
        } else if idx < bins - 1 && value >= out[idx].upper {
            idx += 1;
        }
        out[idx].count += 1;
    }

    Ok(Histogram { bins: out })
}

/// Reject bin counts outside `1..=MAX_BINS`.
pub fn check_bins(bins: usize) -> Result<()> {
    if bins == 0 {
        return Err(PriceError::InvalidArgument(
            "histogram needs at least one bin".into(),
        ));
    }
    if bins > MAX_BINS {
        return Err(PriceError::InvalidArgument(format!(
            "histogram bin count {} exceeds the maximum of {}",
            bins, MAX_BINS
        )));
    }
    Ok(())
}
