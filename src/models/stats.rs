use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SECONDS_PER_DAY;
use crate::models::record::epoch_seconds;
use crate::models::PriceSeries;

// ---------------------------------------------------------------------------
// Summary: Sold-price statistics for one currency
// ---------------------------------------------------------------------------

/// Summary statistics over the dominant-currency points of a series.
///
/// Values are kept at full precision; [`Display`](fmt::Display) rounds to
/// two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub currency: String,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} count={} min={:.2} max={:.2} mean={:.2} median={:.2}",
            self.currency, self.count, self.min, self.max, self.mean, self.median
        )
    }
}

// ---------------------------------------------------------------------------
// TrendLine: Least-squares fit over mean-centered time
// ---------------------------------------------------------------------------

/// `price ≈ slope * (t - center) + intercept`, with `t` in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    /// Price change per second.
    pub slope: f64,
    /// Mean price, i.e. the fitted value at `center`.
    pub intercept: f64,
    /// Mean epoch seconds of the fitted points.
    pub center: f64,
}

impl TrendLine {
    pub fn slope_per_day(&self) -> f64 {
        self.slope * SECONDS_PER_DAY
    }

    /// Fitted price at `timestamp`.
    pub fn value_at(&self, timestamp: DateTime<Utc>) -> f64 {
        self.slope * (epoch_seconds(timestamp) - self.center) + self.intercept
    }

    /// Fitted price for every point of `series`, in series order.
    pub fn fitted(&self, series: &PriceSeries) -> Vec<f64> {
        series.iter().map(|p| self.value_at(p.timestamp)).collect()
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// One equal-width bucket. `lower` is inclusive; `upper` is exclusive except
/// on the last bin of a histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<Bin>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Sum of all bin counts.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn non_empty(&self) -> impl Iterator<Item = &Bin> {
        self.bins.iter().filter(|b| b.count > 0)
    }
}
