use serde::{Deserialize, Serialize};

use crate::models::{Histogram, PriceSeries, Rejection, Summary, TrendLine};

/// One row of the sold-data log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoldLogRow {
    /// `YYYY-MM-DD` in UTC.
    pub date: String,
    pub price: f64,
}

/// Everything the presentation layer needs for one card query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceReport {
    /// Dominant currency, `None` when no record survived normalization.
    pub currency: Option<String>,
    /// Cleaned points, oldest first.
    pub series: PriceSeries,
    pub summary: Option<Summary>,
    pub trend: Option<TrendLine>,
    pub histogram: Histogram,
    /// Newest first.
    pub sold_log: Vec<SoldLogRow>,
    /// Records that failed normalization.
    pub rejected: Vec<Rejection>,
    /// Points left out by the comps limit.
    pub beyond_limit: usize,
    /// Points quoted in a non-dominant currency.
    pub excluded: usize,
    /// Points removed as outliers.
    pub trimmed: usize,
}

impl PriceReport {
    pub fn dropped(&self) -> usize {
        self.rejected.len()
    }

    /// `true` when there is nothing to chart.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
