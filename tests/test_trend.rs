//! Trend estimator tests.

mod common;

use card_price_sdk::pipeline::fit_trend;
use card_price_sdk::{PricePoint, PriceSeries};
use chrono::Duration;

#[test]
fn perfectly_linear_data_recovers_slope_and_mean() {
    let trend = fit_trend(&common::daily_series(&[10.0, 20.0, 30.0])).unwrap();

    assert!(common::approx_eq(trend.slope, 10.0 / common::DAY as f64, 1e-12));
    assert!(common::approx_eq(trend.slope_per_day(), 10.0, 1e-9));
    assert!(common::approx_eq(trend.intercept, 20.0, 1e-12));
}

#[test]
fn center_is_mean_epoch_seconds() {
    let trend = fit_trend(&common::daily_series(&[10.0, 20.0, 30.0])).unwrap();
    let middle = (common::base_time() + Duration::days(1)).timestamp() as f64;
    assert_eq!(trend.center, middle);
}

#[test]
fn single_point_has_no_trend() {
    assert!(fit_trend(&common::daily_series(&[42.0])).is_none());
}

#[test]
fn empty_series_has_no_trend() {
    assert!(fit_trend(&PriceSeries::default()).is_none());
}

#[test]
fn identical_timestamps_have_no_trend() {
    let series: PriceSeries = vec![common::point(0, 1.0, "GBP"), common::point(0, 3.0, "GBP")].into();
    assert!(fit_trend(&series).is_none());
}

#[test]
fn flat_prices_give_zero_slope() {
    let trend = fit_trend(&common::daily_series(&[7.0, 7.0, 7.0, 7.0])).unwrap();
    assert_eq!(trend.slope, 0.0);
    assert_eq!(trend.intercept, 7.0);
}

#[test]
fn fitted_values_lie_on_the_line() {
    let series = common::daily_series(&[10.0, 20.0, 30.0]);
    let trend = fit_trend(&series).unwrap();
    let fitted = trend.fitted(&series);

    for (got, want) in fitted.iter().zip([10.0, 20.0, 30.0]) {
        assert!(common::approx_eq(*got, want, 1e-9), "{} vs {}", got, want);
    }
}

#[test]
fn matches_textbook_regression_on_noisy_data() {
    let offsets_hours = [0i64, 5, 30, 49, 70, 71, 120];
    let prices = [12.0, 11.5, 13.2, 12.8, 14.1, 13.9, 15.0];
    let series: PriceSeries = offsets_hours
        .iter()
        .zip(prices)
        .map(|(&h, p)| PricePoint::new(common::base_time() + Duration::hours(h), p, "GBP"))
        .collect();

    // Uncentered normal equations over small x values (hours since base)
    let n = prices.len() as f64;
    let xs: Vec<f64> = offsets_hours.iter().map(|&h| h as f64 * 3600.0).collect();
    let sx: f64 = xs.iter().sum();
    let sy: f64 = prices.iter().sum();
    let sxy: f64 = xs.iter().zip(prices).map(|(x, y)| x * y).sum();
    let sxx: f64 = xs.iter().map(|x| x * x).sum();
    let expected_slope = (n * sxy - sx * sy) / (n * sxx - sx * sx);

    let trend = fit_trend(&series).unwrap();
    assert!(common::approx_eq(trend.slope, expected_slope, 1e-9));
    assert!(common::approx_eq(trend.intercept, sy / n, 1e-12));
}

#[test]
fn input_order_does_not_change_the_fit() {
    let ordered = common::daily_series(&[3.0, 9.0, 4.0, 12.0]);
    let mut points = ordered.points().to_vec();
    points.reverse();
    let reversed = PriceSeries::new(points);

    let a = fit_trend(&ordered).unwrap();
    let b = fit_trend(&reversed).unwrap();
    assert!(common::approx_eq(a.slope, b.slope, 1e-12));
    assert!(common::approx_eq(a.intercept, b.intercept, 1e-12));
}

#[test]
fn value_at_uses_the_fitted_time_base() {
    let series = common::daily_series(&[10.0, 20.0, 30.0]);
    let trend = fit_trend(&series).unwrap();

    let noon = series.points()[1].timestamp + Duration::milliseconds(500);
    let expected = trend.intercept + trend.slope * 0.5;
    assert!(common::approx_eq(trend.value_at(noon), expected, 1e-12));
    assert!(common::approx_eq(trend.value_at(series.points()[1].timestamp), 20.0, 1e-12));
}
