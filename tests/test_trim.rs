//! Outlier trimmer tests.

mod common;

use card_price_sdk::pipeline::trim::cut_count;
use card_price_sdk::pipeline::trim_outliers;
use card_price_sdk::{PriceError, PriceSeries};
use proptest::prelude::*;

#[test]
fn ten_percent_of_twenty_removes_two_from_each_end() {
    let prices: Vec<f64> = (1..=20).map(|p| p as f64).collect();
    let trimmed = trim_outliers(&common::daily_series(&prices), 10.0).unwrap();

    assert_eq!(trimmed.len(), 16);
    assert_eq!(trimmed.prices().first(), Some(&3.0));
    assert_eq!(trimmed.prices().last(), Some(&18.0));
}

#[test]
fn zero_percent_returns_series_sorted_by_price() {
    let series = common::daily_series(&[30.0, 10.0, 20.0]);
    let trimmed = trim_outliers(&series, 0.0).unwrap();
    assert_eq!(trimmed.prices(), vec![10.0, 20.0, 30.0]);
}

#[test]
fn zero_percent_is_idempotent() {
    let series = common::daily_series(&[5.0, 1.0, 4.0, 1.0, 3.0]);
    let once = trim_outliers(&series, 0.0).unwrap();
    let twice = trim_outliers(&once, 0.0).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn small_series_with_zero_cut_is_unchanged_in_size() {
    let series = common::daily_series(&[1.0, 2.0, 3.0]);
    // floor(3 * 0.25) == 0
    assert_eq!(trim_outliers(&series, 25.0).unwrap().len(), 3);
}

#[test]
fn near_half_keeps_the_middle() {
    let prices: Vec<f64> = (1..=5).map(|p| p as f64).collect();
    let trimmed = trim_outliers(&common::daily_series(&prices), 49.9).unwrap();
    assert_eq!(trimmed.prices(), vec![3.0]);
}

#[test]
fn empty_series_stays_empty() {
    let trimmed = trim_outliers(&PriceSeries::default(), 10.0).unwrap();
    assert!(trimmed.is_empty());
}

#[test]
fn trimming_ignores_time_order() {
    let series = common::daily_series(&[100.0, 1.0, 50.0, 51.0, 49.0]);
    let trimmed = trim_outliers(&series, 20.0).unwrap();
    assert_eq!(trimmed.prices(), vec![49.0, 50.0, 51.0]);
    assert_eq!(trimmed.sorted_by_time().prices(), vec![50.0, 51.0, 49.0]);
}

#[test]
fn out_of_range_percent_is_rejected() {
    let series = common::daily_series(&[1.0, 2.0]);
    for bad in [-1.0, 50.0, 75.0, f64::NAN, f64::INFINITY] {
        let err = trim_outliers(&series, bad).unwrap_err();
        assert!(matches!(err, PriceError::InvalidArgument(_)), "{}", bad);
    }
}

#[test]
fn cut_count_floors() {
    assert_eq!(cut_count(20, 10.0), 2);
    assert_eq!(cut_count(19, 10.0), 1);
    assert_eq!(cut_count(0, 40.0), 0);
}

proptest! {
    #[test]
    fn trimmed_length_and_order(
        prices in prop::collection::vec(0.01f64..10_000.0, 0..60),
        percent in 0.0f64..49.99,
    ) {
        let series = common::daily_series(&prices);
        let trimmed = trim_outliers(&series, percent).unwrap();
        let cut = cut_count(prices.len(), percent);

        prop_assert_eq!(trimmed.len(), prices.len().saturating_sub(2 * cut));
        let out = trimmed.prices();
        prop_assert!(out.windows(2).all(|w| w[0] <= w[1]));
    }
}
