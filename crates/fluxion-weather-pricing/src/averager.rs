// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Wrapped (circular) trailing moving average.
//!
//! The series is treated as one period of a repeating pattern, so the
//! average at hour `i` is the mean of the `window` values ending at `i`,
//! with positions before the start taken from the tail:
//!
//! ```text
//! ma[i] = mean(x[(i - k) mod N] for k in 0..window)
//! ```
//!
//! Every hour gets a full window, there is no warm-up period. A window
//! longer than the series simply cycles it more than once.

use crate::types::{Quantity, WeatherRecord};
use tracing::debug;

/// Wrapped trailing mean of `values` over `window` samples.
///
/// Returns one average per input value. An empty series gives an empty
/// result; a zero window gives NaN everywhere.
pub fn wrapped_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    if window == 0 {
        return vec![f64::NAN; n];
    }

    let full_cycles = window / n;
    let remainder = window % n;
    if full_cycles > 0 {
        debug!(
            "Window of {window} samples exceeds series length {n}, cycling {full_cycles} full time(s) plus {remainder}"
        );
    }

    // Window ending at index 0 is `full_cycles` whole copies of the series
    // followed by the `remainder` values ending at index 0.
    let mut total = RollingSum::default();
    values.iter().for_each(|&v| total.add(v));

    let mut sum = RollingSum::default();
    sum.add(full_cycles as f64 * total.value());
    sum.nonzero = full_cycles * total.nonzero;
    if remainder > 0 {
        sum.add(values[0]);
        values[n - remainder + 1..].iter().for_each(|&v| sum.add(v));
    }

    let divisor = window as f64;
    let mut averages = Vec::with_capacity(n);
    averages.push(sum.value() / divisor);

    for i in 1..n {
        // Index leaving the window: (i - window) mod n
        let leaving = (i + n - remainder) % n;
        sum.add(values[i]);
        sum.remove(values[leaving]);
        averages.push(sum.value() / divisor);
    }

    averages
}

/// Neumaier-compensated running sum that tracks how many non-zero values
/// it holds. An all-zero window is exactly 0.0, never rounding residue.
#[derive(Debug, Default)]
struct RollingSum {
    sum: f64,
    compensation: f64,
    nonzero: usize,
}

impl RollingSum {
    fn add(&mut self, value: f64) {
        if value != 0.0 {
            self.nonzero += 1;
        }
        self.accumulate(value);
    }

    fn remove(&mut self, value: f64) {
        if value != 0.0 {
            self.nonzero = self.nonzero.saturating_sub(1);
        }
        self.accumulate(-value);
        if self.nonzero == 0 {
            self.sum = 0.0;
            self.compensation = 0.0;
        }
    }

    fn accumulate(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    fn value(&self) -> f64 {
        if self.nonzero == 0 {
            0.0
        } else {
            self.sum + self.compensation
        }
    }
}

/// Wrapped moving average of one quantity across a weather series.
pub fn quantity_moving_average(
    records: &[WeatherRecord],
    quantity: Quantity,
    window: usize,
) -> Vec<f64> {
    let values: Vec<f64> = records.iter().map(|r| quantity.of(r)).collect();
    let averages = wrapped_moving_average(&values, window);
    debug!(
        "Computed {} {} averages over {window}h",
        averages.len(),
        quantity.label()
    );
    averages
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Direct evaluation of the circular definition.
    fn naive_circular(values: &[f64], window: usize) -> Vec<f64> {
        let n = values.len() as isize;
        (0..n)
            .map(|i| {
                let sum: f64 = (0..window as isize)
                    .map(|k| values[(i - k).rem_euclid(n) as usize])
                    .sum();
                sum / window as f64
            })
            .collect()
    }

    /// Direct evaluation of the padded-rolling-mean formulation: prepend the
    /// last `window` values, roll, keep the last `n` results.
    fn padded_rolling(values: &[f64], window: usize) -> Vec<f64> {
        let n = values.len();
        let mut extended: Vec<f64> = values[n - window..].to_vec();
        extended.extend_from_slice(values);
        (window..extended.len())
            .map(|end| extended[end + 1 - window..=end].iter().sum::<f64>() / window as f64)
            .collect()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                (a - e).abs() <= 1e-9 * e.abs().max(1.0),
                "index {i}: got {a}, expected {e}"
            );
        }
    }

    fn sample_series(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| ((i * 37) % 101) as f64 + 0.25 * (i % 7) as f64)
            .collect()
    }

    #[test]
    fn test_matches_padded_rolling_mean() {
        let values = sample_series(72);
        assert_close(&wrapped_moving_average(&values, 24), &padded_rolling(&values, 24));
    }

    #[test]
    fn test_wrap_invariant_within_first_window() {
        let values = sample_series(100);
        let window = 24;
        let averages = wrapped_moving_average(&values, window);

        for i in 0..window {
            let wrapped: Vec<f64> = values[100 + i + 1 - window..]
                .iter()
                .chain(&values[..=i])
                .copied()
                .collect();
            assert_eq!(wrapped.len(), window);
            let expected = wrapped.iter().sum::<f64>() / window as f64;
            assert!((averages[i] - expected).abs() < 1e-9, "index {i}");
        }
    }

    #[test]
    fn test_window_equal_to_length_is_global_mean() {
        let values = sample_series(48);
        let mean = values.iter().sum::<f64>() / 48.0;
        for avg in wrapped_moving_average(&values, 48) {
            assert!((avg - mean).abs() < 1e-9);
        }
    }

    #[test]
    fn test_window_longer_than_series_cycles() {
        // N = 10, window = 24: two full cycles plus the 4 values ending at i
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let averages = wrapped_moving_average(&values, 24);

        assert_close(&averages, &naive_circular(&values, 24));
        // i = 0: 2 * 55 + (1 + 10 + 9 + 8) = 138
        assert!((averages[0] - 138.0 / 24.0).abs() < 1e-12);
        // i = 9: 2 * 55 + (10 + 9 + 8 + 7) = 144
        assert!((averages[9] - 144.0 / 24.0).abs() < 1e-12);
    }

    #[test]
    fn test_window_multiple_of_length_is_constant() {
        let values: Vec<f64> = (1..=6).map(f64::from).collect();
        for avg in wrapped_moving_average(&values, 24) {
            assert!((avg - 3.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_constant_series_keeps_its_value() {
        let values = vec![500.0; 48];
        assert!(wrapped_moving_average(&values, 24).iter().all(|&v| v == 500.0));
    }

    #[test]
    fn test_single_sample_window() {
        let values = sample_series(30);
        assert_eq!(wrapped_moving_average(&values, 1), values);
    }

    #[test]
    fn test_zero_run_after_readings_averages_to_exact_zero() {
        // Readings whose sums are inexact in binary, then a calm spell
        // longer than the window
        let mut values = vec![0.1, 0.2, 0.3];
        values.extend(std::iter::repeat_n(0.0, 45));
        let averages = wrapped_moving_average(&values, 24);

        for (i, avg) in averages.iter().enumerate().skip(26) {
            assert_eq!(*avg, 0.0, "index {i} should be exactly zero");
        }
        for (i, avg) in averages.iter().enumerate().take(26) {
            assert!(*avg > 0.0, "index {i} still covers a reading");
        }
        assert_close(&averages, &naive_circular(&values, 24));
    }

    #[test]
    fn test_zero_spell_inside_long_series() {
        // A year of wind with a 30-hour calm spell
        let mut values: Vec<f64> = (0..8760).map(|i| 0.3 + f64::from(i % 17) * 0.7).collect();
        values[5000..5030].iter_mut().for_each(|v| *v = 0.0);
        let averages = wrapped_moving_average(&values, 24);

        for (i, avg) in averages.iter().enumerate().take(5030).skip(5023) {
            assert_eq!(*avg, 0.0, "index {i}");
        }
        assert!(averages[5022] > 0.0);
        assert!(averages[5030] > 0.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(wrapped_moving_average(&[], 24).is_empty());
        assert!(wrapped_moving_average(&[1.0, 2.0], 0).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_quantity_selection() {
        let records: Vec<WeatherRecord> = (0..48)
            .map(|h| WeatherRecord {
                year: 2021,
                month: 1,
                day: 1 + h / 24,
                hour: h % 24,
                irradiance: 100.0,
                wind_speed: f64::from(h % 2),
            })
            .collect();

        let irradiance = quantity_moving_average(&records, Quantity::Irradiance, 24);
        let wind = quantity_moving_average(&records, Quantity::WindSpeed, 24);

        assert!(irradiance.iter().all(|&v| v == 100.0));
        assert!(wind.iter().all(|&v| (v - 0.5).abs() < 1e-12));
    }
}
