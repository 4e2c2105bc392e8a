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

use tracing::warn;

/// Fractional deviation of a reading from its moving average.
///
/// A zero average follows IEEE-754 division: `±inf` for a non-zero reading,
/// NaN when the reading is zero as well. Callers rely on this.
pub fn fractional_deviation(value: f64, average: f64) -> f64 {
    (value - average) / average
}

/// Element-wise deviations of `values` from `averages`.
pub fn deviations(values: &[f64], averages: &[f64]) -> Vec<f64> {
    debug_assert_eq!(values.len(), averages.len());

    let zero_averages = averages.iter().filter(|&&a| a == 0.0).count();
    if zero_averages > 0 {
        warn!("{zero_averages} hours have a zero moving average, deviations there are inf/NaN");
    }

    values
        .iter()
        .zip(averages)
        .map(|(&value, &average)| fractional_deviation(value, average))
        .collect()
}
