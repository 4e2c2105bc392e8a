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

//! Deviation-to-price mapping.
//!
//! More sun or wind than usual pushes the price down, less pushes it up:
//!
//! ```text
//! price = clip(base - alpha * deviation, min, max)
//! ```

use serde::{Deserialize, Serialize};

/// Linear price model with a clipping band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceModel {
    pub base_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// Sensitivity of the radiation price to irradiance deviation
    pub solar_dependency: f64,
    /// Sensitivity of the wind price to wind deviation
    pub wind_dependency: f64,
    pub combined_solar_dependency: f64,
    pub combined_wind_dependency: f64,
}

/// The three price signals for one hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyPrices {
    pub irradiance: f64,
    pub wind: f64,
    pub combined: f64,
}

impl PriceModel {
    pub fn clip(&self, price: f64) -> f64 {
        clip(price, self.min_price, self.max_price)
    }

    pub fn irradiance_price(&self, dev_irradiance: f64) -> f64 {
        self.clip(self.base_price - self.solar_dependency * dev_irradiance)
    }

    pub fn wind_price(&self, dev_wind: f64) -> f64 {
        self.clip(self.base_price - self.wind_dependency * dev_wind)
    }

    pub fn combined_price(&self, dev_irradiance: f64, dev_wind: f64) -> f64 {
        self.clip(
            self.base_price
                - self.combined_solar_dependency * dev_irradiance
                - self.combined_wind_dependency * dev_wind,
        )
    }

    pub fn prices(&self, dev_irradiance: f64, dev_wind: f64) -> HourlyPrices {
        HourlyPrices {
            irradiance: self.irradiance_price(dev_irradiance),
            wind: self.wind_price(dev_wind),
            combined: self.combined_price(dev_irradiance, dev_wind),
        }
    }
}

/// Constrain `value` to `[lo, hi]`.
///
/// NaN compares false against both bounds and passes through unchanged.
pub fn clip(value: f64, lo: f64, hi: f64) -> f64 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}
