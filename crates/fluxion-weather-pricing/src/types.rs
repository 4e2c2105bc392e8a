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

use serde::{Deserialize, Serialize};

/// One hourly weather observation.
///
/// A series is expected to be contiguous and ascending, one row per hour.
/// The moving-average window is counted in rows, so gaps shift it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    /// Global horizontal radiation (Wh/m²)
    pub irradiance: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
}

/// Which measured quantity a stage operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Irradiance,
    WindSpeed,
}

impl Quantity {
    pub fn of(self, record: &WeatherRecord) -> f64 {
        match self {
            Self::Irradiance => record.irradiance,
            Self::WindSpeed => record.wind_speed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Irradiance => "irradiance",
            Self::WindSpeed => "wind speed",
        }
    }
}

/// Weather record enriched with every intermediate value of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedRecord {
    pub weather: WeatherRecord,
    pub ma_irradiance: f64,
    pub ma_wind: f64,
    /// Fractional deviation; ±inf or NaN when the moving average is zero
    pub dev_irradiance: f64,
    pub dev_wind: f64,
    pub price_irradiance: f64,
    pub price_wind: f64,
    pub price_combined: f64,
}
