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

//! FluxION Weather Pricing
//!
//! Derives dynamic electricity price signals from an hourly weather series.
//!
//! ## Pipeline
//!
//! - **Loader**: fixed-position columns from a provider CSV export
//! - **Wrapped Averager**: trailing `days * 24` hour mean, cyclic at the start
//! - **Deviation**: `(x - ma) / ma`, IEEE semantics at `ma == 0`
//! - **Price Mapper**: linear in the deviations, clipped to `[min, max]`
//! - **Writer**: time columns plus radiation, wind and combined prices

pub mod averager;
pub mod config;
pub mod deviation;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod pricing;
pub mod stats;
pub mod types;
pub mod writer;

pub use averager::wrapped_moving_average;
pub use config::{ConfigFormat, PricingConfig};
pub use error::{PricingError, Result};
pub use loader::{ColumnLayout, WeatherLoader};
pub use pipeline::{RunReport, derive_prices, run};
pub use pricing::{HourlyPrices, PriceModel, clip};
pub use stats::PriceSummary;
pub use types::{DerivedRecord, Quantity, WeatherRecord};
