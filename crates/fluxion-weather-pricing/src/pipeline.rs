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

//! End-to-end run: load -> average -> deviate -> price -> write -> summarize.

use crate::averager::quantity_moving_average;
use crate::config::PricingConfig;
use crate::deviation::deviations;
use crate::error::Result;
use crate::loader::WeatherLoader;
use crate::pricing::PriceModel;
use crate::stats::{PriceSummary, summary_table};
use crate::types::{DerivedRecord, Quantity, WeatherRecord};
use crate::writer::write_prices;
use comfy_table::Table;
use std::path::PathBuf;
use tracing::info;

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub rows: usize,
    pub output_file: PathBuf,
    pub radiation: PriceSummary,
    pub wind: PriceSummary,
    pub combined: PriceSummary,
}

impl RunReport {
    pub fn summary_table(&self) -> Table {
        summary_table(&[
            ("Price Radiation", self.radiation),
            ("Price Wind", self.wind),
            ("Price Combined", self.combined),
        ])
    }
}

/// Derive averages, deviations and prices for every record, in order.
pub fn derive_prices(
    records: &[WeatherRecord],
    window: usize,
    model: &PriceModel,
) -> Vec<DerivedRecord> {
    let irradiance: Vec<f64> = records.iter().map(|r| r.irradiance).collect();
    let wind: Vec<f64> = records.iter().map(|r| r.wind_speed).collect();

    let ma_irradiance = quantity_moving_average(records, Quantity::Irradiance, window);
    let ma_wind = quantity_moving_average(records, Quantity::WindSpeed, window);

    let dev_irradiance = deviations(&irradiance, &ma_irradiance);
    let dev_wind = deviations(&wind, &ma_wind);

    records
        .iter()
        .enumerate()
        .map(|(i, weather)| {
            let prices = model.prices(dev_irradiance[i], dev_wind[i]);
            DerivedRecord {
                weather: *weather,
                ma_irradiance: ma_irradiance[i],
                ma_wind: ma_wind[i],
                dev_irradiance: dev_irradiance[i],
                dev_wind: dev_wind[i],
                price_irradiance: prices.irradiance,
                price_wind: prices.wind,
                price_combined: prices.combined,
            }
        })
        .collect()
}

/// Run the whole pipeline for a validated configuration.
pub fn run(config: &PricingConfig) -> Result<RunReport> {
    config.validate()?;

    let records = WeatherLoader::from_config(config).load(&config.input_file)?;

    let window = config.window_hours();
    info!(
        "Computing wrapped {}-day ({window}h) moving averages over {} hours",
        config.number_of_samples_days,
        records.len()
    );
    let derived = derive_prices(&records, window, &config.price_model());

    let rows = write_prices(&config.output_file, &derived, config.delimiter_byte())?;

    let column = |pick: fn(&DerivedRecord) -> f64| -> PriceSummary {
        let values: Vec<f64> = derived.iter().map(pick).collect();
        PriceSummary::from_values(&values)
    };

    Ok(RunReport {
        rows,
        output_file: config.output_file.clone(),
        radiation: column(|r| r.price_irradiance),
        wind: column(|r| r.price_wind),
        combined: column(|r| r.price_combined),
    })
}
