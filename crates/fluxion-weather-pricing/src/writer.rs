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

//! Price CSV export.

use crate::error::{PricingError, Result};
use crate::types::DerivedRecord;
use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const OUTPUT_HEADER: [&str; 7] = [
    "Year",
    "Month",
    "Day",
    "Hour",
    "Price Radiation",
    "Price Wind",
    "Price Combined",
];

/// Write time columns and the three prices, one row per record.
pub fn write_prices(path: &Path, records: &[DerivedRecord], delimiter: u8) -> Result<usize> {
    let file = std::fs::File::create(path).map_err(|e| PricingError::io(path, e))?;
    let rows =
        write_prices_to(file, records, delimiter).map_err(|e| PricingError::io(path, e))?;
    info!("Wrote {rows} price rows to {}", path.display());
    Ok(rows)
}

pub fn write_prices_to<W: Write>(
    sink: W,
    records: &[DerivedRecord],
    delimiter: u8,
) -> std::io::Result<usize> {
    let mut writer = WriterBuilder::new().delimiter(delimiter).from_writer(sink);

    writer.write_record(OUTPUT_HEADER)?;
    for record in records {
        let w = &record.weather;
        writer.write_record([
            w.year.to_string(),
            w.month.to_string(),
            w.day.to_string(),
            w.hour.to_string(),
            format_price(record.price_irradiance),
            format_price(record.price_wind),
            format_price(record.price_combined),
        ])?;
    }
    writer.flush()?;

    Ok(records.len())
}

/// Shortest round-trip form; NaN becomes an empty field.
fn format_price(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{value:?}")
    }
}
