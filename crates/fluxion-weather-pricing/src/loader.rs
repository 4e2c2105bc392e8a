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

//! Hourly weather loader for provider CSV exports (EPW-like layout).

use crate::config::PricingConfig;
use crate::error::{PricingError, Result};
use crate::types::WeatherRecord;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Zero-based input column positions of the fields we read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub year: usize,
    pub month: usize,
    pub day: usize,
    pub hour: usize,
    pub irradiance: usize,
    pub wind_speed: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            year: 0,
            month: 1,
            day: 2,
            hour: 3,
            irradiance: 14,
            wind_speed: 21,
        }
    }
}

impl ColumnLayout {
    fn positions(&self) -> [(&'static str, usize); 6] {
        [
            ("year", self.year),
            ("month", self.month),
            ("day", self.day),
            ("hour", self.hour),
            ("irradiance", self.irradiance),
            ("wind_speed", self.wind_speed),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        let positions = self.positions();
        for (i, (name, column)) in positions.iter().enumerate() {
            if let Some((other, _)) = positions[i + 1..].iter().find(|(_, c)| c == column) {
                return Err(PricingError::Config(format!(
                    "columns.{name} and columns.{other} both point at column {column}"
                )));
            }
        }
        Ok(())
    }
}

/// Reads a delimited weather export into an hourly series.
#[derive(Debug, Clone)]
pub struct WeatherLoader {
    layout: ColumnLayout,
    skip_rows: usize,
    delimiter: u8,
}

impl WeatherLoader {
    pub fn new(layout: ColumnLayout, skip_rows: usize, delimiter: u8) -> Self {
        Self {
            layout,
            skip_rows,
            delimiter,
        }
    }

    pub fn from_config(config: &PricingConfig) -> Self {
        Self::new(
            config.columns.clone(),
            config.skip_rows,
            config.delimiter_byte(),
        )
    }

    pub fn load(&self, path: &Path) -> Result<Vec<WeatherRecord>> {
        let file = std::fs::File::open(path).map_err(|e| PricingError::io(path, e))?;
        let records = self.read(file, path)?;
        info!("Loaded {} hourly records from {}", records.len(), path.display());
        Ok(records)
    }

    /// Parse from any reader; `origin` only labels I/O errors.
    pub fn read<R: Read>(&self, reader: R, origin: &Path) -> Result<Vec<WeatherRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut negative = 0_usize;
        let mut row = StringRecord::new();

        loop {
            match reader.read_record(&mut row) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => return Err(map_csv_error(e, origin)),
            }

            let line = row.position().map_or(0, csv::Position::line);
            if line <= u64::try_from(self.skip_rows).unwrap_or(u64::MAX) {
                continue;
            }

            let record = self.parse_row(&row, line)?;
            if record.irradiance < 0.0 || record.wind_speed < 0.0 {
                negative += 1;
            }
            records.push(record);
        }

        if negative > 0 {
            warn!("{negative} rows carry negative irradiance or wind speed");
        }
        debug!(
            "Parsed {} data rows after skipping {} preamble lines",
            records.len(),
            self.skip_rows
        );

        Ok(records)
    }

    fn parse_row(&self, row: &StringRecord, line: u64) -> Result<WeatherRecord> {
        let layout = &self.layout;
        Ok(WeatherRecord {
            year: parse_field(row, layout.year, "year", line)?,
            month: parse_field(row, layout.month, "month", line)?,
            day: parse_field(row, layout.day, "day", line)?,
            hour: parse_field(row, layout.hour, "hour", line)?,
            irradiance: parse_reading(row, layout.irradiance, "irradiance", line)?,
            wind_speed: parse_reading(row, layout.wind_speed, "wind_speed", line)?,
        })
    }
}

fn parse_field<T: FromStr>(row: &StringRecord, column: usize, name: &str, line: u64) -> Result<T> {
    let raw = row.get(column).ok_or_else(|| PricingError::DataFormat {
        line,
        message: format!(
            "missing column {column} ({name}), row has {} fields",
            row.len()
        ),
    })?;

    raw.parse().map_err(|_| PricingError::DataFormat {
        line,
        message: format!("column {column} ({name}) is not numeric: {raw:?}"),
    })
}

/// Physical readings must be finite; a NaN would poison the rolling window.
fn parse_reading(row: &StringRecord, column: usize, name: &str, line: u64) -> Result<f64> {
    let value: f64 = parse_field(row, column, name, line)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::DataFormat {
            line,
            message: format!("column {column} ({name}) is not a finite number: {value}"),
        })
    }
}

fn map_csv_error(err: csv::Error, origin: &Path) -> PricingError {
    let line = err.position().map_or(0, csv::Position::line);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => PricingError::io(origin, source),
        _ => PricingError::DataFormat { line, message },
    }
}
