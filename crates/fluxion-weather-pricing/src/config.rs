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

//! Run configuration for the weather pricing pipeline.
//!
//! Accepts both snake_case keys and the legacy `parameters.json` keys
//! (`"base price"`, `"number of samples [day]"`, ...).

use crate::error::{PricingError, Result};
use crate::loader::ColumnLayout;
use crate::pricing::PriceModel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "parameters.json";

pub const HOURS_PER_DAY: usize = 24;

fn default_skip_rows() -> usize {
    8 // EPW-style location/design-condition preamble
}

fn default_delimiter() -> char {
    ','
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Hourly weather source
    #[serde(alias = "input file")]
    pub input_file: PathBuf,

    /// Destination of the price CSV
    #[serde(alias = "output file")]
    pub output_file: PathBuf,

    /// Price when both readings sit on their moving average
    #[serde(alias = "base price")]
    pub base_price: f64,

    #[serde(alias = "min price")]
    pub min_price: f64,

    #[serde(alias = "max price")]
    pub max_price: f64,

    /// Price sensitivity to irradiance deviation (radiation column)
    #[serde(alias = "solar energy dependency")]
    pub solar_energy_dependency: f64,

    /// Price sensitivity to wind deviation (wind column)
    #[serde(alias = "wind energy dependency")]
    pub wind_energy_dependency: f64,

    /// Irradiance weight in the combined price
    #[serde(alias = "combined solar energy dependency")]
    pub combined_solar_energy_dependency: f64,

    /// Wind weight in the combined price
    #[serde(alias = "combined wind energy dependency")]
    pub combined_wind_energy_dependency: f64,

    /// Moving-average window length in days (window = days * 24 hours)
    #[serde(alias = "number of samples [day]")]
    pub number_of_samples_days: u32,

    /// Non-data lines at the top of the input
    #[serde(default = "default_skip_rows")]
    pub skip_rows: usize,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Input column positions; the defaults follow the weather provider's layout
    #[serde(default)]
    pub columns: ColumnLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, everything else is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl PricingConfig {
    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PricingError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        let config = Self::parse(&content, ConfigFormat::from_path(path))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| PricingError::Config(format!("failed to parse JSON config: {e}")))?,
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| PricingError::Config(format!("failed to parse TOML config: {e}")))?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let numeric = [
            ("base_price", self.base_price),
            ("min_price", self.min_price),
            ("max_price", self.max_price),
            ("solar_energy_dependency", self.solar_energy_dependency),
            ("wind_energy_dependency", self.wind_energy_dependency),
            (
                "combined_solar_energy_dependency",
                self.combined_solar_energy_dependency,
            ),
            (
                "combined_wind_energy_dependency",
                self.combined_wind_energy_dependency,
            ),
        ];
        if let Some((name, value)) = numeric.iter().find(|(_, value)| !value.is_finite()) {
            return Err(PricingError::Config(format!(
                "{name} must be a finite number, got {value}"
            )));
        }

        if self.min_price > self.max_price {
            return Err(PricingError::Config(format!(
                "min_price ({}) must not exceed max_price ({})",
                self.min_price, self.max_price
            )));
        }

        if self.number_of_samples_days == 0 {
            return Err(PricingError::Config(
                "number_of_samples_days must be at least 1".to_owned(),
            ));
        }

        if !self.delimiter.is_ascii() {
            return Err(PricingError::Config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }

        self.columns.validate()
    }

    /// Moving-average window in hours.
    pub fn window_hours(&self) -> usize {
        self.number_of_samples_days as usize * HOURS_PER_DAY
    }

    /// Delimiter as the byte the csv reader and writer expect.
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or(b',')
    }

    pub fn price_model(&self) -> PriceModel {
        PriceModel {
            base_price: self.base_price,
            min_price: self.min_price,
            max_price: self.max_price,
            solar_dependency: self.solar_energy_dependency,
            wind_dependency: self.wind_energy_dependency,
            combined_solar_dependency: self.combined_solar_energy_dependency,
            combined_wind_dependency: self.combined_wind_energy_dependency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LEGACY_JSON: &str = r#"{
        "input file": "weather.epw",
        "output file": "prices.csv",
        "base price": 100.0,
        "min price": 20.0,
        "max price": 300.0,
        "solar energy dependency": 50.0,
        "wind energy dependency": 40.0,
        "combined solar energy dependency": 30.0,
        "combined wind energy dependency": 25.0,
        "number of samples [day]": 7
    }"#;

    #[test]
    fn test_legacy_json_keys() {
        let config = PricingConfig::parse(LEGACY_JSON, ConfigFormat::Json).unwrap();
        assert_eq!(config.input_file, PathBuf::from("weather.epw"));
        assert_eq!(config.output_file, PathBuf::from("prices.csv"));
        assert_eq!(config.base_price, 100.0);
        assert_eq!(config.combined_wind_energy_dependency, 25.0);
        assert_eq!(config.number_of_samples_days, 7);
        assert_eq!(config.window_hours(), 168);
        assert_eq!(config.skip_rows, 8);
        assert_eq!(config.delimiter_byte(), b',');
        assert_eq!(config.columns, ColumnLayout::default());
    }

    #[test]
    fn test_toml_config() {
        let content = r#"
            input_file = "weather.csv"
            output_file = "out.csv"
            base_price = 2.5
            min_price = 0.5
            max_price = 6.0
            solar_energy_dependency = 1.0
            wind_energy_dependency = 1.5
            combined_solar_energy_dependency = 0.5
            combined_wind_energy_dependency = 0.75
            number_of_samples_days = 1
            skip_rows = 0
            delimiter = ";"

            [columns]
            irradiance = 4
            wind_speed = 5
        "#;
        let config = PricingConfig::parse(content, ConfigFormat::Toml).unwrap();
        assert_eq!(config.window_hours(), 24);
        assert_eq!(config.skip_rows, 0);
        assert_eq!(config.delimiter_byte(), b';');
        assert_eq!(config.columns.irradiance, 4);
        assert_eq!(config.columns.wind_speed, 5);
        assert_eq!(config.columns.year, 0);
    }

    #[test]
    fn test_missing_key_rejected() {
        let content = LEGACY_JSON.replace("\"base price\": 100.0,", "");
        let err = PricingConfig::parse(&content, ConfigFormat::Json).unwrap_err();
        assert!(matches!(err, PricingError::Config(_)));
        assert!(err.to_string().contains("base_price"), "{err}");
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let content = LEGACY_JSON.replace("\"min price\": 20.0", "\"min price\": 400.0");
        let err = PricingConfig::parse(&content, ConfigFormat::Json).unwrap_err();
        assert!(matches!(err, PricingError::Config(_)));
    }

    #[test]
    fn test_equal_bounds_allowed() {
        let content = LEGACY_JSON.replace("\"min price\": 20.0", "\"min price\": 300.0");
        assert!(PricingConfig::parse(&content, ConfigFormat::Json).is_ok());
    }

    #[test]
    fn test_zero_days_rejected() {
        let content = LEGACY_JSON.replace(
            "\"number of samples [day]\": 7",
            "\"number of samples [day]\": 0",
        );
        let err = PricingConfig::parse(&content, ConfigFormat::Json).unwrap_err();
        assert!(err.to_string().contains("number_of_samples_days"), "{err}");
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let content = LEGACY_JSON.replace(
            "\"number of samples [day]\": 7",
            "\"number of samples [day]\": 7, \"delimiter\": \"é\"",
        );
        assert!(PricingConfig::parse(&content, ConfigFormat::Json).is_err());
    }

    #[test]
    fn test_format_from_extension() {
        let format = |p: &str| ConfigFormat::from_path(Path::new(p));
        assert_eq!(format("a.toml"), ConfigFormat::Toml);
        assert_eq!(format("a.TOML"), ConfigFormat::Toml);
        assert_eq!(format("parameters.json"), ConfigFormat::Json);
        assert_eq!(format("parameters"), ConfigFormat::Json);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = PricingConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, PricingError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("parameters.json");
        std::fs::write(&path, LEGACY_JSON).unwrap();

        let config = PricingConfig::load(&path).unwrap();
        let model = config.price_model();
        assert_eq!(model.base_price, 100.0);
        assert_eq!(model.min_price, 20.0);
        assert_eq!(model.max_price, 300.0);
        assert_eq!(model.solar_dependency, 50.0);
        assert_eq!(model.wind_dependency, 40.0);
        assert_eq!(model.combined_solar_dependency, 30.0);
        assert_eq!(model.combined_wind_dependency, 25.0);
    }
}
