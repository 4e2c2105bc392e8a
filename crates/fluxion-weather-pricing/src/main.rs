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

use anyhow::{Context, Result};
use clap::Parser;
use fluxion_weather_pricing::config::DEFAULT_CONFIG_PATH;
use fluxion_weather_pricing::{PricingConfig, run};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "weather-price")]
#[command(about = "Derive dynamic electricity prices from hourly weather data", long_about = None)]
struct Cli {
    /// Configuration file (JSON, or TOML by extension)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the configured output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not print the price summary table
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the summary table
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = PricingConfig::load(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    if let Some(output) = cli.output {
        config.output_file = output;
    }

    info!(
        "Input: {} | Output: {} | Window: {} day(s)",
        config.input_file.display(),
        config.output_file.display(),
        config.number_of_samples_days
    );
    info!(
        "Price band: {} .. {} around base {}",
        config.min_price, config.max_price, config.base_price
    );

    let report = run(&config).context("Price derivation failed")?;

    if !cli.quiet {
        println!("{}", report.summary_table());
    }
    info!(
        "Done: {} rows written to {}",
        report.rows,
        report.output_file.display()
    );

    Ok(())
}
