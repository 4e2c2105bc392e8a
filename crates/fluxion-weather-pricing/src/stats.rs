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

//! Descriptive statistics for the price columns.

use comfy_table::{Attribute, Cell, CellAlignment, Table, presets::UTF8_FULL};
use serde::Serialize;

/// count / mean / std / min / quartiles / max of one column, NaN excluded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl PriceSummary {
    pub fn from_values(values: &[f64]) -> Self {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                median: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        let n = count as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let std = if count > 1 {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        } else {
            f64::NAN
        };

        Self {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        }
    }

    fn rows(&self) -> [(&'static str, String); 8] {
        [
            ("count", self.count.to_string()),
            ("mean", format_stat(self.mean)),
            ("std", format_stat(self.std)),
            ("min", format_stat(self.min)),
            ("25%", format_stat(self.q25)),
            ("50%", format_stat(self.median)),
            ("75%", format_stat(self.q75)),
            ("max", format_stat(self.max)),
        ]
    }
}

/// Linear interpolation between closest ranks of an ascending, NaN-free slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "position is within 0..len"
    )]
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else {
        format!("{value:.6}")
    }
}

/// Render named summaries side by side, one column per price series.
pub fn summary_table(columns: &[(&str, PriceSummary)]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec![Cell::new("")];
    header.extend(
        columns
            .iter()
            .map(|(name, _)| Cell::new(name).add_attribute(Attribute::Bold)),
    );
    table.set_header(header);

    let rendered: Vec<_> = columns.iter().map(|(_, summary)| summary.rows()).collect();
    for row in 0..8 {
        let label = rendered.first().map_or("", |rows| rows[row].0);
        let mut cells = vec![Cell::new(label).add_attribute(Attribute::Bold)];
        cells.extend(
            rendered
                .iter()
                .map(|rows| Cell::new(&rows[row].1).set_alignment(CellAlignment::Right)),
        );
        table.add_row(cells);
    }

    table
}
