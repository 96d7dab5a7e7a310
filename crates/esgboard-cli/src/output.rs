//! Table and JSON rendering of the typed records.

use anyhow::{Context, Result};
use console::style;
use esgboard_core::aggregate::TARGET_HORIZON;
use esgboard_core::models::{MetricRecord, Office};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Baseline")]
    baseline: String,
    #[tabled(rename = "Points")]
    points: usize,
    #[tabled(rename = "2030 Target")]
    target: String,
    #[tabled(rename = "Regions")]
    regions: usize,
}

pub fn print_metrics(metrics: &[MetricRecord]) {
    let rows: Vec<MetricRow> = metrics
        .iter()
        .map(|m| MetricRow {
            id: m.id.clone(),
            name: m.name.clone(),
            unit: m.unit.clone(),
            // Baseline 0 means "unknown", surface it as such
            baseline: if m.baseline_value == 0.0 {
                "—".to_string()
            } else {
                format!("{:.1}", m.baseline_value)
            },
            points: m.data_points.len(),
            target: m
                .targets
                .get(&TARGET_HORIZON)
                .map(|t| format!("{:.1}", t.value))
                .unwrap_or_else(|| "—".to_string()),
            regions: m.regions.len(),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
    println!("{} {} metrics", style("✓").green(), metrics.len());
}

#[derive(Tabled)]
struct OfficeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Headcount")]
    headcount: u32,
    #[tabled(rename = "Sq Ft")]
    square_footage: String,
    #[tabled(rename = "Coordinates")]
    coordinates: String,
}

pub fn print_offices(offices: &[Office]) {
    let rows: Vec<OfficeRow> = offices
        .iter()
        .map(|o| OfficeRow {
            id: o.id.clone(),
            name: o.name.clone(),
            region: o.region.clone(),
            headcount: o.headcount,
            square_footage: o
                .square_footage
                .map(|sf| format!("{sf:.0}"))
                .unwrap_or_else(|| "—".to_string()),
            coordinates: o
                .coordinates
                .map(|c| format!("{:.4}, {:.4}", c.lat, c.lng))
                .unwrap_or_else(|| "unresolved".to_string()),
        })
        .collect();

    let resolved = offices.iter().filter(|o| o.coordinates.is_some()).count();
    println!("{}", Table::new(rows).with(Style::rounded()));
    println!(
        "{} {} offices ({} with coordinates)",
        style("✓").green(),
        offices.len(),
        resolved
    );
}

/// Write records as pretty JSON, the contract the presentation layer reads
pub fn write_json<T: Serialize>(records: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("serializing records")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    println!("{} wrote {}", style("✓").green(), path.display());
    Ok(())
}
