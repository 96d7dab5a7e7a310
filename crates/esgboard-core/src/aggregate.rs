//! Metric aggregation: folds decoded metric rows into `MetricRecord`s.
//!
//! The fold is deliberately simple. Each row is classified once into a
//! flat `RowKind`, then branched on. Records are discovered lazily while
//! scanning and emitted in first-seen order. Duplicate (metric, year)
//! global rows both append; deduplication is a data-quality concern
//! upstream of this layer.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{DataPoint, MetricRecord, Target};
use crate::normalize::parse_number;
use crate::tabular::Row;
use crate::target::derive_target;

/// Year whose global value anchors percentage-based targets
pub const BASELINE_YEAR: i32 = 2022;

/// Year whose regional rows populate the cross-region snapshot
pub const REGIONAL_REFERENCE_YEAR: i32 = 2024;

/// Future year for which a numeric goal may be derived from free text
pub const TARGET_HORIZON: i32 = 2030;

/// Metric source column contract
pub mod columns {
    pub const METRIC_ID: &str = "Metric ID";
    pub const METRIC_NAME: &str = "Metric Name";
    pub const CATEGORY: &str = "Environmental Dimensions";
    pub const UNIT: &str = "Units";
    pub const YEAR: &str = "Year";
    pub const REGION: &str = "Region";
    pub const PERFORMANCE: &str = "Performance";
    pub const NOTE: &str = "Data Quality Note";
    pub const TARGET_2030: &str = "Future (2030 Target)";
    pub const REPORT_TYPE: &str = "Report Type";
}

const GLOBAL_REGION: &str = "Global";
const ID_SENTINEL: &str = "NA";
const TARGET_ROW_TYPE: &str = "Target";

/// Flat row classification, computed once per row and branched on
#[derive(Debug, Clone, PartialEq)]
enum RowKind {
    /// Global actual-performance row: feeds the time series and,
    /// at the baseline year, the baseline and target derivation
    GlobalActual,
    /// Global target-declaration row: may anchor the baseline but
    /// never contributes a data point
    GlobalTarget,
    /// Regional row: feeds the reference-year snapshot only
    Regional(String),
}

fn classify(row: &Row) -> RowKind {
    let region = row.get(columns::REGION).trim();
    if region == GLOBAL_REGION {
        if row.get(columns::REPORT_TYPE).trim() == TARGET_ROW_TYPE {
            RowKind::GlobalTarget
        } else {
            RowKind::GlobalActual
        }
    } else {
        RowKind::Regional(region.to_string())
    }
}

/// Accumulator slot: the record under construction plus the latch that
/// makes the first baseline-year row win
struct Slot {
    record: MetricRecord,
    baseline_set: bool,
}

/// Fold decoded metric rows into records, in first-seen id order.
///
/// A metric whose every value was unparseable is still emitted with an
/// empty series, so consumers can flag "no data" explicitly instead of
/// silently losing the metric.
pub fn aggregate_metrics(rows: &[Row]) -> Vec<MetricRecord> {
    let mut slots: HashMap<String, Slot> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for row in rows {
        let name = row.get(columns::METRIC_NAME).trim();
        let raw_id = row.get(columns::METRIC_ID).trim();
        if name.is_empty() && raw_id.is_empty() {
            debug!("skipping row with neither metric name nor id");
            continue;
        }

        let id = if raw_id == ID_SENTINEL { name } else { raw_id };
        if id.is_empty() {
            debug!(name, "skipping row with unresolvable metric id");
            continue;
        }

        let slot = slots.entry(id.to_string()).or_insert_with(|| {
            order.push(id.to_string());
            Slot {
                record: MetricRecord::new(
                    id,
                    name,
                    row.get(columns::CATEGORY).trim(),
                    row.get(columns::UNIT).trim(),
                ),
                baseline_set: false,
            }
        });

        let year: Option<i32> = row.get(columns::YEAR).trim().parse().ok();
        let value = parse_number(row.get(columns::PERFORMANCE));

        match classify(row) {
            kind @ (RowKind::GlobalActual | RowKind::GlobalTarget) => {
                let Some(value) = value else { continue };

                if year == Some(BASELINE_YEAR) {
                    if !slot.baseline_set {
                        slot.record.baseline_value = value;
                        slot.baseline_set = true;
                    }
                    // First successful derivation wins; later baseline-year
                    // rows never overwrite a resolved target.
                    if !slot.record.targets.contains_key(&TARGET_HORIZON) {
                        let label = row.get(columns::TARGET_2030).trim();
                        if let Some(target) = derive_target(label, value) {
                            slot.record.targets.insert(
                                TARGET_HORIZON,
                                Target {
                                    value: target,
                                    label: label.to_string(),
                                },
                            );
                        }
                    }
                }

                if kind == RowKind::GlobalActual {
                    if let Some(year) = year {
                        let note = row.get(columns::NOTE).trim();
                        slot.record.data_points.push(DataPoint {
                            year,
                            value,
                            note: (!note.is_empty()).then(|| note.to_string()),
                        });
                    }
                }
            }
            RowKind::Regional(region) => {
                if let Some(value) = value {
                    if year == Some(REGIONAL_REFERENCE_YEAR) {
                        slot.record.regions.insert(region, value);
                    }
                }
            }
        }
    }

    let mut records: Vec<MetricRecord> = order
        .into_iter()
        .filter_map(|id| slots.remove(&id))
        .map(|slot| slot.record)
        .collect();

    for record in &mut records {
        record.data_points.sort_by_key(|p| p.year);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::Row;

    fn metric_row(cells: &[(&str, &str)]) -> Row {
        Row::from_pairs(cells)
    }

    fn global_row(id: &str, name: &str, year: &str, value: &str) -> Row {
        metric_row(&[
            (columns::METRIC_ID, id),
            (columns::METRIC_NAME, name),
            (columns::CATEGORY, "Energy"),
            (columns::UNIT, "MWh"),
            (columns::YEAR, year),
            (columns::REGION, "Global"),
            (columns::PERFORMANCE, value),
        ])
    }

    #[test]
    fn seeds_descriptive_fields_from_first_row() {
        let rows = vec![global_row("E1", "Total Energy", "2022", "100")];
        let metrics = aggregate_metrics(&rows);
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].id, "E1");
        assert_eq!(metrics[0].name, "Total Energy");
        assert_eq!(metrics[0].category, "Energy");
        assert_eq!(metrics[0].unit, "MWh");
    }

    #[test]
    fn id_falls_back_to_name_on_sentinel() {
        let rows = vec![global_row("NA", "Water Use", "2023", "5")];
        let metrics = aggregate_metrics(&rows);
        assert_eq!(metrics[0].id, "Water Use");
    }

    #[test]
    fn rows_without_name_or_id_are_skipped() {
        let rows = vec![
            metric_row(&[(columns::YEAR, "2022"), (columns::PERFORMANCE, "9")]),
            global_row("E1", "Energy", "2022", "100"),
        ];
        assert_eq!(aggregate_metrics(&rows).len(), 1);
    }

    #[test]
    fn baseline_year_sets_baseline_and_derives_target() {
        let row = metric_row(&[
            (columns::METRIC_ID, "E1"),
            (columns::METRIC_NAME, "Energy"),
            (columns::YEAR, "2022"),
            (columns::REGION, "Global"),
            (columns::PERFORMANCE, "20,203"),
            (columns::TARGET_2030, "60% energy reduction from 2022 baseline"),
        ]);
        let metrics = aggregate_metrics(&[row]);
        let metric = &metrics[0];
        assert_eq!(metric.baseline_value, 20203.0);
        let target = metric.targets.get(&TARGET_HORIZON).unwrap();
        assert!((target.value - 8081.2).abs() < 0.01);
        assert_eq!(target.label, "60% energy reduction from 2022 baseline");
    }

    #[test]
    fn first_baseline_row_wins_but_duplicates_still_append() {
        let first = metric_row(&[
            (columns::METRIC_ID, "E1"),
            (columns::METRIC_NAME, "Energy"),
            (columns::YEAR, "2022"),
            (columns::REGION, "Global"),
            (columns::PERFORMANCE, "100"),
            (columns::TARGET_2030, "50% reduction"),
        ]);
        let second = metric_row(&[
            (columns::METRIC_ID, "E1"),
            (columns::METRIC_NAME, "Energy"),
            (columns::YEAR, "2022"),
            (columns::REGION, "Global"),
            (columns::PERFORMANCE, "200"),
            (columns::TARGET_2030, "10% reduction"),
        ]);

        let metrics = aggregate_metrics(&[first, second]);
        let metric = &metrics[0];
        assert_eq!(metric.baseline_value, 100.0);
        assert_eq!(metric.targets[&TARGET_HORIZON].value, 50.0);
        // No dedup: both baseline-year rows land in the series
        assert_eq!(metric.data_points.len(), 2);
        assert_eq!(metric.data_points[0].value, 100.0);
        assert_eq!(metric.data_points[1].value, 200.0);
    }

    #[test]
    fn non_baseline_global_years_still_append() {
        let rows = vec![global_row("E1", "Energy", "2023", "90")];
        let metric = &aggregate_metrics(&rows)[0];
        assert_eq!(metric.baseline_value, 0.0);
        assert_eq!(metric.data_points, vec![DataPoint { year: 2023, value: 90.0, note: None }]);
    }

    #[test]
    fn target_rows_never_contribute_data_points() {
        let rows = vec![metric_row(&[
            (columns::METRIC_ID, "E1"),
            (columns::METRIC_NAME, "Energy"),
            (columns::YEAR, "2022"),
            (columns::REGION, "Global"),
            (columns::PERFORMANCE, "100"),
            (columns::REPORT_TYPE, "Target"),
        ])];
        let metric = &aggregate_metrics(&rows)[0];
        assert_eq!(metric.baseline_value, 100.0);
        assert!(metric.data_points.is_empty());
    }

    #[test]
    fn regional_rows_only_populate_reference_year() {
        let regional = |year: &str, region: &str, value: &str| {
            metric_row(&[
                (columns::METRIC_ID, "E1"),
                (columns::METRIC_NAME, "Energy"),
                (columns::YEAR, year),
                (columns::REGION, region),
                (columns::PERFORMANCE, value),
            ])
        };
        let rows = vec![
            regional("2023", "Europe", "7"),
            regional("2024", "Europe", "8"),
            regional("2024", "North America", "12"),
        ];
        let metric = &aggregate_metrics(&rows)[0];
        assert_eq!(metric.regions.len(), 2);
        assert_eq!(metric.regions["Europe"], 8.0);
        assert_eq!(metric.regions["North America"], 12.0);
        // Regional rows never touch the global series
        assert!(metric.data_points.is_empty());
    }

    #[test]
    fn series_is_sorted_ascending_by_year() {
        let rows = vec![
            global_row("E1", "Energy", "2024", "80"),
            global_row("E1", "Energy", "2022", "100"),
            global_row("E1", "Energy", "2023", "90"),
        ];
        let years: Vec<i32> = aggregate_metrics(&rows)[0]
            .data_points
            .iter()
            .map(|p| p.year)
            .collect();
        assert_eq!(years, vec![2022, 2023, 2024]);
    }

    #[test]
    fn metric_with_no_parseable_values_is_still_emitted() {
        let rows = vec![
            global_row("E1", "Energy", "2022", "TBD"),
            global_row("E1", "Energy", "2023", ""),
        ];
        let metrics = aggregate_metrics(&rows);
        assert_eq!(metrics.len(), 1);
        assert!(metrics[0].data_points.is_empty());
        assert_eq!(metrics[0].baseline_value, 0.0);
    }

    #[test]
    fn records_keep_first_seen_order() {
        let rows = vec![
            global_row("B", "Beta", "2022", "1"),
            global_row("A", "Alpha", "2022", "2"),
            global_row("B", "Beta", "2023", "3"),
        ];
        let records = aggregate_metrics(&rows);
        let ids: Vec<&str> = records.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }
}
