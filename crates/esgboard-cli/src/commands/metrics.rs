//! Metrics command: decode, aggregate, render.

use anyhow::Result;
use esgboard_core::aggregate::aggregate_metrics;
use esgboard_core::tabular::decode_path;

use crate::cli::MetricsArgs;
use crate::output;

pub fn execute(args: MetricsArgs) -> Result<()> {
    let rows = decode_path(&args.source)?;
    let metrics = aggregate_metrics(&rows);

    output::print_metrics(&metrics);

    if let Some(path) = &args.json {
        output::write_json(&metrics, path)?;
    }
    Ok(())
}
