//! Offices command: decode and build typed office records.

use anyhow::Result;
use esgboard_core::office::build_offices;
use esgboard_core::tabular::decode_path;

use crate::cli::OfficesArgs;
use crate::output;

pub fn execute(args: OfficesArgs) -> Result<()> {
    let rows = decode_path(&args.source)?;
    let offices = build_offices(&rows);

    output::print_offices(&offices);

    if let Some(path) = &args.json {
        output::write_json(&offices, path)?;
    }
    Ok(())
}
