//! Progress bar for the geocoding batch.

use indicatif::{ProgressBar, ProgressStyle};

/// A bar over `total` offices, advanced from the orchestrator's
/// fractional progress callback
pub fn geocode_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Geocoding offices\n[{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
            .unwrap()
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Map the orchestrator's [0,1] fraction back onto bar positions
pub fn advance_to(pb: &ProgressBar, fraction: f64, total: u64) {
    pb.set_position((fraction * total as f64).round() as u64);
}
