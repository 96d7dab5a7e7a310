//! Cell value normalization.
//!
//! `parse_number` is the single point of truth for "is this cell a real
//! measurement". A `None` must never be coerced to 0 downstream, except
//! where a record attribute explicitly defaults to 0 when no data exists
//! at all (office headcount).

/// Sentinel tokens meaning "not yet determined". Matched case-sensitively.
const NO_DATA_SENTINELS: &[&str] = &["TBD", "NA"];

/// Coerce a raw cell into a number, or `None` when the cell holds no
/// measurement. Trims whitespace and strips thousands separators, so
/// "20,203.5" parses to 20203.5.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || NO_DATA_SENTINELS.contains(&trimmed) {
        return None;
    }

    let cleaned = trimmed.replace(',', "");
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
