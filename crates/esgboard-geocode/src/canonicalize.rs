//! Office name canonicalization for lookup queries.
//!
//! Site names follow internal naming conventions (organizational prefix,
//! floor suffixes, disambiguating street fragments) that degrade match
//! quality at the external lookup service. This is a best-effort
//! heuristic list, not a general parser: unmatched names pass through
//! unchanged, and the result is used only at lookup time, never stored.

use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing fragments stripped in order. Floor suffixes first, then the
/// known street/building disambiguators that confuse the lookup service.
static TRAILING_NOISE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\sNN$",
        r"-?\s*\d+(th|st|nd|rd)?\s*Floor.*$",
        r"-?\s*150$",
        r"-?\s*Georgia Str.*$",
        r"-?\s*Spring Street$",
        r"-?\s*11th ave$",
        r"-?\s*9th ave$",
        r"-?\s*Fort Ward$",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
    .collect()
});

const ORG_PREFIX: &str = "PW-";

/// Strip site-naming noise from an office name before an external lookup
pub fn canonicalize(name: &str) -> String {
    let mut cleaned = name.strip_prefix(ORG_PREFIX).unwrap_or(name).to_string();

    for pattern in TRAILING_NOISE.iter() {
        cleaned = pattern.replace(&cleaned, "").into_owned();
    }

    cleaned.trim().to_string()
}
