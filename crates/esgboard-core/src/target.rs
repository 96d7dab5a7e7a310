//! Free-text target derivation.

use once_cell::sync::Lazy;
use regex::Regex;

static REDUCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)%\s*(?:energy\s*)?reduction").unwrap());

/// Resolve a percentage-reduction expression like "60% reduction by 2030"
/// against a baseline into an absolute target value.
///
/// Returns `None` when the text is empty, when the baseline is zero or
/// non-finite, or when the text holds no reduction expression. Known
/// limitation, kept deliberately: only reduction-style percentages are
/// recognized. Increase-style or absolute-value targets yield `None`
/// with no diagnostic.
pub fn derive_target(target_text: &str, baseline: f64) -> Option<f64> {
    if target_text.is_empty() || baseline == 0.0 || !baseline.is_finite() {
        return None;
    }

    let captures = REDUCTION.captures(target_text)?;
    let percentage: f64 = captures[1].parse().ok()?;
    Some(baseline * (1.0 - percentage / 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_reduction() {
        assert_eq!(derive_target("60% reduction", 100.0), Some(40.0));
    }

    #[test]
    fn reduction_with_qualifiers() {
        let target = derive_target("60% energy reduction from 2022 baseline", 20203.0).unwrap();
        assert!((target - 8081.2).abs() < 0.01);
    }

    #[test]
    fn fractional_percentage() {
        let target = derive_target("12.5% reduction", 80.0).unwrap();
        assert!((target - 70.0).abs() < 1e-9);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(derive_target("60% Reduction", 100.0), Some(40.0));
    }

    #[test]
    fn increase_targets_are_not_recognized() {
        assert_eq!(derive_target("increase by 10%", 100.0), None);
    }

    #[test]
    fn absolute_targets_are_not_recognized() {
        assert_eq!(derive_target("reach 500 MWh", 100.0), None);
    }

    #[test]
    fn empty_text_or_missing_baseline_yields_none() {
        assert_eq!(derive_target("", 100.0), None);
        assert_eq!(derive_target("60% reduction", 0.0), None);
    }
}
