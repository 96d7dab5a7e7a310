//! Office record building from decoded office rows.

use crate::models::Office;
use crate::normalize::parse_number;
use crate::tabular::Row;

/// Region assigned when the source row carries none
pub const DEFAULT_REGION: &str = "NA";

/// Office source column contract
pub mod columns {
    pub const REGION: &str = "Regions";
    pub const SITE_NAME: &str = "UniqueSiteName";
    pub const SQUARE_FOOTAGE: &str = "SF";
    pub const HEADCOUNT: &str = "Headcount";
}

/// Map decoded office rows into typed records, preserving input order.
///
/// Rows without a site name are skipped. Ids are positional and only
/// stable within one parse run. Coordinates stay unset here; the
/// geocoding batch fills them in later.
pub fn build_offices(rows: &[Row]) -> Vec<Office> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let name = row.get(columns::SITE_NAME).trim();
            if name.is_empty() {
                return None;
            }

            let region = row.get(columns::REGION).trim();
            let headcount = parse_number(row.get(columns::HEADCOUNT))
                .map(|v| if v > 0.0 { v as u32 } else { 0 })
                .unwrap_or(0);

            Some(Office {
                id: format!("office-{index}"),
                name: name.to_string(),
                region: if region.is_empty() {
                    DEFAULT_REGION.to_string()
                } else {
                    region.to_string()
                },
                headcount,
                square_footage: parse_number(row.get(columns::SQUARE_FOOTAGE)),
                coordinates: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::Row;

    fn office_row(region: &str, name: &str, sf: &str, headcount: &str) -> Row {
        Row::from_pairs(&[
            (columns::REGION, region),
            (columns::SITE_NAME, name),
            (columns::SQUARE_FOOTAGE, sf),
            (columns::HEADCOUNT, headcount),
        ])
    }

    #[test]
    fn builds_typed_records_in_input_order() {
        let rows = vec![
            office_row("Canada", "PW-Vancouver - Georgia Str", "12,500", "85"),
            office_row("US West", "PW-Seattle", "30,000.5", "210"),
        ];
        let offices = build_offices(&rows);
        assert_eq!(offices.len(), 2);
        assert_eq!(offices[0].id, "office-0");
        assert_eq!(offices[0].name, "PW-Vancouver - Georgia Str");
        assert_eq!(offices[0].region, "Canada");
        assert_eq!(offices[0].headcount, 85);
        assert_eq!(offices[0].square_footage, Some(12500.0));
        assert!(offices[0].coordinates.is_none());
        assert_eq!(offices[1].square_footage, Some(30000.5));
    }

    #[test]
    fn skips_rows_without_a_site_name() {
        let rows = vec![
            office_row("Canada", "", "1000", "10"),
            office_row("Canada", "PW-Toronto", "1000", "10"),
        ];
        let offices = build_offices(&rows);
        assert_eq!(offices.len(), 1);
        // Id reflects source position, not output position
        assert_eq!(offices[0].id, "office-1");
    }

    #[test]
    fn headcount_defaults_to_zero_but_square_footage_stays_null() {
        let rows = vec![office_row("Canada", "PW-Ottawa", "TBD", "n/a")];
        let office = &build_offices(&rows)[0];
        assert_eq!(office.headcount, 0);
        assert_eq!(office.square_footage, None);
    }

    #[test]
    fn missing_region_gets_the_fallback() {
        let rows = vec![office_row("", "PW-Austin", "", "")];
        assert_eq!(build_offices(&rows)[0].region, DEFAULT_REGION);
    }
}
