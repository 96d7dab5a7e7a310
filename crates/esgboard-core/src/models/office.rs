use serde::{Deserialize, Serialize};

/// A resolved latitude/longitude pair, also the geocode cache value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// One office location row, typed and ready for the geocoding batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Office {
    /// Synthetic positional id, stable only within one parse run
    pub id: String,

    /// Raw site name from the source. Doubles as the geocode cache key,
    /// so it is never canonicalized in place.
    pub name: String,

    pub region: String,

    /// Employee count, 0 when the source cell was unparseable
    pub headcount: u32,

    pub square_footage: Option<f64>,

    /// Absent until the geocoding batch resolves this office
    pub coordinates: Option<Coordinates>,
}
