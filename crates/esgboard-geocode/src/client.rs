//! Geocoder port and the Nominatim-backed implementation.

use async_trait::async_trait;
use esgboard_core::models::Coordinates;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Port for resolving a free-text place query to at most one coordinate
/// pair. Implementations perform no queuing; callers are responsible for
/// spacing requests.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a query to its best match, `Ok(None)` when the service
    /// has no match. An `Err` is a transport-level failure; the batch
    /// orchestrator treats it the same as no match.
    async fn lookup(&self, query: &str) -> Result<Option<Coordinates>, GeocodeError>;
}

/// Transport-level lookup failure. Always soft: a single bad office must
/// never abort the batch.
#[derive(Debug, Error)]
#[error("geocode lookup failed: {reason}")]
pub struct GeocodeError {
    pub reason: String,
}

/// Nominatim search client
pub struct NominatimGeocoder {
    /// Base URL for the search API (e.g. "https://nominatim.openstreetmap.org")
    base_url: String,

    /// User agent sent with every request; Nominatim requires a
    /// distinct one per application
    user_agent: String,

    /// HTTP client
    client: reqwest::Client,
}

impl NominatimGeocoder {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: user_agent.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn lookup(&self, query: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("format", "json"), ("q", query), ("limit", "1")])
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| GeocodeError {
                reason: format!("request failed for '{query}': {e}"),
            })?;

        if !response.status().is_success() {
            return Err(GeocodeError {
                reason: format!("'{query}' returned status {}", response.status()),
            });
        }

        let results: Vec<NominatimResult> = response.json().await.map_err(|e| GeocodeError {
            reason: format!("unparseable response for '{query}': {e}"),
        })?;

        let Some(best) = results.first() else {
            return Ok(None);
        };

        // Nominatim serializes coordinates as strings
        match (best.lat.parse::<f64>(), best.lon.parse::<f64>()) {
            (Ok(lat), Ok(lng)) => Ok(Some(Coordinates { lat, lng })),
            _ => {
                warn!(query, "geocoder returned non-numeric coordinates");
                Ok(None)
            }
        }
    }
}

/// One entry of the Nominatim search response array
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}
