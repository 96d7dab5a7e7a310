//! esgboard geocoding - office name resolution through a rate-limited
//! external lookup service, with a durable cache and progress reporting.

pub mod batch;
pub mod cache;
pub mod canonicalize;
pub mod client;

pub use batch::BatchGeocoder;
pub use cache::GeocodeCache;
pub use client::{GeocodeError, Geocoder, NominatimGeocoder};
