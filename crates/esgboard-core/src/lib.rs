//! esgboard core - domain models, tabular decoding and metric/office ETL
//!
//! This crate turns the two human-authored CSV sources (sustainability
//! metrics, office locations) into the typed records the rest of the
//! system consumes. It performs no network I/O; geocoding lives in
//! `esgboard-geocode`.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod office;
pub mod tabular;
pub mod target;

pub use error::{EsgError, Result};
