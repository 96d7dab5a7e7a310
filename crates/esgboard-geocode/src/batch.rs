//! Batch geocoding orchestration.
//!
//! Drives the geocoder across the full office list in input order,
//! consulting the durable cache before every lookup and spacing the
//! network calls to honor the external service's rate limit. Per office
//! the decision is a three-way branch: already coordinated, cache hit,
//! or network required.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use esgboard_core::models::Office;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use crate::cache::GeocodeCache;
use crate::canonicalize::canonicalize;
use crate::client::Geocoder;

/// Minimum spacing between consecutive network lookups
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(1100);

/// Upper bound on a single lookup; elapsing counts as a soft miss
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(8);

pub struct BatchGeocoder<G> {
    client: G,
    cache: GeocodeCache,
    delay: Duration,
    lookup_timeout: Duration,
}

impl<G: Geocoder> BatchGeocoder<G> {
    pub fn new(client: G, cache: GeocodeCache) -> Self {
        Self {
            client,
            cache,
            delay: DEFAULT_RATE_LIMIT,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Override the rate-limit delay and per-lookup timeout
    pub fn with_pacing(mut self, delay: Duration, lookup_timeout: Duration) -> Self {
        self.delay = delay;
        self.lookup_timeout = lookup_timeout;
        self
    }

    /// Resolve coordinates for every office that lacks them.
    ///
    /// `on_progress` receives `processed / total` after every office:
    /// monotonically non-decreasing, ending at exactly 1.0 when the
    /// batch runs to completion. Pass a no-op closure when progress is
    /// not needed.
    ///
    /// Lookup failures are soft: the office keeps `coordinates = None`
    /// and the batch continues. No retries happen within a run; a
    /// failed office is attempted again on the next full invocation.
    ///
    /// `cancel` is checked between offices (never mid-lookup). On
    /// cancellation the offices processed so far are returned with
    /// partial progress.
    pub async fn run(
        &mut self,
        mut offices: Vec<Office>,
        mut on_progress: impl FnMut(f64),
        cancel: &AtomicBool,
    ) -> Vec<Office> {
        let total = offices.len();
        let mut processed = 0usize;

        for office in offices.iter_mut() {
            if cancel.load(Ordering::Relaxed) {
                debug!(processed, total, "geocode batch cancelled");
                break;
            }

            // Already resolved: no cache consult, no network, no delay
            if office.coordinates.is_some() {
                processed += 1;
                on_progress(processed as f64 / total as f64);
                continue;
            }

            // Cache is keyed by the raw office name
            if let Some(coords) = self.cache.get(&office.name) {
                debug!(office = %office.name, "geocode cache hit");
                office.coordinates = Some(coords);
                processed += 1;
                on_progress(processed as f64 / total as f64);
                continue;
            }

            let query = canonicalize(&office.name);
            let resolved = match timeout(self.lookup_timeout, self.client.lookup(&query)).await {
                Ok(Ok(coords)) => coords,
                Ok(Err(e)) => {
                    warn!(office = %office.name, error = %e, "geocode lookup failed");
                    None
                }
                Err(_) => {
                    warn!(office = %office.name, "geocode lookup timed out");
                    None
                }
            };

            match resolved {
                Some(coords) => {
                    self.cache.put(&office.name, coords);
                    office.coordinates = Some(coords);
                }
                None => {
                    debug!(office = %office.name, query, "no geocode match");
                }
            }

            processed += 1;
            on_progress(processed as f64 / total as f64);

            // Space out network attempts only; cache hits and
            // pre-populated offices cost nothing
            if !self.delay.is_zero() {
                sleep(self.delay).await;
            }
        }

        offices
    }

    /// Hand back the cache, e.g. to inspect it after a run
    pub fn into_cache(self) -> GeocodeCache {
        self.cache
    }
}
