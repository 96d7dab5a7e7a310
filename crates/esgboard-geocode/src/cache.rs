//! Durable geocode cache.
//!
//! A JSON map from raw office name to resolved coordinates, read fully
//! into memory at load and rewritten after every write. Keys are the
//! office names as they appear in the source, NOT canonicalized, so
//! cached lookups stay stable even if canonicalization rules evolve.
//! Single-writer: only the batch orchestrator mutates it.

use esgboard_core::models::Coordinates;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Process-durable name → coordinates store. Never evicts; the office
/// population is small and static.
#[derive(Debug)]
pub struct GeocodeCache {
    path: PathBuf,
    entries: HashMap<String, Coordinates>,
}

impl GeocodeCache {
    /// Load the cache from disk. A missing or corrupted store degrades
    /// to an empty cache rather than failing the pipeline.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "geocode cache corrupted, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "geocode cache unreadable, starting empty");
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    /// An empty cache that still persists to `path` on writes
    pub fn empty<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Coordinates> {
        self.entries.get(name).copied()
    }

    /// Insert a resolved coordinate and flush the whole store back to
    /// disk. A write failure is soft: the in-memory entry is kept and
    /// the batch continues with full network usage next run.
    pub fn put(&mut self, name: &str, coords: Coordinates) {
        self.entries.insert(name.to_string(), coords);
        self.flush();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn flush(&self) {
        let serialized = match serde_json::to_string_pretty(&self.entries) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "failed to serialize geocode cache");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, serialized) {
            warn!(path = %self.path.display(), error = %e, "failed to persist geocode cache");
        }
    }
}
