//! On-disk snapshot of the last fetched record set
//!
//! The snapshot is a plain JSON array of records; freshness is derived from
//! the file's modification time rather than anything stored in the payload.
//! Reads and writes carry no cross-process locking, so two overlapping
//! processes can race on the file - approximate cache coherency is accepted.

use crate::types::CoinRecord;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Store for the short-lived market snapshot
pub struct SnapshotStore {
    path: PathBuf,
    ttl: Duration,
}

impl SnapshotStore {
    /// Creates a snapshot store backed by `path`, fresh for `ttl`
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    /// Loads the snapshot if it is present, fresh, and wholly decodable.
    ///
    /// Every failure mode (missing file, stale mtime, unreadable, malformed
    /// JSON) degrades to `None`; a partial snapshot is never returned.
    pub fn load(&self) -> Option<Vec<CoinRecord>> {
        let age = self.age().ok()?;
        if age >= self.ttl {
            tracing::debug!(path = %self.path.display(), age_secs = age.as_secs(), "Snapshot is stale");
            return None;
        }

        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "Snapshot unreadable");
                return None;
            }
        };

        match serde_json::from_slice(&data) {
            Ok(records) => Some(records),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "Snapshot failed to decode, treating as absent");
                None
            }
        }
    }

    /// Overwrites the snapshot with a freshly fetched record set.
    ///
    /// Callers treat a write failure as a degradation, not an error.
    pub fn store(&self, records: &[CoinRecord]) -> io::Result<()> {
        let data = serde_json::to_vec(records).map_err(io::Error::other)?;
        fs::write(&self.path, data)
    }

    fn age(&self) -> io::Result<Duration> {
        let modified = fs::metadata(&self.path)?.modified()?;
        Ok(modified.elapsed().unwrap_or(Duration::ZERO))
    }
}
