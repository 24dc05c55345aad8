//! Time-to-live cache over a log source

use carlog_util::{format_duration, MonotonicInstant};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

use crate::{LogSnapshot, LogSource, SourceError, SourceResult};

/// Default freshness window for a fetched log
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

#[derive(Debug)]
struct CacheEntry {
    fetched_at: MonotonicInstant,
    snapshot: Arc<LogSnapshot>,
}

/// Wraps a source and reuses the last ingested snapshot until it is older
/// than the time-to-live or `invalidate` is called.
///
/// A zero time-to-live disables caching.
pub struct CachedLogSource<S> {
    inner: S,
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl<S: LogSource> CachedLogSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current snapshot, fetching if the cached one is stale
    pub fn snapshot(&self) -> SourceResult<Arc<LogSnapshot>> {
        self.snapshot_at(MonotonicInstant::now())
    }

    /// Like `snapshot`, with the current instant supplied by the caller
    pub fn snapshot_at(&self, now: MonotonicInstant) -> SourceResult<Arc<LogSnapshot>> {
        let mut entry = self.entry.lock().map_err(|_| SourceError::LockPoisoned)?;

        if let Some(cached) = entry.as_ref()
            && self.is_fresh(cached, now)
        {
            debug!(
                source = %self.inner.describe(),
                age = %format_duration(now.saturating_duration_since(cached.fetched_at)),
                "Event log cache hit"
            );
            return Ok(cached.snapshot.clone());
        }

        let snapshot = Arc::new(self.inner.snapshot()?);
        info!(
            source = %self.inner.describe(),
            records = snapshot.len(),
            "Event log fetched"
        );

        *entry = Some(CacheEntry {
            fetched_at: now,
            snapshot: snapshot.clone(),
        });
        Ok(snapshot)
    }

    /// Drop the cached snapshot so the next call fetches
    pub fn invalidate(&self) -> SourceResult<()> {
        let mut entry = self.entry.lock().map_err(|_| SourceError::LockPoisoned)?;
        if entry.take().is_some() {
            info!(source = %self.inner.describe(), "Event log cache cleared");
        }
        Ok(())
    }

    /// Whether a cached snapshot would be served at `now`
    pub fn is_fresh_at(&self, now: MonotonicInstant) -> bool {
        match self.entry.lock() {
            Ok(entry) => entry.as_ref().is_some_and(|e| self.is_fresh(e, now)),
            Err(_) => false,
        }
    }

    fn is_fresh(&self, entry: &CacheEntry, now: MonotonicInstant) -> bool {
        !self.ttl.is_zero() && now.saturating_duration_since(entry.fetched_at) < self.ttl
    }
}
