//! Time-bounded insights cache
//!
//! Maps `(subject, period)` to the last computed [`InsightsResult`]. Entries
//! expire a fixed TTL after they were stored. Expiry is lazy: an expired
//! entry stays in the map until the next `get` for its key evicts it. There
//! is no size bound and no background sweep.
//!
//! One cache is created at service start and shared by reference (see
//! `InsightsService`); `clear` exists for shutdown and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::models::Period;

use super::types::InsightsResult;

type CacheKey = (String, Period);

#[derive(Debug)]
struct CacheEntry {
    result: InsightsResult,
    /// `None` when the TTL runs past what `Instant` can represent
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Counters for observability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Stored entries, including expired ones not yet evicted
    pub entries: usize,
}

#[derive(Debug)]
pub struct InsightsCache {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl InsightsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // A panic while holding the lock cannot leave a half-written entry
    // (insert/remove are single calls), so a poisoned map is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return a copy of the cached result if present and fresh
    ///
    /// An expired entry is removed and reported as a miss.
    pub fn get(&self, subject: &str, period: &Period) -> Option<InsightsResult> {
        let key = (subject.to_string(), *period);
        let now = Instant::now();
        let mut entries = self.lock();

        let found = match entries.get(&key) {
            Some(entry) if !entry.is_expired(now) => Some(entry.result.clone()),
            Some(_) => {
                entries.remove(&key);
                debug!(subject, period = %period, "Evicted expired insights");
                None
            }
            None => None,
        };

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Store a result, replacing any existing entry for the key
    pub fn set(&self, subject: &str, period: &Period, result: InsightsResult) {
        let entry = CacheEntry {
            result,
            expires_at: Instant::now().checked_add(self.ttl),
        };
        self.lock().insert((subject.to_string(), *period), entry);
    }

    /// Remove the entry for a key; returns whether one was present
    pub fn invalidate(&self, subject: &str, period: &Period) -> bool {
        self.lock()
            .remove(&(subject.to_string(), *period))
            .is_some()
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

impl Default for InsightsCache {
    fn default() -> Self {
        Self::new(super::config::DEFAULT_TTL)
    }
}
