//! Cache-fronted insights lookups
//!
//! `InsightsService` is the entry point request handlers use: it consults the
//! cache, falls back to fetching records and running the engine on a miss,
//! and stores the fresh result. There is no per-key build lock; two
//! concurrent misses for the same key both compute and the later `set` wins.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{DailyRecord, Period};

use super::cache::InsightsCache;
use super::config::InsightsConfig;
use super::engine::InsightsEngine;
use super::types::{InsightsResult, InsightsSource, ServedInsights};

/// Anything that can supply a subject's routine records for a month
pub trait RecordSource {
    /// Fetch all records for `subject` in `period`
    ///
    /// An empty vec means the subject logged nothing that month. Errors mean
    /// the data could not be read at all.
    fn fetch_records(&self, subject: &str, period: &Period) -> Result<Vec<DailyRecord>>;
}

/// Owns the process-wide insights cache and the engine configuration
#[derive(Debug)]
pub struct InsightsService {
    engine: InsightsEngine,
    cache: InsightsCache,
}

impl Default for InsightsService {
    fn default() -> Self {
        Self::new(InsightsConfig::default())
    }
}

impl InsightsService {
    pub fn new(config: InsightsConfig) -> Self {
        tracing::info!(ttl_secs = config.ttl.as_secs(), "Insights cache initialized");
        Self {
            cache: InsightsCache::new(config.ttl),
            engine: InsightsEngine::new(config),
        }
    }

    pub fn config(&self) -> &InsightsConfig {
        self.engine.config()
    }

    pub fn cache(&self) -> &InsightsCache {
        &self.cache
    }

    /// Serve insights for a subject/period, computing on a cache miss
    pub fn get_or_compute(
        &self,
        source: &dyn RecordSource,
        subject: &str,
        period: &Period,
    ) -> Result<ServedInsights> {
        if let Some(insights) = self.cache.get(subject, period) {
            debug!(subject, period = %period, "Insights cache hit");
            return Ok(ServedInsights {
                insights,
                source: InsightsSource::Cache,
            });
        }

        debug!(subject, period = %period, "Insights cache miss");
        let insights = self.compute(source, subject, period)?;
        self.cache.set(subject, period, insights.clone());

        Ok(ServedInsights {
            insights,
            source: InsightsSource::Computed,
        })
    }

    /// Compute without touching the cache
    pub fn compute(
        &self,
        source: &dyn RecordSource,
        subject: &str,
        period: &Period,
    ) -> Result<InsightsResult> {
        let records = source
            .fetch_records(subject, period)
            .map_err(|e| match e {
                err @ (Error::DataUnavailable(_) | Error::InvalidData(_)) => err,
                other => {
                    warn!(subject, period = %period, error = %other, "Record fetch failed");
                    Error::DataUnavailable(format!(
                        "records for {} in {} could not be loaded",
                        subject, period
                    ))
                }
            })?;

        Ok(self.engine.compute(&records))
    }

    /// Drop the cached result for one subject/period
    pub fn invalidate(&self, subject: &str, period: &Period) -> bool {
        let removed = self.cache.invalidate(subject, period);
        if removed {
            debug!(subject, period = %period, "Invalidated cached insights");
        }
        removed
    }

    /// Drop every cached result
    pub fn clear(&self) {
        self.cache.clear();
    }
}
