//! Insights configuration
//!
//! Thresholds and cache lifetime for the insights engine. Defaults match the
//! reference behavior; an optional TOML file can override any of them:
//!
//! ```toml
//! [cache]
//! ttl_secs = 300
//!
//! [thresholds]
//! streak = 60
//! low_completion = 60
//! high_completion = 80
//! low_energy = 3.0
//! low_mood = 3.5
//! ```
//!
//! Search order: explicit path, then
//! `~/.local/share/cadence/config/insights.toml`, then built-in defaults.
//! `CADENCE_INSIGHTS_TTL_SECS` overrides the TTL from either source.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Environment variable overriding the cache TTL (seconds)
pub const TTL_ENV: &str = "CADENCE_INSIGHTS_TTL_SECS";

/// Default cache lifetime for computed insights
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, PartialEq)]
pub struct InsightsConfig {
    /// How long a cached result stays fresh
    pub ttl: Duration,
    /// Minimum completion % for a day to extend the streak
    pub streak_threshold: u32,
    /// Completion rate below this triggers "Focus on Core Habits"
    pub low_completion_threshold: u32,
    /// Completion rate at or above this triggers "Maintain Momentum"
    pub high_completion_threshold: u32,
    /// Average energy strictly below this triggers the energy recommendation
    pub low_energy_threshold: f64,
    /// Average mood strictly below this triggers the mood recommendation
    pub low_mood_threshold: f64,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            streak_threshold: 60,
            low_completion_threshold: 60,
            high_completion_threshold: 80,
            low_energy_threshold: 3.0,
            low_mood_threshold: 3.5,
        }
    }
}

impl InsightsConfig {
    /// Load from the default config location, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load with an optional explicit path taking priority
    pub fn load_from(override_path: Option<&Path>) -> Result<Self> {
        let path = override_path
            .map(Path::to_path_buf)
            .or_else(default_config_path)
            .filter(|p| p.exists());

        let mut config = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading insights config");
                let content = fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                parse_config(&content)?
            }
            None => Self::default(),
        };

        config.apply_env();
        Ok(config)
    }

    /// Apply environment overrides
    fn apply_env(&mut self) {
        if let Ok(raw) = std::env::var(TTL_ENV) {
            let parsed = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| Error::Config(e.to_string()))
                .and_then(ttl_from_secs);
            match parsed {
                Ok(ttl) => self.ttl = ttl,
                Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid {}", TTL_ENV),
            }
        }
    }

    /// Same thresholds with a different TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Longest accepted cache TTL (one year)
pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

fn ttl_from_secs(secs: u64) -> Result<Duration> {
    if secs > MAX_TTL_SECS {
        return Err(Error::Config(format!(
            "cache ttl_secs ({}) must not exceed {}",
            secs, MAX_TTL_SECS
        )));
    }
    Ok(Duration::from_secs(secs))
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("cadence").join("config").join("insights.toml"))
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    cache: Option<RawCache>,
    thresholds: Option<RawThresholds>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCache {
    ttl_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawThresholds {
    streak: Option<u32>,
    low_completion: Option<u32>,
    high_completion: Option<u32>,
    low_energy: Option<f64>,
    low_mood: Option<f64>,
}

/// Parse config from TOML content, layering over defaults
pub fn parse_config(content: &str) -> Result<InsightsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid insights config TOML: {}", e)))?;

    let mut config = InsightsConfig::default();

    if let Some(cache) = raw.cache {
        if let Some(secs) = cache.ttl_secs {
            config.ttl = ttl_from_secs(secs)?;
        }
    }

    if let Some(t) = raw.thresholds {
        if let Some(v) = t.streak {
            config.streak_threshold = v;
        }
        if let Some(v) = t.low_completion {
            config.low_completion_threshold = v;
        }
        if let Some(v) = t.high_completion {
            config.high_completion_threshold = v;
        }
        if let Some(v) = t.low_energy {
            config.low_energy_threshold = v;
        }
        if let Some(v) = t.low_mood {
            config.low_mood_threshold = v;
        }
    }

    if config.low_completion_threshold > config.high_completion_threshold {
        return Err(Error::Config(format!(
            "low_completion ({}) must not exceed high_completion ({})",
            config.low_completion_threshold, config.high_completion_threshold
        )));
    }

    Ok(config)
}
