//! Insights - derived metrics over a month of daily routines
//!
//! Two pieces sit behind every insights request:
//!
//! - **Engine** - a pure function from daily records to summary statistics
//!   (averages, best/worst day, completion rate, streak) plus prioritized
//!   recommendations
//! - **Cache** - a TTL-bounded map keyed by `(subject, period)` so repeat
//!   requests within the freshness window skip recomputation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cadence_core::insights::{InsightsConfig, InsightsService};
//!
//! let service = InsightsService::new(InsightsConfig::load()?);
//! let served = service.get_or_compute(&db, "alice", &"2024-01".parse()?)?;
//! println!("{} ({})", served.insights.summary.completion_rate, served.source);
//! ```

pub mod cache;
pub mod config;
pub mod engine;
pub mod service;
pub mod types;

pub use cache::{CacheStats, InsightsCache};
pub use config::InsightsConfig;
pub use engine::{completion_percent, compute_insights, InsightsEngine};
pub use service::{InsightsService, RecordSource};
pub use types::{
    InsightRecommendation, InsightsResult, InsightsSource, InsightsSummary, Priority,
    ServedInsights,
};
