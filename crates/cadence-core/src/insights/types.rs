//! Core types for the insights engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How urgently a recommendation should be acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Summary statistics over a period of daily records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsSummary {
    /// Mean mood over rated days, 2 decimals; absent when nothing was rated
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub avg_mood: Option<f64>,
    /// Mean energy over rated days, 2 decimals; absent when nothing was rated
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub avg_energy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub best_day: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub worst_day: Option<NaiveDate>,
    /// Mean of per-day completion percentages (0-100)
    pub completion_rate: u32,
    /// Consecutive most-recent days at or above the streak threshold
    pub streak_days: u32,
}

/// An advisory generated from the summary; never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightRecommendation {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub actions: Vec<String>,
}

impl InsightRecommendation {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        actions: &[&str],
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority,
            actions: actions.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Output of one engine run: the unit stored in the cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsResult {
    pub summary: InsightsSummary,
    pub recommendations: Vec<InsightRecommendation>,
}

impl InsightsResult {
    /// Look up a recommendation by title
    pub fn recommendation(&self, title: &str) -> Option<&InsightRecommendation> {
        self.recommendations.iter().find(|r| r.title == title)
    }
}

/// Where a served result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightsSource {
    /// Returned from the cache without running the engine
    Cache,
    /// Freshly computed from the record store
    Computed,
}

impl InsightsSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightsSource::Cache => "cache",
            InsightsSource::Computed => "computed",
        }
    }
}

impl fmt::Display for InsightsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An insights result tagged with its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServedInsights {
    pub insights: InsightsResult,
    pub source: InsightsSource,
}
