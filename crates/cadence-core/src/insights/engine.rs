//! Metrics engine - summary statistics and recommendations from daily records
//!
//! Everything here is a pure function of the input records and the
//! configured thresholds. No I/O, no shared state, no failure modes: an empty
//! slice produces a zeroed summary.

use chrono::NaiveDate;

use crate::models::DailyRecord;

use super::config::InsightsConfig;
use super::types::{InsightRecommendation, InsightsResult, InsightsSummary, Priority};

pub const BOOST_ENERGY: &str = "Boost Daily Energy";
pub const ELEVATE_MOOD: &str = "Elevate Your Mood";
pub const FOCUS_CORE_HABITS: &str = "Focus on Core Habits";
pub const MAINTAIN_MOMENTUM: &str = "Maintain Momentum";
pub const REDUCE_TRIGGERS: &str = "Reduce Sugar/Alcohol Triggers";

/// Health-task id fragments that mark trigger habits
const TRIGGER_MARKERS: &[&str] = &["alcohol", "sugar"];

/// Computes insights with a fixed set of thresholds
#[derive(Debug, Clone, Default)]
pub struct InsightsEngine {
    config: InsightsConfig,
}

impl InsightsEngine {
    pub fn new(config: InsightsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InsightsConfig {
        &self.config
    }

    /// Compute the summary and recommendations for a set of records
    ///
    /// Records may arrive in any order. Best/worst day ties keep the first
    /// record seen in slice order; the streak always walks calendar dates
    /// from the most recent backward.
    pub fn compute(&self, records: &[DailyRecord]) -> InsightsResult {
        let summary = self.summarize(records);
        let recommendations = self.recommend(&summary, records);

        tracing::debug!(
            records = records.len(),
            completion_rate = summary.completion_rate,
            streak_days = summary.streak_days,
            recommendations = recommendations.len(),
            "Computed insights"
        );

        InsightsResult {
            summary,
            recommendations,
        }
    }

    fn summarize(&self, records: &[DailyRecord]) -> InsightsSummary {
        let (best_day, worst_day) = best_and_worst_days(records);

        InsightsSummary {
            avg_mood: average_rating(records.iter().map(|r| r.mood_rating)),
            avg_energy: average_rating(records.iter().map(|r| r.energy_level)),
            best_day,
            worst_day,
            completion_rate: completion_rate(records),
            streak_days: streak_days(records, self.config.streak_threshold),
        }
    }

    fn recommend(
        &self,
        summary: &InsightsSummary,
        records: &[DailyRecord],
    ) -> Vec<InsightRecommendation> {
        let cfg = &self.config;
        let mut recs = Vec::new();

        if summary
            .avg_energy
            .is_some_and(|e| e < cfg.low_energy_threshold)
        {
            recs.push(InsightRecommendation::new(
                BOOST_ENERGY,
                "Your average energy has been low. Small physical habits make the biggest difference.",
                Priority::High,
                &[
                    "Drink a full glass of water right after waking up",
                    "Eat a protein-rich breakfast before noon",
                    "Get 10 minutes of sunlight in the morning",
                ],
            ));
        }

        if summary.avg_mood.is_some_and(|m| m < cfg.low_mood_threshold) {
            recs.push(InsightRecommendation::new(
                ELEVATE_MOOD,
                "Your mood has been trending below average. A few minutes of mindfulness can help.",
                Priority::Medium,
                &[
                    "Start the day with 5 minutes of quiet breathing",
                    "Write down three things you are grateful for each night",
                    "Take a short walk without your phone",
                ],
            ));
        }

        if summary.completion_rate < cfg.low_completion_threshold {
            recs.push(InsightRecommendation::new(
                FOCUS_CORE_HABITS,
                "Completion is below target. Narrow your routine down to what matters most.",
                Priority::High,
                &[
                    "Pick 3 must-do tasks for each day",
                    "Move everything else to an optional list",
                    "Complete the must-do tasks before anything else",
                ],
            ));
        } else if summary.completion_rate >= cfg.high_completion_threshold {
            recs.push(InsightRecommendation::new(
                MAINTAIN_MOMENTUM,
                "You are completing most of your routine. Keep going and stretch a little.",
                Priority::Low,
                &[
                    "Add one small stretch goal to your routine",
                    "Increase one habit by 5 minutes this week",
                    "Review what is working and keep doing it",
                ],
            ));
        }

        if records.iter().any(has_trigger_slip) {
            recs.push(InsightRecommendation::new(
                REDUCE_TRIGGERS,
                "Sugar or alcohol habits slipped on some days. Plan ahead for the moments that trigger them.",
                Priority::Medium,
                &[
                    "Notice the time and place where cravings show up",
                    "Keep a healthy swap ready for those moments",
                    "Remove easy access to sugar and alcohol at home",
                ],
            ));
        }

        recs
    }
}

/// Compute insights with the default thresholds
pub fn compute_insights(records: &[DailyRecord]) -> InsightsResult {
    InsightsEngine::default().compute(records)
}

/// Percentage of a day's tasks completed across all three lists (0-100)
///
/// A day with no tasks scores 0.
pub fn completion_percent(record: &DailyRecord) -> u32 {
    let (total, completed) = record
        .all_tasks()
        .fold((0u32, 0u32), |(total, done), task| {
            (total + 1, done + u32::from(task.completed))
        });

    if total == 0 {
        return 0;
    }
    (100.0 * f64::from(completed) / f64::from(total)).round() as u32
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn average_rating(ratings: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = ratings
        .flatten()
        .fold((0.0, 0u32), |(sum, n), v| (sum + v, n + 1));

    (count > 0).then(|| round2(sum / f64::from(count)))
}

fn best_and_worst_days(records: &[DailyRecord]) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let mut best: (i64, Option<NaiveDate>) = (-1, None);
    let mut worst: (i64, Option<NaiveDate>) = (999, None);

    for record in records {
        let score = i64::from(completion_percent(record));
        if score > best.0 {
            best = (score, Some(record.date));
        }
        if score < worst.0 {
            worst = (score, Some(record.date));
        }
    }

    (best.1, worst.1)
}

fn completion_rate(records: &[DailyRecord]) -> u32 {
    if records.is_empty() {
        return 0;
    }
    let sum: u32 = records.iter().map(completion_percent).sum();
    (f64::from(sum) / records.len() as f64).round() as u32
}

fn streak_days(records: &[DailyRecord], threshold: u32) -> u32 {
    let mut by_recency: Vec<&DailyRecord> = records.iter().collect();
    by_recency.sort_by(|a, b| b.date.cmp(&a.date));

    by_recency
        .into_iter()
        .take_while(|r| completion_percent(r) >= threshold)
        .count() as u32
}

fn has_trigger_slip(record: &DailyRecord) -> bool {
    record.health.iter().any(|task| {
        if task.completed {
            return false;
        }
        let id = task.id.to_lowercase();
        TRIGGER_MARKERS.iter().any(|marker| id.contains(marker))
    })
}
