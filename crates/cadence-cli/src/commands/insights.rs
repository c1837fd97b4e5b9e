//! Insights command implementation

use anyhow::{Context, Result};
use cadence_core::db::Database;
use cadence_core::insights::{InsightsConfig, InsightsResult, InsightsService, Priority};
use cadence_core::models::Period;

use super::progress_bar;

/// Compute insights for one user and month
pub fn compute_report(
    db: &Database,
    user: &str,
    period: &Period,
    config: InsightsConfig,
) -> Result<InsightsResult> {
    let service = InsightsService::new(config);
    let served = service
        .get_or_compute(db, user, period)
        .with_context(|| format!("Failed to compute insights for '{}'", user))?;
    Ok(served.insights)
}

pub fn cmd_insights(
    db: &Database,
    user: &str,
    period: &Period,
    config: InsightsConfig,
    json: bool,
) -> Result<()> {
    let result = compute_report(db, user, period, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let summary = &result.summary;
    let fmt_rating =
        |r: Option<f64>| r.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "n/a".to_string());
    let fmt_day = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.to_string()).unwrap_or_else(|| "n/a".to_string())
    };

    println!();
    println!("📊 Insights for {} ({})", user, period);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Completion:  {} {}%",
        progress_bar(summary.completion_rate),
        summary.completion_rate
    );
    println!("   Streak:      {} days", summary.streak_days);
    println!("   Avg mood:    {}", fmt_rating(summary.avg_mood));
    println!("   Avg energy:  {}", fmt_rating(summary.avg_energy));
    println!("   Best day:    {}", fmt_day(summary.best_day));
    println!("   Worst day:   {}", fmt_day(summary.worst_day));

    if result.recommendations.is_empty() {
        return Ok(());
    }

    println!();
    println!("💡 Recommendations");
    for rec in &result.recommendations {
        let marker = match rec.priority {
            Priority::High => "🔴",
            Priority::Medium => "🟡",
            Priority::Low => "🟢",
        };
        println!();
        println!("   {} {} ({})", marker, rec.title, rec.priority);
        println!("      {}", rec.description);
        for action in &rec.actions {
            println!("      • {}", action);
        }
    }

    Ok(())
}
