//! Routine command implementations

use std::path::Path;

use anyhow::{bail, Context, Result};
use cadence_core::db::Database;
use cadence_core::insights::completion_percent;
use cadence_core::models::{DailyRecord, DailyTask, Period, TaskCategory};
use chrono::NaiveDate;
use tracing::debug;

use super::progress_bar;

/// Parse `id:text` or `id:text:done` into a task
pub fn parse_task_arg(arg: &str) -> Result<DailyTask> {
    let (id, rest) = arg
        .split_once(':')
        .with_context(|| format!("Invalid task '{}' (use id:text or id:text:done)", arg))?;

    let (text, completed) = match rest.rsplit_once(':') {
        Some((text, "done")) => (text, true),
        _ => (rest, false),
    };

    if id.trim().is_empty() || text.trim().is_empty() {
        bail!("Invalid task '{}' (id and text are required)", arg);
    }

    Ok(DailyTask::new(id.trim(), text.trim(), completed))
}

/// Assemble a day's record from CLI arguments
pub fn build_record(
    date: NaiveDate,
    mood: Option<f64>,
    energy: Option<f64>,
    morning: &[String],
    health: &[String],
    night: &[String],
) -> Result<DailyRecord> {
    let parse_all = |specs: &[String]| -> Result<Vec<DailyTask>> {
        specs.iter().map(|s| parse_task_arg(s)).collect()
    };

    let mut record = DailyRecord::new(date);
    for (category, args) in [
        (TaskCategory::Morning, morning),
        (TaskCategory::Health, health),
        (TaskCategory::Night, night),
    ] {
        *record.tasks_mut(category) = parse_all(args)?;
    }
    record.mood_rating = mood;
    record.energy_level = energy;
    Ok(record)
}

pub fn cmd_log(db: &Database, user: &str, record: &DailyRecord) -> Result<()> {
    db.upsert_user(user, None)
        .with_context(|| format!("Failed to create user '{}'", user))?;
    db.upsert_daily_record(user, record)
        .context("Failed to save routine")?;

    let done = record.all_tasks().filter(|t| t.completed).count();
    let total = record.all_tasks().count();
    println!(
        "✅ Logged {} for {}: {}/{} tasks ({}%)",
        record.date,
        user,
        done,
        total,
        completion_percent(record)
    );

    Ok(())
}

pub fn cmd_import(db: &Database, user: &str, file: &Path) -> Result<()> {
    println!("📥 Importing routines from {}...", file.display());

    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let records: Vec<DailyRecord> =
        serde_json::from_str(&raw).context("Expected a JSON array of daily records")?;
    debug!(count = records.len(), user, "Parsed routine import");

    // Reject the whole file before writing anything
    for record in &records {
        record
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid record for {}: {}", record.date, e))?;
    }

    db.upsert_user(user, None)
        .with_context(|| format!("Failed to create user '{}'", user))?;

    for record in &records {
        db.upsert_daily_record(user, record)
            .with_context(|| format!("Failed to import record for {}", record.date))?;
    }

    println!("✅ Imported {} records for {}", records.len(), user);
    println!("   A running server keeps serving cached insights until their TTL expires.");

    Ok(())
}

/// Completed and total task counts for one of a day's lists
pub fn category_counts(record: &DailyRecord, category: TaskCategory) -> (usize, usize) {
    let tasks = record.tasks(category);
    (tasks.iter().filter(|t| t.completed).count(), tasks.len())
}

pub fn cmd_routines(
    db: &Database,
    user: &str,
    period: &Period,
    category: Option<TaskCategory>,
) -> Result<()> {
    if db.get_user(user)?.is_none() {
        bail!("User '{}' not found", user);
    }

    let records = db.list_records_for_period(user, period)?;

    if records.is_empty() {
        println!("No routines logged for {} in {}. Add one with:", user, period);
        println!("  cadence log --user {} --morning \"stretch:Stretch:done\"", user);
        return Ok(());
    }

    println!();
    match category {
        Some(category) => println!("📅 {} routines for {} ({})", category, user, period),
        None => println!("📅 Routines for {} ({})", user, period),
    }
    println!("   ─────────────────────────────────────────────────────────────");

    let rating = |r: Option<f64>| {
        r.map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "-".to_string())
    };

    for record in &records {
        if let Some(category) = category {
            let (done, total) = category_counts(record, category);
            println!(
                "   {} │ {}/{} done │ {}",
                record.date,
                done,
                total,
                record
                    .tasks(category)
                    .iter()
                    .map(|t| {
                        let mark = if t.completed { "✓" } else { "·" };
                        format!("{} {}", mark, t.text)
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            continue;
        }

        let percent = completion_percent(record);
        let lists = TaskCategory::all()
            .iter()
            .map(|c| {
                let (done, total) = category_counts(record, *c);
                format!("{} {}/{}", c, done, total)
            })
            .collect::<Vec<_>>()
            .join("  ");
        println!(
            "   {} │ {} {:>3}% │ {} │ mood {:>3} │ energy {:>3}",
            record.date,
            progress_bar(percent),
            percent,
            lists,
            rating(record.mood_rating),
            rating(record.energy_level)
        );
    }

    Ok(())
}
