//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_insights_config` - Thresholds and cache TTL from file/env
//! - `resolve_date` / `resolve_period` / `resolve_category` - Argument parsing with defaults
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use cadence_core::db::Database;
use cadence_core::insights::InsightsConfig;
use cadence_core::models::{self, Period, TaskCategory};
use chrono::NaiveDate;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Load insights configuration, falling back to defaults when no file exists
pub fn load_insights_config(path: Option<&Path>) -> Result<InsightsConfig> {
    InsightsConfig::load_from(path).context("Failed to load insights config")
}

/// Parse a YYYY-MM-DD argument, defaulting to today
pub fn resolve_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", d)),
        None => Ok(models::today()),
    }
}

/// Parse a YYYY-MM argument, defaulting to the current month
pub fn resolve_period(period: Option<&str>) -> Result<Period> {
    match period {
        Some(p) => p.parse().map_err(|e: String| anyhow::anyhow!(e)),
        None => Ok(Period::current()),
    }
}

/// Parse an optional task list name (morning, health, night)
pub fn resolve_category(category: Option<&str>) -> Result<Option<TaskCategory>> {
    category
        .map(|c| c.parse().map_err(|e: String| anyhow::anyhow!(e)))
        .transpose()
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Log a day: cadence log --user me --morning \"stretch:Stretch:done\"");
    println!("  2. See the month: cadence insights --user me");
    println!("  3. Start web UI: cadence serve");

    Ok(())
}
