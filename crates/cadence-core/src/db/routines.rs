//! Daily routine record operations
//!
//! Task lists are stored as JSON arrays, one column per category. Records
//! are keyed by `(user_id, date)` and carry their `YYYY-MM` period so a
//! month can be fetched with one indexed query.

use chrono::NaiveDate;
use rusqlite::{params, Row};
use tracing::debug;

use super::Database;
use crate::error::{Error, Result};
use crate::insights::RecordSource;
use crate::models::{DailyRecord, DailyTask, Period};

const RECORD_COLUMNS: &str =
    "date, morning_tasks, health_tasks, night_tasks, mood_rating, energy_level";

/// Decode a JSON task column, surfacing bad data as a column conversion error
fn tasks_from_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<DailyTask>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<DailyRecord> {
    let date: String = row.get(0)?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(DailyRecord {
        date,
        morning: tasks_from_column(row, 1)?,
        health: tasks_from_column(row, 2)?,
        night: tasks_from_column(row, 3)?,
        mood_rating: row.get(4)?,
        energy_level: row.get(5)?,
    })
}

impl Database {
    /// Insert or replace the record for a user's day
    ///
    /// The user must exist. Does not touch any insights cache; cached
    /// results for the month stay as they are until they expire.
    pub fn upsert_daily_record(&self, user_id: &str, record: &DailyRecord) -> Result<()> {
        record.validate().map_err(Error::InvalidData)?;
        if self.get_user(user_id)?.is_none() {
            return Err(Error::NotFound(format!("user {}", user_id)));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO daily_routines (
                user_id, date, period, morning_tasks, health_tasks, night_tasks,
                mood_rating, energy_level
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, date) DO UPDATE SET
                morning_tasks = excluded.morning_tasks,
                health_tasks = excluded.health_tasks,
                night_tasks = excluded.night_tasks,
                mood_rating = excluded.mood_rating,
                energy_level = excluded.energy_level,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![
                user_id,
                record.date.format("%Y-%m-%d").to_string(),
                record.period().to_string(),
                serde_json::to_string(&record.morning)?,
                serde_json::to_string(&record.health)?,
                serde_json::to_string(&record.night)?,
                record.mood_rating,
                record.energy_level,
            ],
        )?;

        debug!(user = user_id, date = %record.date, "Saved daily record");
        Ok(())
    }

    /// Get one day's record
    pub fn get_daily_record(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyRecord>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM daily_routines WHERE user_id = ? AND date = ?",
            RECORD_COLUMNS
        );

        match conn.query_row(
            &sql,
            params![user_id, date.format("%Y-%m-%d").to_string()],
            row_to_record,
        ) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All of a user's records in a month, oldest first
    pub fn list_records_for_period(&self, user_id: &str, period: &Period) -> Result<Vec<DailyRecord>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM daily_routines WHERE user_id = ? AND period = ? ORDER BY date",
            RECORD_COLUMNS
        );

        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![user_id, period.to_string()], row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Delete one day's record; returns whether a row was removed
    pub fn delete_daily_record(&self, user_id: &str, date: NaiveDate) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM daily_routines WHERE user_id = ? AND date = ?",
            params![user_id, date.format("%Y-%m-%d").to_string()],
        )?;
        Ok(deleted > 0)
    }
}

impl RecordSource for Database {
    fn fetch_records(&self, subject: &str, period: &Period) -> Result<Vec<DailyRecord>> {
        if self.get_user(subject)?.is_none() {
            return Err(Error::DataUnavailable(format!("unknown user {}", subject)));
        }
        self.list_records_for_period(subject, period)
    }
}
