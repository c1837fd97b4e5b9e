//! Daily routine handlers
//!
//! Writes go straight to the database. Cached insights for the month are
//! left alone and age out on their TTL, or can be dropped through the
//! insights invalidate endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, SuccessResponse};
use cadence_core::insights::completion_percent;
use cadence_core::models::{DailyRecord, DailyTask, Period};

/// Query parameters for listing routines
#[derive(Debug, Deserialize)]
pub struct RoutineQuery {
    /// Month to list (YYYY-MM, defaults to the current month)
    pub period: Option<String>,
}

/// Request body for writing one day's routine; the date comes from the path
#[derive(Debug, Deserialize)]
pub struct RoutineRequest {
    #[serde(default)]
    pub morning: Vec<DailyTask>,
    #[serde(default)]
    pub health: Vec<DailyTask>,
    #[serde(default)]
    pub night: Vec<DailyTask>,
    pub mood_rating: Option<f64>,
    pub energy_level: Option<f64>,
}

/// A day's record with its completion percentage
#[derive(Debug, Serialize)]
pub struct RoutineDay {
    #[serde(flatten)]
    pub record: DailyRecord,
    pub completion: u32,
}

impl From<DailyRecord> for RoutineDay {
    fn from(record: DailyRecord) -> Self {
        let completion = completion_percent(&record);
        Self { record, completion }
    }
}

pub(crate) fn parse_period(raw: &str) -> Result<Period, AppError> {
    raw.parse().map_err(|e: String| AppError::bad_request(&e))
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::bad_request(&format!("Invalid date '{}' (use YYYY-MM-DD)", raw))
    })
}

/// GET /api/users/:user_id/routines - List a month of routines
pub async fn list_routines(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<RoutineQuery>,
) -> Result<Json<Vec<RoutineDay>>, AppError> {
    let period = match params.period.as_deref() {
        Some(raw) => parse_period(raw)?,
        None => Period::current(),
    };

    if state.db.get_user(&user_id)?.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    let records = state.db.list_records_for_period(&user_id, &period)?;
    Ok(Json(records.into_iter().map(RoutineDay::from).collect()))
}

/// GET /api/users/:user_id/routines/:date - Get one day's routine
pub async fn get_routine(
    State(state): State<Arc<AppState>>,
    Path((user_id, date)): Path<(String, String)>,
) -> Result<Json<RoutineDay>, AppError> {
    let date = parse_date(&date)?;
    let record = state
        .db
        .get_daily_record(&user_id, date)?
        .ok_or_else(|| AppError::not_found("Routine not found"))?;
    Ok(Json(record.into()))
}

/// PUT /api/users/:user_id/routines/:date - Create or replace one day's routine
pub async fn put_routine(
    State(state): State<Arc<AppState>>,
    Path((user_id, date)): Path<(String, String)>,
    Json(req): Json<RoutineRequest>,
) -> Result<Json<RoutineDay>, AppError> {
    let record = DailyRecord {
        date: parse_date(&date)?,
        morning: req.morning,
        health: req.health,
        night: req.night,
        mood_rating: req.mood_rating,
        energy_level: req.energy_level,
    };

    state
        .db
        .upsert_daily_record(&user_id, &record)
        .map_err(AppError::from_core)?;

    Ok(Json(record.into()))
}

/// DELETE /api/users/:user_id/routines/:date - Delete one day's routine
pub async fn delete_routine(
    State(state): State<Arc<AppState>>,
    Path((user_id, date)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, AppError> {
    let date = parse_date(&date)?;
    if !state.db.delete_daily_record(&user_id, date)? {
        return Err(AppError::not_found("Routine not found"));
    }
    Ok(Json(SuccessResponse { success: true }))
}
