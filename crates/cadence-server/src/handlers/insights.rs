//! Insight handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use super::routines::parse_period;
use crate::{AppError, AppState};
use cadence_core::insights::ServedInsights;

/// Response for cache invalidation
#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    /// Whether a cached result existed
    pub invalidated: bool,
}

/// GET /api/users/:user_id/insights/:period - Monthly summary and recommendations
///
/// Served from the cache when a fresh entry exists, otherwise computed from
/// the stored routines and cached. The `source` field says which.
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Path((user_id, period)): Path<(String, String)>,
) -> Result<Json<ServedInsights>, AppError> {
    let period = parse_period(&period)?;

    let served = state
        .insights
        .get_or_compute(&state.db, &user_id, &period)
        .map_err(AppError::from_core)?;

    Ok(Json(served))
}

/// POST /api/users/:user_id/insights/:period/invalidate - Drop the cached result
pub async fn invalidate_insights(
    State(state): State<Arc<AppState>>,
    Path((user_id, period)): Path<(String, String)>,
) -> Result<Json<InvalidateResponse>, AppError> {
    let period = parse_period(&period)?;
    let invalidated = state.insights.invalidate(&user_id, &period);
    Ok(Json(InvalidateResponse { invalidated }))
}
