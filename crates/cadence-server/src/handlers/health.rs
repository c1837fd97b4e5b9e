//! Health check handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};
use cadence_core::insights::CacheStats;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub encrypted: bool,
    pub insights_cache: CacheStats,
}

/// GET /api/health - Liveness plus insights cache counters
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, AppError> {
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        encrypted: state.db.is_encrypted()?,
        insights_cache: state.insights.cache().stats(),
    }))
}
