//! User handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use cadence_core::models::User;

/// Request body for creating or renaming a user
#[derive(Debug, Default, Deserialize)]
pub struct UpsertUserRequest {
    pub display_name: Option<String>,
}

/// GET /api/users - List all users
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.db.list_users()?;
    Ok(Json(users))
}

/// GET /api/users/:user_id - Get a single user
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = state
        .db
        .get_user(&user_id)?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(user))
}

/// PUT /api/users/:user_id - Create a user or update its display name
pub async fn upsert_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<UpsertUserRequest>,
) -> Result<Json<User>, AppError> {
    let user = state
        .db
        .upsert_user(&user_id, req.display_name.as_deref())
        .map_err(AppError::from_core)?;
    Ok(Json(user))
}
