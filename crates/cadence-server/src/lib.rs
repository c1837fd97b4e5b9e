//! Cadence Web Server
//!
//! Axum-based REST API for the Cadence habit tracker.
//!
//! - Routine records are read and written straight through to the database
//! - Insights are served through a single process-wide `InsightsService`,
//!   created with the router and dropped with it
//! - Restrictive CORS policy and basic security headers
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info};

use cadence_core::db::Database;
use cadence_core::insights::{InsightsConfig, InsightsService};

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// Thresholds and cache TTL for the insights service
    pub insights: InsightsConfig,
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    /// Owns the insights cache for the life of the server
    pub insights: InsightsService,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> Self {
        let insights = InsightsService::new(config.insights.clone());
        Self {
            db,
            config,
            insights,
        }
    }
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(db: Database, static_dir: Option<&str>, config: ServerConfig) -> Router {
    let state = Arc::new(AppState::new(db, config));
    create_router_with_state(state, static_dir)
}

/// Create the router around existing state (tests inspect the cache through it)
pub fn create_router_with_state(state: Arc<AppState>, static_dir: Option<&str>) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Users
        .route("/users", get(handlers::list_users))
        .route(
            "/users/:user_id",
            get(handlers::get_user).put(handlers::upsert_user),
        )
        // Routines
        .route("/users/:user_id/routines", get(handlers::list_routines))
        .route(
            "/users/:user_id/routines/:date",
            get(handlers::get_routine)
                .put(handlers::put_routine)
                .delete(handlers::delete_routine),
        )
        // Insights
        .route(
            "/users/:user_id/insights/:period",
            get(handlers::get_insights),
        )
        .route(
            "/users/:user_id/insights/:period/invalidate",
            post(handlers::invalidate_insights),
        );

    let cors = if state.config.allowed_origins.is_empty() {
        CorsLayer::new()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    }
    .allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([header::CONTENT_TYPE]);

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    serve_with_config(db, host, port, static_dir, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(db, config));
    let app = create_router_with_state(state.clone(), static_dir);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.insights.clear();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Upstream data could not be read; distinct from an empty result
    pub fn service_unavailable(msg: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map core errors onto HTTP statuses
    pub fn from_core(err: cadence_core::Error) -> Self {
        use cadence_core::Error;

        match err {
            Error::InvalidData(msg) => Self::bad_request(&msg),
            Error::NotFound(msg) => Self::not_found(&format!("Not found: {}", msg)),
            Error::DataUnavailable(msg) => {
                Self::service_unavailable(&format!("Data unavailable: {}", msg))
            }
            other => other.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            internal: Some(err.into()),
        }
    }
}
