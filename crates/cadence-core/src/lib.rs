//! Cadence Core Library
//!
//! Shared functionality for the Cadence habit tracker:
//! - Database access and migrations (users, daily routines)
//! - Domain models for routines, tasks, and month periods
//! - Insights engine with a TTL-bounded result cache

pub mod db;
pub mod error;
pub mod insights;
pub mod models;

pub use db::Database;
pub use error::{Error, Result};
pub use insights::{InsightsConfig, InsightsResult, InsightsService, RecordSource};
pub use models::{DailyRecord, DailyTask, Period, TaskCategory, User};
