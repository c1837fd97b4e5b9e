//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use cadence_core::db::Database;
use cadence_core::insights::{engine, InsightsConfig};
use cadence_core::models::{Period, TaskCategory};
use chrono::NaiveDate;

use crate::commands;

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn january() -> Period {
    "2024-01".parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// ========== Task Argument Tests ==========

#[test]
fn test_parse_task_arg_pending() {
    let task = commands::parse_task_arg("stretch:Stretch 10 minutes").unwrap();
    assert_eq!(task.id, "stretch");
    assert_eq!(task.text, "Stretch 10 minutes");
    assert!(!task.completed);
}

#[test]
fn test_parse_task_arg_done() {
    let task = commands::parse_task_arg("lights-out:Lights out by 10:30:done").unwrap();
    assert_eq!(task.id, "lights-out");
    assert_eq!(task.text, "Lights out by 10:30");
    assert!(task.completed);
}

#[test]
fn test_parse_task_arg_keeps_colons_in_text() {
    let task = commands::parse_task_arg("wake:Wake at 6:30").unwrap();
    assert_eq!(task.text, "Wake at 6:30");
    assert!(!task.completed);
}

#[test]
fn test_parse_task_arg_invalid() {
    assert!(commands::parse_task_arg("no-text").is_err());
    assert!(commands::parse_task_arg(":Missing id").is_err());
    assert!(commands::parse_task_arg("id:").is_err());
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_resolve_period() {
    assert_eq!(commands::resolve_period(Some("2024-01")).unwrap(), january());
    assert!(commands::resolve_period(Some("2024-1")).is_err());
    assert_eq!(commands::resolve_period(None).unwrap(), Period::current());
}

#[test]
fn test_resolve_date() {
    assert_eq!(
        commands::resolve_date(Some("2024-01-15")).unwrap(),
        date("2024-01-15")
    );
    assert!(commands::resolve_date(Some("15/01/2024")).is_err());
}

#[test]
fn test_default_date_falls_in_default_period() {
    let today = commands::resolve_date(None).unwrap();
    let period = commands::resolve_period(None).unwrap();
    assert!(period.contains(today));
}

#[test]
fn test_progress_bar() {
    assert_eq!(commands::progress_bar(0), "░░░░░░░░░░");
    assert_eq!(commands::progress_bar(57), "██████░░░░");
    assert_eq!(commands::progress_bar(100), "██████████");
}

// ========== Log Command Tests ==========

#[test]
fn test_cmd_log_creates_user_and_record() {
    let db = setup_test_db();
    let record = commands::build_record(
        date("2024-01-15"),
        Some(4.0),
        None,
        &["stretch:Stretch:done".to_string()],
        &["no-sugar:No added sugar".to_string()],
        &[],
    )
    .unwrap();

    commands::cmd_log(&db, "alice", &record).unwrap();

    assert!(db.get_user("alice").unwrap().is_some());
    let stored = db
        .get_daily_record("alice", date("2024-01-15"))
        .unwrap()
        .unwrap();
    assert_eq!(stored, record);
}

#[test]
fn test_cmd_log_rejects_bad_rating() {
    let db = setup_test_db();
    let record =
        commands::build_record(date("2024-01-15"), Some(7.0), None, &[], &[], &[]).unwrap();
    assert!(commands::cmd_log(&db, "alice", &record).is_err());
}

// ========== Import Command Tests ==========

#[test]
fn test_cmd_import() {
    let db = setup_test_db();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"date": "2024-01-01", "morning": [{{"id": "stretch", "text": "Stretch", "completed": true}}], "mood_rating": 4}},
            {{"date": "2024-01-02", "health": [{{"id": "no-alcohol", "text": "Skip alcohol"}}]}}
        ]"#
    )
    .unwrap();

    commands::cmd_import(&db, "bob", file.path()).unwrap();

    let records = db.list_records_for_period("bob", &january()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].mood_rating, Some(4.0));
    assert!(!records[1].health[0].completed);
}

#[test]
fn test_cmd_import_rejects_non_array() {
    let db = setup_test_db();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"date": "2024-01-01"}}"#).unwrap();

    assert!(commands::cmd_import(&db, "bob", file.path()).is_err());
}

#[test]
fn test_cmd_import_is_all_or_nothing() {
    let db = setup_test_db();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"date": "2024-01-01", "mood_rating": 4}},
            {{"date": "2024-01-02", "mood_rating": 9}}
        ]"#
    )
    .unwrap();

    assert!(commands::cmd_import(&db, "bob", file.path()).is_err());
    assert!(db.get_user("bob").unwrap().is_none());
    assert!(db
        .get_daily_record("bob", date("2024-01-01"))
        .unwrap()
        .is_none());
}

// ========== Routines / Insights Command Tests ==========

#[test]
fn test_cmd_routines() {
    let db = setup_test_db();
    let record = commands::build_record(
        date("2024-01-15"),
        None,
        None,
        &["stretch:Stretch:done".to_string()],
        &[],
        &[],
    )
    .unwrap();
    commands::cmd_log(&db, "alice", &record).unwrap();

    assert!(commands::cmd_routines(&db, "alice", &january(), None).is_ok());
    assert!(commands::cmd_routines(&db, "alice", &january(), Some(TaskCategory::Health)).is_ok());
    assert!(commands::cmd_routines(&db, "nobody", &january(), None).is_err());
}

#[test]
fn test_build_record_files_tasks_by_list() {
    let record = commands::build_record(
        date("2024-01-15"),
        None,
        None,
        &["stretch:Stretch:done".to_string(), "journal:Journal".to_string()],
        &["water:Drink water:done".to_string()],
        &["read:Read".to_string()],
    )
    .unwrap();

    assert_eq!(commands::category_counts(&record, TaskCategory::Morning), (1, 2));
    assert_eq!(commands::category_counts(&record, TaskCategory::Health), (1, 1));
    assert_eq!(commands::category_counts(&record, TaskCategory::Night), (0, 1));
}

#[test]
fn test_resolve_category() {
    assert_eq!(
        commands::resolve_category(Some("Morning")).unwrap(),
        Some(TaskCategory::Morning)
    );
    assert_eq!(
        commands::resolve_category(Some("evening")).unwrap(),
        Some(TaskCategory::Night)
    );
    assert_eq!(commands::resolve_category(None).unwrap(), None);
    assert!(commands::resolve_category(Some("lunch")).is_err());
}

#[test]
fn test_compute_report() {
    let db = setup_test_db();
    for day in ["2024-01-01", "2024-01-02"] {
        let record = commands::build_record(
            date(day),
            Some(2.0),
            Some(2.0),
            &["stretch:Stretch:done".to_string()],
            &["no-alcohol:Skip alcohol".to_string()],
            &[],
        )
        .unwrap();
        commands::cmd_log(&db, "alice", &record).unwrap();
    }

    let result =
        commands::compute_report(&db, "alice", &january(), InsightsConfig::default()).unwrap();
    assert_eq!(result.summary.completion_rate, 50);
    assert_eq!(result.summary.streak_days, 0);
    assert!(result.recommendation(engine::REDUCE_TRIGGERS).is_some());
    assert!(result.recommendation(engine::BOOST_ENERGY).is_some());

    assert!(commands::cmd_insights(&db, "alice", &january(), InsightsConfig::default(), false)
        .is_ok());
    assert!(commands::cmd_insights(&db, "alice", &january(), InsightsConfig::default(), true)
        .is_ok());
}

#[test]
fn test_compute_report_unknown_user() {
    let db = setup_test_db();
    assert!(commands::compute_report(&db, "nobody", &january(), InsightsConfig::default()).is_err());
}

#[test]
fn test_load_insights_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[thresholds]\nstreak = 75").unwrap();

    let config = commands::load_insights_config(Some(file.path())).unwrap();
    assert_eq!(config.streak_threshold, 75);
}
