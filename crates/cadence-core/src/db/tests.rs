//! Database tests

use super::*;
use crate::insights::RecordSource;
use crate::models::*;
use chrono::NaiveDate;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn setup_db() -> Database {
    let db = Database::in_memory().unwrap();
    db.upsert_user("alice", Some("Alice")).unwrap();
    db
}

fn sample_record(d: &str) -> DailyRecord {
    let mut record = DailyRecord::new(date(d));
    record.morning.push(DailyTask::new("stretch", "Stretch", true));
    record.health.push(DailyTask::new("no-alcohol", "Skip alcohol", false));
    record.night.push(DailyTask::new("read", "Read 10 pages", true));
    record.mood_rating = Some(4.0);
    record
}

#[test]
fn test_in_memory_db() {
    let db = Database::in_memory().unwrap();
    assert!(db.list_users().unwrap().is_empty());
}

#[test]
fn test_user_upsert_keeps_name_when_none() {
    let db = setup_db();

    let user = db.upsert_user("alice", None).unwrap();
    assert_eq!(user.display_name.as_deref(), Some("Alice"));

    let user = db.upsert_user("alice", Some("Al")).unwrap();
    assert_eq!(user.display_name.as_deref(), Some("Al"));
    assert_eq!(db.list_users().unwrap().len(), 1);
}

#[test]
fn test_user_id_required() {
    let db = setup_db();
    assert!(matches!(
        db.upsert_user("  ", None),
        Err(Error::InvalidData(_))
    ));
}

#[test]
fn test_record_roundtrip() {
    let db = setup_db();
    let record = sample_record("2024-01-15");
    db.upsert_daily_record("alice", &record).unwrap();

    let loaded = db
        .get_daily_record("alice", date("2024-01-15"))
        .unwrap()
        .unwrap();
    assert_eq!(loaded, record);
    assert!(db
        .get_daily_record("alice", date("2024-01-16"))
        .unwrap()
        .is_none());
}

#[test]
fn test_record_upsert_replaces() {
    let db = setup_db();
    let mut record = sample_record("2024-01-15");
    db.upsert_daily_record("alice", &record).unwrap();

    record.health[0].completed = true;
    record.mood_rating = None;
    record.energy_level = Some(2.5);
    db.upsert_daily_record("alice", &record).unwrap();

    let loaded = db
        .get_daily_record("alice", date("2024-01-15"))
        .unwrap()
        .unwrap();
    assert!(loaded.health[0].completed);
    assert!(loaded.mood_rating.is_none());
    assert_eq!(loaded.energy_level, Some(2.5));
}

#[test]
fn test_record_requires_known_user() {
    let db = setup_db();
    let result = db.upsert_daily_record("bob", &sample_record("2024-01-15"));
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn test_record_rejects_out_of_range_rating() {
    let db = setup_db();
    let mut record = sample_record("2024-01-15");
    record.mood_rating = Some(0.0);
    assert!(matches!(
        db.upsert_daily_record("alice", &record),
        Err(Error::InvalidData(_))
    ));
}

#[test]
fn test_list_records_for_period_filters_and_orders() {
    let db = setup_db();
    db.upsert_user("bob", None).unwrap();

    for d in ["2024-01-20", "2024-01-03", "2024-02-01", "2023-12-31"] {
        db.upsert_daily_record("alice", &sample_record(d)).unwrap();
    }
    db.upsert_daily_record("bob", &sample_record("2024-01-10"))
        .unwrap();

    let january: Period = "2024-01".parse().unwrap();
    let records = db.list_records_for_period("alice", &january).unwrap();
    let dates: Vec<_> = records.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![date("2024-01-03"), date("2024-01-20")]);
}

#[test]
fn test_delete_record() {
    let db = setup_db();
    db.upsert_daily_record("alice", &sample_record("2024-01-15"))
        .unwrap();

    assert!(db.delete_daily_record("alice", date("2024-01-15")).unwrap());
    assert!(!db.delete_daily_record("alice", date("2024-01-15")).unwrap());
}

#[test]
fn test_record_source_empty_month_is_ok() {
    let db = setup_db();
    let records = db
        .fetch_records("alice", &"2024-03".parse().unwrap())
        .unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_record_source_unknown_user_is_unavailable() {
    let db = setup_db();
    let result = db.fetch_records("nobody", &"2024-03".parse().unwrap());
    assert!(matches!(result, Err(Error::DataUnavailable(_))));
}

#[test]
fn test_corrupt_task_column_is_an_error() {
    let db = setup_db();
    db.upsert_daily_record("alice", &sample_record("2024-01-15"))
        .unwrap();
    db.conn()
        .unwrap()
        .execute(
            "UPDATE daily_routines SET morning_tasks = 'not json' WHERE user_id = 'alice'",
            [],
        )
        .unwrap();

    assert!(db.get_daily_record("alice", date("2024-01-15")).is_err());
}

#[test]
fn test_user_lookup_failure_is_not_missing_user() {
    let db = setup_db();
    db.conn()
        .unwrap()
        .execute_batch("DROP TABLE daily_routines; DROP TABLE users;")
        .unwrap();

    assert!(matches!(db.get_user("alice"), Err(Error::Database(_))));
    assert!(matches!(
        db.upsert_daily_record("alice", &sample_record("2024-01-15")),
        Err(Error::Database(_))
    ));
}
