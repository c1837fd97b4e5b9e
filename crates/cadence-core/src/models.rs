//! Domain models for Cadence

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A person whose routines are tracked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A single checklist item within a daily routine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTask {
    /// Stable identifier (e.g., "no-alcohol", "stretch")
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl DailyTask {
    pub fn new(id: impl Into<String>, text: impl Into<String>, completed: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed,
        }
    }
}

/// Which of the three routine lists a task belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Morning,
    Health,
    Night,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Health => "health",
            Self::Night => "night",
        }
    }

    pub fn all() -> &'static [TaskCategory] {
        &[Self::Morning, Self::Health, Self::Night]
    }
}

impl std::str::FromStr for TaskCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "health" => Ok(Self::Health),
            "night" | "evening" => Ok(Self::Night),
            _ => Err(format!("Unknown task category: {}", s)),
        }
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One day of a user's routine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub morning: Vec<DailyTask>,
    #[serde(default)]
    pub health: Vec<DailyTask>,
    #[serde(default)]
    pub night: Vec<DailyTask>,
    /// Self-reported mood, 1-5
    #[serde(default)]
    pub mood_rating: Option<f64>,
    /// Self-reported energy, 1-5
    #[serde(default)]
    pub energy_level: Option<f64>,
}

impl DailyRecord {
    /// An empty record for the given day
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            morning: Vec::new(),
            health: Vec::new(),
            night: Vec::new(),
            mood_rating: None,
            energy_level: None,
        }
    }

    pub fn tasks(&self, category: TaskCategory) -> &[DailyTask] {
        match category {
            TaskCategory::Morning => &self.morning,
            TaskCategory::Health => &self.health,
            TaskCategory::Night => &self.night,
        }
    }

    pub fn tasks_mut(&mut self, category: TaskCategory) -> &mut Vec<DailyTask> {
        match category {
            TaskCategory::Morning => &mut self.morning,
            TaskCategory::Health => &mut self.health,
            TaskCategory::Night => &mut self.night,
        }
    }

    /// All tasks from the three lists, in morning/health/night order
    pub fn all_tasks(&self) -> impl Iterator<Item = &DailyTask> {
        TaskCategory::all()
            .iter()
            .flat_map(move |category| self.tasks(*category))
    }

    /// The month this record is filed under
    pub fn period(&self) -> Period {
        Period::from_date(self.date)
    }

    /// Check ratings are within the 1-5 scale
    ///
    /// Called at ingestion (HTTP, CLI, JSON import); the insights engine
    /// assumes records have already passed through here.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, value) in [("mood_rating", self.mood_rating), ("energy_level", self.energy_level)] {
            if let Some(v) = value {
                if !v.is_finite() || !(1.0..=5.0).contains(&v) {
                    return Err(format!("{} must be between 1 and 5, got {}", name, v));
                }
            }
        }
        for task in self.all_tasks() {
            if task.id.trim().is_empty() {
                return Err("task id must not be empty".to_string());
            }
        }
        Ok(())
    }
}

/// The local calendar date; every "today" and "this month" default uses it
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A calendar month, written `YYYY-MM`
///
/// Routine records are retrieved and insights are cached per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing `today()`
    pub fn current() -> Self {
        Self::from_date(today())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        let (y, m) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(y, m, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or_default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let err = || format!("Invalid period '{}' (use YYYY-MM)", s);

        let (year, month) = s.split_once('-').ok_or_else(err)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(err());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;
        Self::new(year, month).ok_or_else(err)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for Period {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_period_parse() {
        let p: Period = "2024-02".parse().unwrap();
        assert_eq!(p.year(), 2024);
        assert_eq!(p.month(), 2);
        assert_eq!(p.to_string(), "2024-02");
    }

    #[test]
    fn test_period_rejects_bad_formats() {
        for bad in ["2024-1", "2024-13", "2024-00", "2024-01-05", "24-01", "abcd-ef", ""] {
            assert!(bad.parse::<Period>().is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn test_period_bounds() {
        let feb: Period = "2024-02".parse().unwrap();
        assert_eq!(feb.first_day(), date("2024-02-01"));
        assert_eq!(feb.last_day(), date("2024-02-29"));

        let dec: Period = "2023-12".parse().unwrap();
        assert_eq!(dec.last_day(), date("2023-12-31"));
        assert!(dec.contains(date("2023-12-15")));
        assert!(!dec.contains(date("2024-12-15")));
    }

    #[test]
    fn test_period_serde_as_string() {
        let p: Period = "2024-07".parse().unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"2024-07\"");

        let back: Period = serde_json::from_str("\"2024-07\"").unwrap();
        assert_eq!(back, p);
        assert!(serde_json::from_str::<Period>("\"2024-7\"").is_err());
    }

    #[test]
    fn test_record_deserializes_with_defaults() {
        let record: DailyRecord =
            serde_json::from_str(r#"{"date": "2024-03-01", "health": [{"id": "water", "text": "Drink water"}]}"#)
                .unwrap();
        assert!(record.morning.is_empty());
        assert_eq!(record.health.len(), 1);
        assert!(!record.health[0].completed);
        assert!(record.mood_rating.is_none());
        assert_eq!(record.period().to_string(), "2024-03");
    }

    #[test]
    fn test_record_validate_ratings() {
        let mut record = DailyRecord::new(date("2024-03-01"));
        record.mood_rating = Some(4.5);
        assert!(record.validate().is_ok());

        record.energy_level = Some(7.0);
        assert!(record.validate().is_err());

        record.energy_level = Some(f64::NAN);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_all_tasks_order() {
        let mut record = DailyRecord::new(date("2024-03-01"));
        record.night.push(DailyTask::new("read", "Read", false));
        record.morning.push(DailyTask::new("stretch", "Stretch", true));
        record.health.push(DailyTask::new("water", "Water", true));

        let ids: Vec<_> = record.all_tasks().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["stretch", "water", "read"]);
    }

    #[test]
    fn test_current_period_contains_today() {
        assert!(Period::current().contains(today()));
    }

    #[test]
    fn test_task_category_from_str() {
        assert_eq!("Health".parse::<TaskCategory>().unwrap(), TaskCategory::Health);
        assert_eq!("evening".parse::<TaskCategory>().unwrap(), TaskCategory::Night);
        assert!("lunch".parse::<TaskCategory>().is_err());
    }
}
