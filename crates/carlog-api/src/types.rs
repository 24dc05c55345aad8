//! Grades, catalog entries and grading policy

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Event-log label of a maintenance record
pub const MAINTENANCE_RECORD_LABEL: &str = "Car maintenance";

/// Event-log label of a fuel record
pub const FUEL_RECORD_LABEL: &str = "Gas record";

/// Urgency classification of one maintenance task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Good,
    Due,
    NotRecorded,
}

impl Grade {
    pub const ALL: [Grade; 3] = [Grade::Good, Grade::Due, Grade::NotRecorded];

    /// Display label, as shown on the dashboard
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Due => "Due",
            Self::NotRecorded => "Not Recorded",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "good" => Some(Self::Good),
            "due" => Some(Self::Due),
            "not recorded" | "not_recorded" | "notrecorded" => Some(Self::NotRecorded),
            _ => None,
        }
    }

    /// Colour hint for a metric delta
    pub const fn delta_color(self) -> &'static str {
        match self {
            Self::Good => "normal",
            Self::Due => "inverse",
            Self::NotRecorded => "off",
        }
    }

    /// Colour used for the fleet bar chart
    pub const fn chart_color(self) -> &'static str {
        match self {
            Self::Good => "green",
            Self::Due => "red",
            Self::NotRecorded => "grey",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How status rows are ordered by grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeOrder {
    /// Due, Not Recorded, Good
    #[default]
    Severity,
    /// Alphabetical by label: Due, Good, Not Recorded
    Alphabetical,
}

impl GradeOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "severity" => Some(Self::Severity),
            "alphabetical" => Some(Self::Alphabetical),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Severity => "severity",
            Self::Alphabetical => "alphabetical",
        }
    }

    /// Sort rank of a grade; lower sorts first
    pub const fn rank(self, grade: Grade) -> u8 {
        match (self, grade) {
            (Self::Severity, Grade::Due) => 0,
            (Self::Severity, Grade::NotRecorded) => 1,
            (Self::Severity, Grade::Good) => 2,
            (Self::Alphabetical, Grade::Due) => 0,
            (Self::Alphabetical, Grade::Good) => 1,
            (Self::Alphabetical, Grade::NotRecorded) => 2,
        }
    }

    pub fn compare(self, a: Grade, b: Grade) -> Ordering {
        self.rank(a).cmp(&self.rank(b))
    }
}

/// Kind of an event-log record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Maintenance,
    Fuel,
    /// Any other label; ignored by every computation
    Other(String),
}

impl RecordType {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            MAINTENANCE_RECORD_LABEL => Self::Maintenance,
            FUEL_RECORD_LABEL => Self::Fuel,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Maintenance => MAINTENANCE_RECORD_LABEL,
            Self::Fuel => FUEL_RECORD_LABEL,
            Self::Other(label) => label,
        }
    }
}

/// One maintenance task type with its recurrence interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique name, matched verbatim against the log's maintenance field
    pub name: String,
    /// Recurrence interval in miles
    pub interval_distance: u32,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, interval_distance: u32) -> Self {
        Self {
            name: name.into(),
            interval_distance,
        }
    }

    /// Whole months between occurrences (fractional months round down)
    pub fn interval_months(&self, distance_per_month: u32) -> u32 {
        if distance_per_month == 0 {
            return 0;
        }
        self.interval_distance / distance_per_month
    }
}

/// Days past which a task is Good
pub const DEFAULT_GOOD_AFTER_DAYS: i64 = 90;

/// Days overdue past which a task counts as never recorded
pub const DEFAULT_NOT_RECORDED_AFTER_OVERDUE_DAYS: i64 = 50;

/// Miles that correspond to one month of recurrence
pub const DEFAULT_DISTANCE_PER_MONTH: u32 = 1000;

/// Placeholder last-performed date for tasks with no record
pub fn sentinel_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1800, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Parameters of the maintenance-due computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingPolicy {
    /// days_until_due strictly above this is Good
    pub good_after_days: i64,
    /// days_until_due strictly below the negation of this is NotRecorded
    pub not_recorded_after_overdue_days: i64,
    pub distance_per_month: u32,
    pub sentinel_date: NaiveDate,
    pub order: GradeOrder,
}

impl GradingPolicy {
    /// Classify a day count
    pub fn grade(&self, days_until_due: i64) -> Grade {
        if days_until_due > self.good_after_days {
            Grade::Good
        } else if days_until_due < -self.not_recorded_after_overdue_days {
            Grade::NotRecorded
        } else {
            Grade::Due
        }
    }
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            good_after_days: DEFAULT_GOOD_AFTER_DAYS,
            not_recorded_after_overdue_days: DEFAULT_NOT_RECORDED_AFTER_OVERDUE_DAYS,
            distance_per_month: DEFAULT_DISTANCE_PER_MONTH,
            sentinel_date: sentinel_date(),
            order: GradeOrder::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_boundaries() {
        let policy = GradingPolicy::default();
        assert_eq!(policy.grade(91), Grade::Good);
        assert_eq!(policy.grade(90), Grade::Due);
        assert_eq!(policy.grade(0), Grade::Due);
        assert_eq!(policy.grade(-50), Grade::Due);
        assert_eq!(policy.grade(-51), Grade::NotRecorded);
    }

    #[test]
    fn grade_custom_thresholds() {
        let policy = GradingPolicy {
            good_after_days: 30,
            not_recorded_after_overdue_days: 0,
            ..Default::default()
        };
        assert_eq!(policy.grade(31), Grade::Good);
        assert_eq!(policy.grade(30), Grade::Due);
        assert_eq!(policy.grade(0), Grade::Due);
        assert_eq!(policy.grade(-1), Grade::NotRecorded);
    }

    #[test]
    fn grade_labels_and_colors() {
        assert_eq!(Grade::NotRecorded.label(), "Not Recorded");
        assert_eq!(Grade::Good.delta_color(), "normal");
        assert_eq!(Grade::Due.delta_color(), "inverse");
        assert_eq!(Grade::NotRecorded.delta_color(), "off");
        assert_eq!(Grade::Due.chart_color(), "red");
        assert_eq!(Grade::parse("Not Recorded"), Some(Grade::NotRecorded));
        assert_eq!(Grade::parse("meh"), None);
    }

    #[test]
    fn severity_order_puts_good_last() {
        let mut grades = vec![Grade::Good, Grade::NotRecorded, Grade::Due];
        grades.sort_by(|a, b| GradeOrder::Severity.compare(*a, *b));
        assert_eq!(grades, [Grade::Due, Grade::NotRecorded, Grade::Good]);
    }

    #[test]
    fn alphabetical_order_matches_labels() {
        let mut grades = Grade::ALL.to_vec();
        grades.sort_by(|a, b| GradeOrder::Alphabetical.compare(*a, *b));

        let mut labels: Vec<&str> = Grade::ALL.iter().map(|g| g.label()).collect();
        labels.sort();
        let sorted: Vec<&str> = grades.iter().map(|g| g.label()).collect();
        assert_eq!(sorted, labels);
    }

    #[test]
    fn record_type_parse() {
        assert_eq!(RecordType::parse("Car maintenance"), RecordType::Maintenance);
        assert_eq!(RecordType::parse("Gas record "), RecordType::Fuel);
        assert_eq!(
            RecordType::parse("Car wash"),
            RecordType::Other("Car wash".into())
        );
    }

    #[test]
    fn interval_months_rounds_down() {
        assert_eq!(CatalogEntry::new("Oil", 5000).interval_months(1000), 5);
        assert_eq!(CatalogEntry::new("Rotation", 7500).interval_months(1000), 7);
        assert_eq!(CatalogEntry::new("Pressure", 500).interval_months(1000), 0);
        assert_eq!(CatalogEntry::new("Odd", 500).interval_months(0), 0);
    }

    #[test]
    fn sentinel_is_1800() {
        assert_eq!(sentinel_date(), NaiveDate::from_ymd_opt(1800, 1, 1).unwrap());
    }
}
