//! Computed reports handed to rendering shells

use carlog_util::CarId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Grade;

/// Status of one catalog entry for one car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceStatus {
    pub maintenance: String,
    pub interval_distance: u32,
    pub interval_months: u32,
    /// None means never performed
    pub last_date: Option<NaiveDate>,
    pub next_due_date: NaiveDate,
    pub days_until_due: i64,
    /// Odometer at the last service plus the catalog distance. Informational only.
    pub next_due_odometer: Option<f64>,
    pub grade: Grade,
}

/// Maintenance health of a single car: one row per catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub car: CarId,
    /// False when the car has no maintenance records at all
    pub has_history: bool,
    pub rows: Vec<MaintenanceStatus>,
}

impl HealthReport {
    pub fn grade_counts(&self) -> GradeCounts {
        let mut counts = GradeCounts::default();
        for row in &self.rows {
            counts.add(row.grade);
        }
        counts
    }

    pub fn get(&self, maintenance: &str) -> Option<&MaintenanceStatus> {
        self.rows.iter().find(|r| r.maintenance == maintenance)
    }
}

/// Number of rows per grade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeCounts {
    pub good: usize,
    pub due: usize,
    pub not_recorded: usize,
}

impl GradeCounts {
    pub fn add(&mut self, grade: Grade) {
        match grade {
            Grade::Good => self.good += 1,
            Grade::Due => self.due += 1,
            Grade::NotRecorded => self.not_recorded += 1,
        }
    }

    pub fn get(&self, grade: Grade) -> usize {
        match grade {
            Grade::Good => self.good,
            Grade::Due => self.due,
            Grade::NotRecorded => self.not_recorded,
        }
    }

    pub fn total(&self) -> usize {
        self.good + self.due + self.not_recorded
    }
}

/// One cell of the fleet-wide long-form grade table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetGradeRow {
    pub car: CarId,
    pub maintenance: String,
    pub grade: Grade,
}

/// One fill-up in the fuel summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelRow {
    pub car: CarId,
    pub date: NaiveDate,
    pub odometer: Option<f64>,
    pub gallons: Option<f64>,
    pub price_per_gallon: Option<f64>,
    pub address: Option<String>,
    pub brand: Option<String>,
    pub octane: Option<String>,
    /// Miles per gallon since the previous fill-up in the summary
    pub mpg: Option<f64>,
}

/// Fuel statistics over a selection of cars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelSummary {
    pub cars: Vec<CarId>,
    /// Ordered by date, then odometer
    pub rows: Vec<FuelRow>,
    pub fill_ups: usize,
    pub total_gallons: f64,
    pub median_price_per_gallon: Option<f64>,
    /// Median of all rows minus the median of all rows but the last
    pub price_delta: Option<f64>,
}

impl FuelSummary {
    /// Colour hint for the price delta: rising prices are `normal`, falling `inverse`
    pub fn price_delta_color(&self) -> &'static str {
        match self.price_delta {
            Some(delta) if delta > 0.0 => "normal",
            _ => "inverse",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(name: &str, grade: Grade) -> MaintenanceStatus {
        MaintenanceStatus {
            maintenance: name.into(),
            interval_distance: 5000,
            interval_months: 5,
            last_date: None,
            next_due_date: NaiveDate::from_ymd_opt(1800, 6, 1).unwrap(),
            days_until_due: -80_000,
            next_due_odometer: None,
            grade,
        }
    }

    #[test]
    fn report_grade_counts() {
        let report = HealthReport {
            car: CarId::new("Civic"),
            has_history: true,
            rows: vec![
                status("a", Grade::Good),
                status("b", Grade::Due),
                status("c", Grade::Due),
                status("d", Grade::NotRecorded),
            ],
        };

        let counts = report.grade_counts();
        assert_eq!(counts.good, 1);
        assert_eq!(counts.get(Grade::Due), 2);
        assert_eq!(counts.not_recorded, 1);
        assert_eq!(counts.total(), 4);
        assert!(report.get("c").is_some());
        assert!(report.get("z").is_none());
    }

    #[test]
    fn report_serializes_never_as_null() {
        let report = HealthReport {
            car: CarId::new("Civic"),
            has_history: false,
            rows: vec![status("Battery inspection", Grade::NotRecorded)],
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["car"], "Civic");
        assert!(json["rows"][0]["last_date"].is_null());
        assert_eq!(json["rows"][0]["grade"], "not_recorded");
        assert_eq!(json["rows"][0]["next_due_date"], "1800-06-01");
    }

    #[test]
    fn price_delta_color() {
        let mut summary = FuelSummary {
            cars: vec![],
            rows: vec![],
            fill_ups: 0,
            total_gallons: 0.0,
            median_price_per_gallon: None,
            price_delta: Some(0.12),
        };
        assert_eq!(summary.price_delta_color(), "normal");

        summary.price_delta = Some(-0.05);
        assert_eq!(summary.price_delta_color(), "inverse");

        summary.price_delta = None;
        assert_eq!(summary.price_delta_color(), "inverse");
    }
}
