//! Maintenance health evaluator

use carlog_api::{CatalogEntry, Grade, GradingPolicy, HealthReport, MaintenanceStatus};
use carlog_log::{EventRecord, LogSnapshot, LogTable, COL_DATE};
use carlog_util::{
    add_months_to_month_start, days_until, format_log_date, CarId, CarlogError, CarlogResult,
};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::Catalog;

/// Computes per-car maintenance status from an event log snapshot.
///
/// Stateless between calls: every evaluation reads only its arguments.
#[derive(Debug, Clone)]
pub struct HealthEvaluator {
    catalog: Catalog,
    policy: GradingPolicy,
}

impl HealthEvaluator {
    pub fn new(catalog: Catalog, policy: GradingPolicy) -> Self {
        info!(
            catalog_entries = catalog.len(),
            good_after_days = policy.good_after_days,
            not_recorded_after_overdue_days = policy.not_recorded_after_overdue_days,
            order = policy.order.as_str(),
            "Health evaluator initialized"
        );
        Self { catalog, policy }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn policy(&self) -> &GradingPolicy {
        &self.policy
    }

    /// Evaluate one car: one row per catalog entry, sorted by grade then by
    /// days until due.
    pub fn evaluate(
        &self,
        snapshot: &LogSnapshot,
        car: &CarId,
        now: NaiveDateTime,
    ) -> CarlogResult<HealthReport> {
        let mut has_history = false;
        let mut latest: HashMap<&str, &EventRecord> = HashMap::new();

        for record in snapshot.maintenance_records(car) {
            has_history = true;
            for listed in self.catalog.resolve_listed(&record.maintenance_types) {
                let entry = match listed {
                    Ok(entry) => entry,
                    Err(name) => {
                        debug!(car = %car, row = record.row, maintenance = %name, "Maintenance not in catalog");
                        continue;
                    }
                };
                // Strictly newer only: the first row wins on equal dates
                latest
                    .entry(entry.name.as_str())
                    .and_modify(|current| {
                        if record.date > current.date {
                            *current = record;
                        }
                    })
                    .or_insert(record);
            }
        }

        let mut rows = self
            .catalog
            .entries()
            .iter()
            .map(|entry| self.status_for(entry, latest.get(entry.name.as_str()).copied(), now))
            .collect::<CarlogResult<Vec<_>>>()?;
        self.sort_rows(&mut rows);

        debug!(
            car = %car,
            has_history,
            matched = latest.len(),
            rows = rows.len(),
            "Car evaluated"
        );

        Ok(HealthReport {
            car: car.clone(),
            has_history,
            rows,
        })
    }

    /// Ingest a raw table and evaluate one car
    pub fn evaluate_table(
        &self,
        table: &LogTable,
        car: &CarId,
        now: NaiveDateTime,
    ) -> CarlogResult<HealthReport> {
        let snapshot = LogSnapshot::ingest(table)?;
        self.evaluate(&snapshot, car, now)
    }

    /// Order rows by grade (per policy), then days until due ascending.
    /// Ties keep their existing order.
    pub fn sort_rows(&self, rows: &mut [MaintenanceStatus]) {
        let order = self.policy.order;
        rows.sort_by(|a, b| {
            order
                .compare(a.grade, b.grade)
                .then(a.days_until_due.cmp(&b.days_until_due))
        });
    }

    fn status_for(
        &self,
        entry: &CatalogEntry,
        last: Option<&EventRecord>,
        now: NaiveDateTime,
    ) -> CarlogResult<MaintenanceStatus> {
        let interval_months = entry.interval_months(self.policy.distance_per_month);
        let base = last.map_or(self.policy.sentinel_date, |r| r.date);

        let next_due_date = add_months_to_month_start(base, interval_months).ok_or_else(|| {
            CarlogError::data_format(
                last.map_or(0, |r| r.row),
                COL_DATE,
                format_log_date(base),
                "next due date is out of range",
            )
        })?;
        let days_until_due = days_until(next_due_date, now);

        let grade = match last {
            Some(_) => self.policy.grade(days_until_due),
            None => Grade::NotRecorded,
        };

        Ok(MaintenanceStatus {
            maintenance: entry.name.clone(),
            interval_distance: entry.interval_distance,
            interval_months,
            last_date: last.map(|r| r.date),
            next_due_date,
            days_until_due,
            next_due_odometer: last
                .and_then(|r| r.odometer)
                .map(|odo| odo + f64::from(entry.interval_distance)),
            grade,
        })
    }
}

impl Default for HealthEvaluator {
    fn default() -> Self {
        Self::new(Catalog::builtin(), GradingPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carlog_api::GradeOrder;
    use carlog_log::*;
    use chrono::NaiveDate;

    const COLUMNS: &[&str] = &[
        COL_CAR,
        COL_RECORD_TYPE,
        COL_DATE,
        COL_ODOMETER,
        COL_MAINTENANCE_TYPES,
    ];

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn midday(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(12, 0, 0).unwrap()
    }

    fn snapshot(rows: &[&[&str]]) -> LogSnapshot {
        LogSnapshot::ingest(&LogTable::from_rows(COLUMNS, rows)).unwrap()
    }

    fn small_evaluator() -> HealthEvaluator {
        let catalog = Catalog::new(vec![
            CatalogEntry::new("Engine oil and filter replacement", 5000),
            CatalogEntry::new("Tire rotation and balancing", 7500),
            CatalogEntry::new("Engine oil inspection", 1000),
        ])
        .unwrap();
        HealthEvaluator::new(catalog, GradingPolicy::default())
    }

    #[test]
    fn test_one_row_per_catalog_entry() {
        let evaluator = HealthEvaluator::default();
        let log = snapshot(&[
            &["Civic", "Car maintenance", "2024-01-15", "42000", "Engine oil and filter replacement"],
            &["Civic", "Car maintenance", "2024-03-02", "43500", "Tire inspection, Mystery fix"],
            &["Prius", "Gas record", "2024-03-05", "", ""],
        ]);

        for car in ["Civic", "Prius", "Outback"] {
            let report = evaluator.evaluate(&log, &CarId::new(car), midday(2024, 7, 1)).unwrap();
            assert_eq!(report.rows.len(), evaluator.catalog().len());

            let mut names: Vec<&str> = report.rows.iter().map(|r| r.maintenance.as_str()).collect();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), evaluator.catalog().len());
        }
    }

    #[test]
    fn test_oil_change_example() {
        let evaluator = small_evaluator();
        let log = snapshot(&[&[
            "Civic",
            "Car maintenance",
            "2024-01-15",
            "42000",
            "Engine oil and filter replacement",
        ]]);

        let report = evaluator
            .evaluate(&log, &CarId::new("Civic"), midday(2024, 7, 1))
            .unwrap();
        let oil = report.get("Engine oil and filter replacement").unwrap();

        assert_eq!(oil.interval_months, 5);
        assert_eq!(oil.last_date, Some(date(2024, 1, 15)));
        assert_eq!(oil.next_due_date, date(2024, 6, 1));
        assert_eq!(oil.days_until_due, -31);
        assert_eq!(oil.grade, Grade::Due);
        assert_eq!(oil.next_due_odometer, Some(47000.0));
        assert!(report.has_history);
    }

    #[test]
    fn test_empty_history_is_not_recorded() {
        let evaluator = HealthEvaluator::default();
        let log = snapshot(&[&["Prius", "Gas record", "2024-03-05", "", ""]]);

        let report = evaluator
            .evaluate(&log, &CarId::new("Prius"), midday(2024, 7, 1))
            .unwrap();

        assert!(!report.has_history);
        assert_eq!(report.rows.len(), 61);
        for row in &report.rows {
            assert_eq!(row.grade, Grade::NotRecorded);
            assert_eq!(row.last_date, None);
            assert!(row.next_due_date < date(1900, 1, 1));
            assert!(row.next_due_odometer.is_none());
        }
    }

    #[test]
    fn test_never_recorded_ignores_interval() {
        // With one mile per month the sentinel would land far in the future
        let catalog = Catalog::new(vec![CatalogEntry::new("Exhaust", 500000)]).unwrap();
        let policy = GradingPolicy {
            distance_per_month: 1,
            ..Default::default()
        };
        let evaluator = HealthEvaluator::new(catalog, policy);
        let log = snapshot(&[]);

        let report = evaluator
            .evaluate(&log, &CarId::new("Civic"), midday(2024, 7, 1))
            .unwrap();
        assert!(report.rows[0].days_until_due > 90);
        assert_eq!(report.rows[0].grade, Grade::NotRecorded);
    }

    #[test]
    fn test_multi_type_record_updates_each_entry() {
        let evaluator = small_evaluator();
        let log = snapshot(&[&[
            "Civic",
            "Car maintenance",
            "2024-05-10",
            "45000",
            "Tire rotation and balancing, Engine oil inspection",
        ]]);

        let report = evaluator
            .evaluate(&log, &CarId::new("Civic"), midday(2024, 7, 1))
            .unwrap();

        let rotation = report.get("Tire rotation and balancing").unwrap();
        assert_eq!(rotation.last_date, Some(date(2024, 5, 10)));
        assert_eq!(rotation.next_due_date, date(2024, 12, 1));

        let inspection = report.get("Engine oil inspection").unwrap();
        assert_eq!(inspection.last_date, Some(date(2024, 5, 10)));
        assert_eq!(inspection.next_due_date, date(2024, 6, 1));

        let oil = report.get("Engine oil and filter replacement").unwrap();
        assert_eq!(oil.last_date, None);
        assert_eq!(oil.grade, Grade::NotRecorded);
    }

    #[test]
    fn test_most_recent_record_wins() {
        let evaluator = small_evaluator();
        let log = snapshot(&[
            &["Civic", "Car maintenance", "2024-03-01", "44000", "Engine oil inspection"],
            &["Civic", "Car maintenance", "2023-12-01", "41000", "Engine oil inspection"],
            &["Civic", "Car maintenance", "2024-03-01", "44100", "Engine oil inspection"],
            &["Prius", "Car maintenance", "2024-06-20", "9000", "Engine oil inspection"],
        ]);

        let report = evaluator
            .evaluate(&log, &CarId::new("Civic"), midday(2024, 7, 1))
            .unwrap();
        let row = report.get("Engine oil inspection").unwrap();

        assert_eq!(row.last_date, Some(date(2024, 3, 1)));
        // Earliest row among equal dates
        assert_eq!(row.next_due_odometer, Some(45000.0));
    }

    #[test]
    fn test_other_cars_and_fuel_rows_ignored() {
        let evaluator = small_evaluator();
        let log = snapshot(&[
            &["Prius", "Car maintenance", "2024-06-20", "9000", "Engine oil inspection"],
            &["Civic", "Gas record", "2024-06-20", "", "Engine oil inspection"],
        ]);

        let report = evaluator
            .evaluate(&log, &CarId::new("Civic"), midday(2024, 7, 1))
            .unwrap();
        assert!(!report.has_history);
        assert!(report.rows.iter().all(|r| r.grade == Grade::NotRecorded));
    }

    #[test]
    fn test_grade_boundaries_through_evaluation() {
        let catalog = Catalog::new(vec![CatalogEntry::new("Engine oil inspection", 1000)]).unwrap();
        let evaluator = HealthEvaluator::new(catalog, GradingPolicy::default());
        // Performed 2024-01-xx, due 2024-02-01 at midnight
        let log = snapshot(&[&["Civic", "Car maintenance", "2024-01-20", "", "Engine oil inspection"]]);
        let car = CarId::new("Civic");
        let due = date(2024, 2, 1).and_hms_opt(0, 0, 0).unwrap();

        let cases = [
            (due - chrono::Duration::days(91), 91, Grade::Good),
            (due - chrono::Duration::days(90), 90, Grade::Due),
            (due + chrono::Duration::days(50), -50, Grade::Due),
            (due + chrono::Duration::days(51), -51, Grade::NotRecorded),
        ];

        for (now, days, grade) in cases {
            let report = evaluator.evaluate(&log, &car, now).unwrap();
            assert_eq!(report.rows[0].days_until_due, days);
            assert_eq!(report.rows[0].grade, grade, "days_until_due = {days}");
        }
    }

    #[test]
    fn test_idempotent() {
        let evaluator = HealthEvaluator::default();
        let log = snapshot(&[
            &["Civic", "Car maintenance", "2024-01-15", "42000", "Engine oil and filter replacement, Battery inspection"],
            &["Civic", "Car maintenance", "2024-06-15", "46000", "Tire rotation and balancing"],
        ]);
        let car = CarId::new("Civic");
        let now = midday(2024, 7, 1);

        let first = evaluator.evaluate(&log, &car, now).unwrap();
        let second = evaluator.evaluate(&log, &car, now).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rows_sorted_by_severity_then_days() {
        let evaluator = small_evaluator();
        let log = snapshot(&[
            &["Civic", "Car maintenance", "2024-06-15", "46000", "Tire rotation and balancing"],
            &["Civic", "Car maintenance", "2024-05-20", "45500", "Engine oil inspection"],
        ]);

        let report = evaluator
            .evaluate(&log, &CarId::new("Civic"), midday(2024, 7, 1))
            .unwrap();
        let order: Vec<(&str, Grade)> = report
            .rows
            .iter()
            .map(|r| (r.maintenance.as_str(), r.grade))
            .collect();

        assert_eq!(
            order,
            [
                ("Engine oil inspection", Grade::Due),
                ("Engine oil and filter replacement", Grade::NotRecorded),
                ("Tire rotation and balancing", Grade::Good),
            ]
        );
    }

    #[test]
    fn test_alphabetical_order_puts_not_recorded_last() {
        let catalog = small_evaluator().catalog().clone();
        let evaluator = HealthEvaluator::new(
            catalog,
            GradingPolicy {
                order: GradeOrder::Alphabetical,
                ..Default::default()
            },
        );
        let log = snapshot(&[
            &["Civic", "Car maintenance", "2024-06-15", "46000", "Tire rotation and balancing"],
            &["Civic", "Car maintenance", "2024-05-20", "45500", "Engine oil inspection"],
        ]);

        let report = evaluator
            .evaluate(&log, &CarId::new("Civic"), midday(2024, 7, 1))
            .unwrap();
        let grades: Vec<Grade> = report.rows.iter().map(|r| r.grade).collect();
        assert_eq!(grades, [Grade::Due, Grade::Good, Grade::NotRecorded]);
    }

    #[test]
    fn test_evaluate_table_surfaces_ingest_errors() {
        let evaluator = HealthEvaluator::default();
        let car = CarId::new("Civic");
        let now = midday(2024, 7, 1);

        let missing = LogTable::from_rows(&[COL_CAR, COL_DATE], &[]);
        assert!(matches!(
            evaluator.evaluate_table(&missing, &car, now),
            Err(CarlogError::MissingField(_))
        ));

        let bad_date = LogTable::from_rows(
            COLUMNS,
            &[&["Civic", "Car maintenance", "July 1st", "", "Engine oil inspection"]],
        );
        assert!(matches!(
            evaluator.evaluate_table(&bad_date, &car, now),
            Err(CarlogError::DataFormat { .. })
        ));
    }

    #[test]
    fn test_names_containing_commas_are_credited() {
        let evaluator = HealthEvaluator::default();
        let log = snapshot(&[&[
            "Civic",
            "Car maintenance",
            "2024-06-15",
            "46000",
            "Ball joint, suspension components, and dust covers inspection, Battery inspection",
        ]]);

        let report = evaluator
            .evaluate(&log, &CarId::new("Civic"), midday(2024, 7, 1))
            .unwrap();

        let ball_joint = report
            .get("Ball joint, suspension components, and dust covers inspection")
            .unwrap();
        assert_eq!(ball_joint.last_date, Some(date(2024, 6, 15)));
        assert_eq!(ball_joint.next_due_date, date(2025, 9, 1));
        assert_eq!(ball_joint.grade, Grade::Good);

        let battery = report.get("Battery inspection").unwrap();
        assert_eq!(battery.last_date, Some(date(2024, 6, 15)));

        let replacement = report
            .get("Ball joint, suspension components, and dust covers replacement")
            .unwrap();
        assert_eq!(replacement.grade, Grade::NotRecorded);
    }
}
