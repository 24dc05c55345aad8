//! Fleet-wide grade summary

use carlog_api::{FleetGradeRow, GradeCounts, HealthReport};
use carlog_log::LogSnapshot;
use carlog_util::{CarId, CarlogResult};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::HealthEvaluator;

/// Health reports of every car in a log plus the long-form grade table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetSummary {
    /// One report per distinct car, ordered by car identifier
    pub reports: Vec<HealthReport>,
    /// (car, maintenance, grade) rows, ordered by grade
    pub rows: Vec<FleetGradeRow>,
}

impl FleetSummary {
    pub fn report(&self, car: &CarId) -> Option<&HealthReport> {
        self.reports.iter().find(|r| &r.car == car)
    }

    /// Per-car grade counts, in report order
    pub fn counts_by_car(&self) -> Vec<(CarId, GradeCounts)> {
        self.reports
            .iter()
            .map(|r| (r.car.clone(), r.grade_counts()))
            .collect()
    }

    pub fn totals(&self) -> GradeCounts {
        let mut counts = GradeCounts::default();
        for row in &self.rows {
            counts.add(row.grade);
        }
        counts
    }
}

impl HealthEvaluator {
    /// Evaluate every car that appears in the log under any record type
    pub fn fleet_summary(
        &self,
        snapshot: &LogSnapshot,
        now: NaiveDateTime,
    ) -> CarlogResult<FleetSummary> {
        let reports = snapshot
            .cars()
            .iter()
            .map(|car| self.evaluate(snapshot, car, now))
            .collect::<CarlogResult<Vec<_>>>()?;

        let order = self.policy().order;
        let mut rows: Vec<FleetGradeRow> = reports
            .iter()
            .flat_map(|report| {
                report.rows.iter().map(|status| FleetGradeRow {
                    car: report.car.clone(),
                    maintenance: status.maintenance.clone(),
                    grade: status.grade,
                })
            })
            .collect();
        rows.sort_by(|a, b| order.compare(a.grade, b.grade));

        debug!(cars = reports.len(), rows = rows.len(), "Fleet summarized");

        Ok(FleetSummary { reports, rows })
    }
}
