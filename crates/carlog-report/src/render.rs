//! Plain-text and JSON rendering of reports

use carlog_api::{FuelSummary, Grade, HealthReport};
use carlog_core::{fuel_summary, FleetSummary, HealthEvaluator};
use carlog_log::LogSnapshot;
use carlog_util::{format_log_date, CarId, CarlogResult};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::io::{self, Write};

/// What a report run prints
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Restrict the detail tables (and fuel summary) to one car
    pub car: Option<CarId>,
    /// Append the fuel summary
    pub fuel: bool,
}

/// Everything one report run computed
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub evaluated_at: NaiveDateTime,
    pub fleet: FleetSummary,
    /// Detail reports to print, in car order
    pub details: Vec<HealthReport>,
    pub fuel: Option<FuelSummary>,
}

impl Report {
    /// Evaluate a snapshot for the selected options
    pub fn build(
        evaluator: &HealthEvaluator,
        snapshot: &LogSnapshot,
        now: NaiveDateTime,
        options: &ReportOptions,
    ) -> CarlogResult<Self> {
        let fleet = evaluator.fleet_summary(snapshot, now)?;

        let details = match &options.car {
            Some(car) => match fleet.report(car) {
                Some(report) => vec![report.clone()],
                // Unknown cars still get a full NotRecorded table
                None => vec![evaluator.evaluate(snapshot, car, now)?],
            },
            None => fleet.reports.clone(),
        };

        let fuel = options.fuel.then(|| {
            let cars = match &options.car {
                Some(car) => vec![car.clone()],
                None => snapshot.cars(),
            };
            fuel_summary(snapshot, &cars)
        });

        Ok(Self {
            evaluated_at: now,
            fleet,
            details,
            fuel,
        })
    }

    pub fn write_text(&self, out: &mut impl Write) -> io::Result<()> {
        render_fleet(out, &self.fleet, self.evaluated_at)?;
        for report in &self.details {
            writeln!(out)?;
            render_health(out, report)?;
        }
        if let Some(fuel) = &self.fuel {
            writeln!(out)?;
            render_fuel(out, fuel)?;
        }
        Ok(())
    }

    pub fn write_json(&self, out: &mut impl Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}

/// Per-car grade counts
pub fn render_fleet(
    out: &mut impl Write,
    fleet: &FleetSummary,
    now: NaiveDateTime,
) -> io::Result<()> {
    writeln!(out, "Fleet maintenance as of {}", format_log_date(now.date()))?;
    if fleet.reports.is_empty() {
        return writeln!(out, "No cars found in the event log");
    }

    let width = column_width(fleet.reports.iter().map(|r| r.car.as_str()), "Car");
    writeln!(
        out,
        "{:<width$}  {:>5}  {:>5}  {:>12}",
        "Car",
        Grade::Good.label(),
        Grade::Due.label(),
        Grade::NotRecorded.label()
    )?;
    for (car, counts) in fleet.counts_by_car() {
        writeln!(
            out,
            "{:<width$}  {:>5}  {:>5}  {:>12}",
            car.as_str(),
            counts.good,
            counts.due,
            counts.not_recorded
        )?;
    }
    Ok(())
}

/// Status table for one car
pub fn render_health(out: &mut impl Write, report: &HealthReport) -> io::Result<()> {
    writeln!(out, "{}", report.car)?;
    if !report.has_history {
        writeln!(out, "No maintenance records found for {}", report.car)?;
    }

    let width = column_width(
        report.rows.iter().map(|r| r.maintenance.as_str()),
        "Maintenance",
    );
    writeln!(
        out,
        "{:<width$}  {:<12}  {:<10}  {:<10}  {:>6}  {:>12}",
        "Maintenance", "Grade", "Last", "Next due", "Days", "Next odometer"
    )?;
    for row in &report.rows {
        let last = row
            .last_date
            .map(format_log_date)
            .unwrap_or_else(|| "never".to_string());
        let odometer = row
            .next_due_odometer
            .map(|o| format!("{o:.0}"))
            .unwrap_or_default();
        writeln!(
            out,
            "{:<width$}  {:<12}  {:<10}  {:<10}  {:>6}  {:>12}",
            row.maintenance,
            row.grade.label(),
            last,
            format_log_date(row.next_due_date),
            row.days_until_due,
            odometer
        )?;
    }
    Ok(())
}

/// Fill-up table and price statistics
pub fn render_fuel(out: &mut impl Write, fuel: &FuelSummary) -> io::Result<()> {
    writeln!(out, "Fuel")?;
    writeln!(out, "Fill-ups: {}", fuel.fill_ups)?;
    writeln!(out, "Total gallons: {:.2}", fuel.total_gallons)?;
    match (fuel.median_price_per_gallon, fuel.price_delta) {
        (Some(median), Some(delta)) => writeln!(
            out,
            "Median price per gallon: {median:.3} ({delta:+.3}, {})",
            fuel.price_delta_color()
        )?,
        (Some(median), None) => writeln!(out, "Median price per gallon: {median:.3}")?,
        _ => writeln!(out, "Median price per gallon: n/a")?,
    }

    if fuel.rows.is_empty() {
        return Ok(());
    }

    let width = column_width(fuel.rows.iter().map(|r| r.car.as_str()), "Car");
    writeln!(
        out,
        "{:<width$}  {:<10}  {:>10}  {:>8}  {:>8}  {:>7}  {}",
        "Car", "Date", "Odometer", "Gallons", "Price", "MPG", "Brand"
    )?;
    for row in &fuel.rows {
        writeln!(
            out,
            "{:<width$}  {:<10}  {:>10}  {:>8}  {:>8}  {:>7}  {}",
            row.car.as_str(),
            format_log_date(row.date),
            optional(row.odometer, 1),
            optional(row.gallons, 3),
            optional(row.price_per_gallon, 3),
            optional(row.mpg, 1),
            row.brand.as_deref().unwrap_or("")
        )?;
    }
    Ok(())
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{v:.precision$}"))
        .unwrap_or_default()
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use carlog_api::MaintenanceStatus;
    use chrono::NaiveDate;

    fn text(report: &HealthReport) -> String {
        let mut out = Vec::new();
        render_health(&mut out, report).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn status(name: &str, last: Option<NaiveDate>, grade: Grade) -> MaintenanceStatus {
        MaintenanceStatus {
            maintenance: name.into(),
            interval_distance: 5000,
            interval_months: 5,
            last_date: last,
            next_due_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            days_until_due: -31,
            next_due_odometer: last.map(|_| 47000.0),
            grade,
        }
    }

    #[test]
    fn test_health_table() {
        let report = HealthReport {
            car: CarId::new("Civic"),
            has_history: true,
            rows: vec![status(
                "Engine oil and filter replacement",
                NaiveDate::from_ymd_opt(2024, 1, 15),
                Grade::Due,
            )],
        };

        let out = text(&report);
        let line = out.lines().nth(2).unwrap();
        assert!(line.starts_with("Engine oil and filter replacement  Due"));
        assert!(line.contains("2024-01-15"));
        assert!(line.contains("2024-06-01"));
        assert!(line.contains("-31"));
        assert!(line.ends_with("47000"));
        assert!(!out.contains("No maintenance records"));
    }

    #[test]
    fn test_empty_history_notice() {
        let report = HealthReport {
            car: CarId::new("Prius"),
            has_history: false,
            rows: vec![status("Battery inspection", None, Grade::NotRecorded)],
        };

        let out = text(&report);
        assert!(out.contains("No maintenance records found for Prius"));
        assert!(out.contains("Not Recorded"));
        assert!(out.contains("never"));
    }

    #[test]
    fn test_column_width() {
        assert_eq!(column_width(["ab", "abcdef"].into_iter(), "Car"), 6);
        assert_eq!(column_width(std::iter::empty(), "Car"), 3);
    }

    #[test]
    fn test_optional() {
        assert_eq!(optional(Some(3.14159), 2), "3.14");
        assert_eq!(optional(None, 2), "");
    }
}
