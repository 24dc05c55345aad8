//! Fuel fill-up summary

use carlog_api::{FuelRow, FuelSummary};
use carlog_log::LogSnapshot;
use carlog_util::CarId;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Odometer readings in the log are recorded in thousands of miles
pub const MPG_SCALE: f64 = 1000.0;

/// Summarize fill-ups of the selected cars
pub fn fuel_summary(snapshot: &LogSnapshot, cars: &[CarId]) -> FuelSummary {
    let mut records: Vec<_> = snapshot.fuel_records(cars).collect();
    records.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| compare_odometer(a.odometer, b.odometer))
    });

    let mut previous: HashMap<&CarId, Option<f64>> = HashMap::new();
    let rows: Vec<FuelRow> = records
        .into_iter()
        .map(|record| {
            let last_odometer = previous.insert(&record.car, record.odometer).flatten();
            let mpg = match (last_odometer, record.odometer, record.fuel.gallons) {
                (Some(last), Some(current), Some(gallons)) if gallons > 0.0 => {
                    Some((current - last) / gallons * MPG_SCALE)
                }
                _ => None,
            };

            FuelRow {
                car: record.car.clone(),
                date: record.date,
                odometer: record.odometer,
                gallons: record.fuel.gallons,
                price_per_gallon: record.fuel.price_per_gallon,
                address: record.fuel.address.clone(),
                brand: record.fuel.brand.clone(),
                octane: record.fuel.octane.clone(),
                mpg,
            }
        })
        .collect();

    let total_gallons: f64 = rows.iter().filter_map(|r| r.gallons).sum();
    let prices: Vec<f64> = rows.iter().filter_map(|r| r.price_per_gallon).collect();
    let median_price_per_gallon = median(&prices);
    let previous_median = prices
        .split_last()
        .and_then(|(_, earlier)| median(earlier));
    let price_delta = match (median_price_per_gallon, previous_median) {
        (Some(all), Some(earlier)) => Some(all - earlier),
        _ => None,
    };

    debug!(
        cars = cars.len(),
        fill_ups = rows.len(),
        total_gallons,
        "Fuel summarized"
    );

    FuelSummary {
        cars: cars.to_vec(),
        fill_ups: rows.len(),
        rows,
        total_gallons,
        median_price_per_gallon,
        price_delta,
    }
}

/// Missing odometers sort after present ones
fn compare_odometer(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
