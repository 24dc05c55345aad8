//! Typed event records and the ingested log snapshot

use carlog_api::RecordType;
use carlog_util::{parse_log_date, CarId, CarlogError, CarlogResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::table::*;

/// Fuel-record fields; empty for other record types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelDetails {
    pub address: Option<String>,
    pub brand: Option<String>,
    pub octane: Option<String>,
    pub total_price_cents: Option<f64>,
    pub gallons: Option<f64>,
    pub receipt_matches: Option<bool>,
    pub price_per_gallon: Option<f64>,
}

/// One validated row of the event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Spreadsheet row number (the header is row 1)
    pub row: usize,
    pub car: CarId,
    pub record_type: RecordType,
    pub date: NaiveDate,
    pub odometer: Option<f64>,
    /// Individual maintenance names from the comma-separated field
    pub maintenance_types: Vec<String>,
    pub fuel: FuelDetails,
}

impl EventRecord {
    pub fn is_maintenance(&self) -> bool {
        self.record_type == RecordType::Maintenance
    }

    pub fn is_fuel(&self) -> bool {
        self.record_type == RecordType::Fuel
    }

}

/// Split the free-text maintenance field on commas.
///
/// Pieces are trimmed and empty pieces dropped. Some catalog names contain
/// commas themselves, so adjacent pieces must be rejoined against the
/// catalog before lookup; order and repeats are preserved for that.
pub fn split_maintenance_types(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolved column positions of a table
struct Columns {
    car: usize,
    record_type: usize,
    date: usize,
    maintenance_types: usize,
    odometer: Option<usize>,
    odometer_reading: Option<usize>,
    address: Option<usize>,
    brand: Option<usize>,
    octane: Option<usize>,
    total_price_cents: Option<usize>,
    gallons: Option<usize>,
    receipt_match: Option<usize>,
    price_per_gallon: Option<usize>,
}

impl Columns {
    fn resolve(table: &LogTable) -> CarlogResult<Self> {
        let required = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| CarlogError::missing_field(name))
        };

        let columns = Self {
            car: required(COL_CAR)?,
            record_type: required(COL_RECORD_TYPE)?,
            date: required(COL_DATE)?,
            maintenance_types: required(COL_MAINTENANCE_TYPES)?,
            odometer: table.column_index(COL_ODOMETER),
            odometer_reading: table.column_index(COL_ODOMETER_READING),
            address: table
                .column_index(COL_ADDRESS)
                .or_else(|| table.column_index("Address")),
            brand: table.column_index(COL_FUEL_BRAND),
            octane: table.column_index(COL_OCTANE),
            total_price_cents: table.column_index(COL_TOTAL_PRICE_CENTS),
            gallons: table.column_index(COL_GALLONS),
            receipt_match: table.column_index(COL_RECEIPT_MATCH),
            price_per_gallon: table.column_index(COL_PRICE_PER_GALLON),
        };

        if columns.odometer.is_none() && columns.odometer_reading.is_none() {
            return Err(CarlogError::missing_field(format!(
                "{} or {}",
                COL_ODOMETER, COL_ODOMETER_READING
            )));
        }

        Ok(columns)
    }
}

/// Cell accessor for one row, tolerating rows shorter than the header
struct RowCells<'a> {
    row_number: usize,
    cells: &'a [String],
    table: &'a LogTable,
}

impl<'a> RowCells<'a> {
    fn get(&self, index: usize) -> &'a str {
        self.cells.get(index).map(|c| c.trim()).unwrap_or("")
    }

    fn optional(&self, index: Option<usize>) -> Option<&'a str> {
        index.map(|i| self.get(i)).filter(|c| !c.is_empty())
    }

    fn column_name(&self, index: usize) -> String {
        self.table.columns.get(index).cloned().unwrap_or_default()
    }

    fn number(&self, index: Option<usize>) -> CarlogResult<Option<f64>> {
        let Some(i) = index else {
            return Ok(None);
        };
        let raw = self.get(i);
        if raw.is_empty() {
            return Ok(None);
        }
        let cleaned: String = raw.chars().filter(|c| *c != ',' && *c != '$').collect();
        cleaned
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| {
                CarlogError::data_format(self.row_number, self.column_name(i), raw, "expected a number")
            })
    }

    fn text(&self, index: Option<usize>) -> Option<String> {
        self.optional(index).map(str::to_string)
    }

    fn flag(&self, index: Option<usize>) -> Option<bool> {
        self.optional(index)
            .and_then(|v| match v.to_lowercase().as_str() {
                "yes" | "true" | "y" => Some(true),
                "no" | "false" | "n" => Some(false),
                _ => None,
            })
    }

    fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

/// Immutable, validated copy of the event log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogSnapshot {
    records: Vec<EventRecord>,
}

impl LogSnapshot {
    /// Validate a raw table into typed records.
    ///
    /// Fails with `MissingField` before looking at any row if a required
    /// column is absent, and with `DataFormat` for the first bad cell.
    pub fn ingest(table: &LogTable) -> CarlogResult<Self> {
        let columns = Columns::resolve(table)?;
        let mut records = Vec::with_capacity(table.rows.len());

        for (index, cells) in table.rows.iter().enumerate() {
            let cells = RowCells {
                row_number: index + 2,
                cells,
                table,
            };
            if cells.is_blank() {
                continue;
            }
            records.push(ingest_row(&cells, &columns)?);
        }

        debug!(
            rows = table.rows.len(),
            records = records.len(),
            "Event log ingested"
        );

        Ok(Self { records })
    }

    pub fn from_records(records: Vec<EventRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct cars across all record types, sorted
    pub fn cars(&self) -> Vec<CarId> {
        self.records
            .iter()
            .map(|r| r.car.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Maintenance records of one car, in log order
    pub fn maintenance_records<'a>(
        &'a self,
        car: &'a CarId,
    ) -> impl Iterator<Item = &'a EventRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| &r.car == car && r.is_maintenance())
    }

    /// Fuel records of the given cars, in log order
    pub fn fuel_records<'a>(
        &'a self,
        cars: &'a [CarId],
    ) -> impl Iterator<Item = &'a EventRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.is_fuel() && cars.contains(&r.car))
    }
}

fn ingest_row(cells: &RowCells<'_>, columns: &Columns) -> CarlogResult<EventRecord> {
    let row = cells.row_number;

    let car = cells.get(columns.car);
    if car.is_empty() {
        return Err(CarlogError::data_format(row, COL_CAR, car, "car is empty"));
    }

    let raw_date = cells.get(columns.date);
    let date = parse_log_date(raw_date).ok_or_else(|| {
        CarlogError::data_format(row, COL_DATE, raw_date, "expected a YYYY-MM-DD date")
    })?;

    // Maintenance rows fill `Odometer`, fuel rows `Odometer reading`
    let odometer = match cells.number(columns.odometer)? {
        Some(value) => Some(value),
        None => cells.number(columns.odometer_reading)?,
    };

    let fuel = FuelDetails {
        address: cells.text(columns.address),
        brand: cells.text(columns.brand),
        octane: cells.text(columns.octane),
        total_price_cents: cells.number(columns.total_price_cents)?,
        gallons: cells.number(columns.gallons)?,
        receipt_matches: cells.flag(columns.receipt_match),
        price_per_gallon: cells.number(columns.price_per_gallon)?,
    };

    Ok(EventRecord {
        row,
        car: CarId::new(car),
        record_type: RecordType::parse(cells.get(columns.record_type)),
        date,
        odometer,
        maintenance_types: split_maintenance_types(cells.get(columns.maintenance_types)),
        fuel,
    })
}
