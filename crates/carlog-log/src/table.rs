//! Raw tabular snapshot of the event log

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const COL_CAR: &str = "Car";
pub const COL_RECORD_TYPE: &str = "What type of record is this?";
pub const COL_DATE: &str = "Date";
pub const COL_ODOMETER: &str = "Odometer";
pub const COL_ODOMETER_READING: &str = "Odometer reading";
pub const COL_MAINTENANCE_TYPES: &str = "What type of maintenance?";
pub const COL_ADDRESS: &str = "Address:";
pub const COL_FUEL_BRAND: &str = "Brand of Fuel";
pub const COL_OCTANE: &str = "Octane";
pub const COL_TOTAL_PRICE_CENTS: &str = "Total Price in Cents";
pub const COL_GALLONS: &str = "Number of Gallons";
pub const COL_RECEIPT_MATCH: &str = "Does this match your recipt?";
pub const COL_PRICE_PER_GALLON: &str = "Price per gallon";

/// Header row plus string cells, one row per event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl LogTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from string slices; handy for fixtures
    pub fn from_rows(columns: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    /// Build a table from JSON objects keyed by column header. Columns are
    /// taken in first-seen order across all objects.
    pub fn from_objects(objects: &[Map<String, Value>]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for object in objects {
            for key in object.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = objects
            .iter()
            .map(|object| {
                columns
                    .iter()
                    .map(|c| object.get(c).map(cell_to_string).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Index of a column by header, ignoring surrounding whitespace
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.trim() == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render a JSON cell the way a spreadsheet export would show it
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
