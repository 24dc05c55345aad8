//! SQLite-backed event log

use carlog_util::format_log_date;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::table::*;
use crate::{EventRecord, LogSource, LogTable, SourceError, SourceResult};

/// Table column paired with the spreadsheet header it is exported as
const EXPORT_COLUMNS: &[(&str, &str)] = &[
    ("car", COL_CAR),
    ("record_type", COL_RECORD_TYPE),
    ("date", COL_DATE),
    ("odometer", COL_ODOMETER),
    ("maintenance", COL_MAINTENANCE_TYPES),
    ("address", COL_ADDRESS),
    ("fuel_brand", COL_FUEL_BRAND),
    ("octane", COL_OCTANE),
    ("total_price_cents", COL_TOTAL_PRICE_CENTS),
    ("gallons", COL_GALLONS),
    ("receipt_match", COL_RECEIPT_MATCH),
    ("price_per_gallon", COL_PRICE_PER_GALLON),
];

/// Event log stored in SQLite. Rows are append-only.
pub struct SqliteLogSource {
    conn: Mutex<Connection>,
    location: String,
}

impl SqliteLogSource {
    /// Open or create a log at the given path
    pub fn open(path: impl AsRef<Path>) -> SourceResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        let source = Self {
            conn: Mutex::new(conn),
            location: path.display().to_string(),
        };
        source.init_schema()?;
        Ok(source)
    }

    /// Create an in-memory log (for testing)
    pub fn in_memory() -> SourceResult<Self> {
        let conn = Connection::open_in_memory()?;
        let source = Self {
            conn: Mutex::new(conn),
            location: ":memory:".to_string(),
        };
        source.init_schema()?;
        Ok(source)
    }

    fn lock(&self) -> SourceResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            warn!("Event log lock poisoned");
            SourceError::LockPoisoned
        })
    }

    fn init_schema(&self) -> SourceResult<()> {
        let conn = self.lock()?;

        conn.execute_batch(
            r#"
            -- Event log (append-only)
            CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                car TEXT NOT NULL,
                record_type TEXT NOT NULL,
                date TEXT NOT NULL,
                odometer REAL,
                maintenance TEXT NOT NULL DEFAULT '',
                address TEXT,
                fuel_brand TEXT,
                octane TEXT,
                total_price_cents REAL,
                gallons REAL,
                receipt_match TEXT,
                price_per_gallon REAL
            );

            CREATE INDEX IF NOT EXISTS idx_events_car ON events(car);
            "#,
        )?;

        debug!("Event log schema initialized");
        Ok(())
    }

    /// Append a record; the record's row number is ignored
    pub fn append(&self, record: &EventRecord) -> SourceResult<i64> {
        let conn = self.lock()?;

        conn.execute(
            r#"
            INSERT INTO events (
                car, record_type, date, odometer, maintenance, address, fuel_brand,
                octane, total_price_cents, gallons, receipt_match, price_per_gallon
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                record.car.as_str(),
                record.record_type.as_str(),
                format_log_date(record.date),
                record.odometer,
                record.maintenance_types.join(", "),
                record.fuel.address,
                record.fuel.brand,
                record.fuel.octane,
                record.fuel.total_price_cents,
                record.fuel.gallons,
                record
                    .fuel
                    .receipt_matches
                    .map(|m| if m { "Yes" } else { "No" }),
                record.fuel.price_per_gallon,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(event_id = id, car = %record.car, "Event appended");
        Ok(id)
    }

    /// Number of stored events
    pub fn count(&self) -> SourceResult<usize> {
        let conn = self.lock()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// Check if the database answers queries
    pub fn is_healthy(&self) -> bool {
        match self.lock() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(_) => false,
        }
    }
}

/// Render a SQLite value as a spreadsheet cell
fn value_to_cell(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => String::from_utf8_lossy(b).into_owned(),
    }
}

impl LogSource for SqliteLogSource {
    fn fetch(&self) -> SourceResult<LogTable> {
        let conn = self.lock()?;

        let select: Vec<&str> = EXPORT_COLUMNS.iter().map(|(col, _)| *col).collect();
        let sql = format!("SELECT {} FROM events ORDER BY id", select.join(", "));
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt.query_map([], |row| {
            (0..EXPORT_COLUMNS.len())
                .map(|i| row.get_ref(i).map(value_to_cell))
                .collect::<Result<Vec<String>, _>>()
        })?;

        let mut table = LogTable::new(
            EXPORT_COLUMNS
                .iter()
                .map(|(_, header)| header.to_string())
                .collect(),
        );
        for row in rows {
            table.push_row(row?);
        }

        debug!(rows = table.len(), "SQLite event log read");
        Ok(table)
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.location)
    }
}
