//! JSON file log source

use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{cell_to_string, LogSource, LogTable, SourceResult};

/// Accepted JSON layouts of an event-log export
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLogFile {
    /// `{ "columns": [...], "rows": [[...], ...] }`
    Columnar {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    /// `[{ "Car": ..., "Date": ... }, ...]`
    Objects(Vec<Map<String, Value>>),
}

/// Parse an event-log export from a JSON string
pub fn parse_log_json(content: &str) -> SourceResult<LogTable> {
    let raw: RawLogFile = serde_json::from_str(content)?;
    let table = match raw {
        RawLogFile::Columnar { columns, rows } => LogTable {
            columns,
            rows: rows
                .iter()
                .map(|row| row.iter().map(cell_to_string).collect())
                .collect(),
        },
        RawLogFile::Objects(objects) => LogTable::from_objects(&objects),
    };
    Ok(table)
}

/// Reads the event log from a JSON export on disk, on every fetch
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSource for JsonFileSource {
    fn fetch(&self) -> SourceResult<LogTable> {
        let content = std::fs::read_to_string(&self.path)?;
        let table = parse_log_json(&content)?;
        debug!(path = %self.path.display(), rows = table.len(), "JSON event log read");
        Ok(table)
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}
