//! Log source trait definitions

use crate::{LogSnapshot, LogTable, SourceResult};

/// Supplier of the tabular event log
pub trait LogSource: Send + Sync {
    /// Fetch the current table
    fn fetch(&self) -> SourceResult<LogTable>;

    /// Human-readable description for logs
    fn describe(&self) -> String;

    /// Fetch and validate into a typed snapshot
    fn snapshot(&self) -> SourceResult<LogSnapshot> {
        let table = self.fetch()?;
        Ok(LogSnapshot::ingest(&table)?)
    }
}

impl<S: LogSource + ?Sized> LogSource for Box<S> {
    fn fetch(&self) -> SourceResult<LogTable> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
