//! In-memory log source

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::{LogSource, LogTable, SourceError, SourceResult};

/// Log source holding a table in memory. Counts fetches, which makes it
/// useful for exercising caches.
#[derive(Debug, Default)]
pub struct MemorySource {
    table: Mutex<LogTable>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new(table: LogTable) -> Self {
        Self {
            table: Mutex::new(table),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Replace the table, as if the upstream sheet had changed
    pub fn replace(&self, table: LogTable) -> SourceResult<()> {
        let mut current = self.table.lock().map_err(|_| SourceError::LockPoisoned)?;
        *current = table;
        Ok(())
    }

    /// Number of times `fetch` has been called
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl LogSource for MemorySource {
    fn fetch(&self) -> SourceResult<LogTable> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let table = self.table.lock().map_err(|_| SourceError::LockPoisoned)?;
        Ok(table.clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{COL_CAR, COL_DATE};

    #[test]
    fn test_fetch_counts_and_replace() {
        let source = MemorySource::new(LogTable::from_rows(&[COL_CAR], &[&["Civic"]]));
        assert_eq!(source.fetch().unwrap().len(), 1);

        source
            .replace(LogTable::from_rows(&[COL_CAR, COL_DATE], &[]))
            .unwrap();
        let table = source.fetch().unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns.len(), 2);
        assert_eq!(source.fetch_count(), 2);
    }
}
