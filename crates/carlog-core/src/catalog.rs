//! Maintenance catalog

use carlog_api::CatalogEntry;
use carlog_util::{CarlogError, CarlogResult};
use std::collections::HashSet;
use tracing::debug;

/// Built-in maintenance types and their intervals in miles.
///
/// Names are matched verbatim against the event log, so spellings such as
/// "replancement" must stay as the intake form writes them.
const BUILTIN_CATALOG: &[(&str, u32)] = &[
    ("Head gasket inspection", 30000),
    ("Head gasket replacement", 90000),
    ("Timing belt inspection", 30000),
    ("Timing belt replacement", 90000),
    ("Tire rotation and balancing", 7500),
    ("Engine oil inspection", 1000),
    ("Engine oil and filter replacement", 5000),
    ("Engine air filter inspection", 5000),
    ("Engine air filter replancement", 15000),
    ("Spark plugs replacement", 60000),
    ("Differential fluid (front) inspection", 10000),
    ("Differential fluid (front) replacement", 30000),
    ("Differential fluid (rear) inspection", 10000),
    ("Differential fluid (rear) replacement", 30000),
    ("Brake fluid inspection", 1000),
    ("Brake fluid replacement", 12000),
    ("Power steering fluid inspection", 10000),
    ("Power steering fluid replacement", 30000),
    ("Automatic transmission fluid inspection", 10000),
    ("Automatic transmission fluid replacement", 24000),
    ("Engine coolant inspection", 10000),
    ("Engine coolant replacement", 30000),
    ("Engine coolant (high milage) replacement", 90000),
    ("Cabin air filter inspection", 7500),
    ("Cabin air filter replacement", 15000),
    ("Wheel alignment", 30000),
    ("Brake pad (front) inspection", 6000),
    ("Brake pad (front) replacement", 15000),
    ("Brake pad (rear) inspection", 6000),
    ("Brake pad (rear) replacement", 15000),
    ("Brake rotor (front) inspection", 6000),
    ("Brake rotor (front) replacement", 30000),
    ("Brake rotor (rear) inspection", 6000),
    ("Brake rotor (rear) replacement", 30000),
    ("Brake caliper (front) inspection", 6000),
    ("Brake caliper (front) replacement", 45000),
    ("Brake caliper (rear) inspection", 6000),
    ("Brake caliper (rear) replacement", 45000),
    ("Brake pin lubricated (front)", 15000),
    ("Brake pin lubricated (rear)", 15000),
    ("Drive belt inspection", 20000),
    ("Drive belt replacement", 90000),
    ("Ball joint, suspension components, and dust covers inspection", 15000),
    ("Ball joint, suspension components, and dust covers replacement", 30000),
    ("Steering linkage and boots inspection", 15000),
    ("Steering linkage and boots replacement", 30000),
    ("Engine inverter coolant inspection", 15000),
    ("Engine inverter coolant replacement", 30000),
    ("Exhaust pipes and mounting inspection", 15000),
    ("Exhaust pipes and mounting replacement", 500000),
    ("Windshield wiper blades inspection", 7500),
    ("Windshield wiper blades replacement", 15000),
    ("Tire air pressure check", 500),
    ("Tire air pressure adjustment", 500),
    ("Check for leaks poor connections", 5000),
    ("Fuel tank cap gasket inspection", 5000),
    ("Fuel tank cap gasket replacement", 100000),
    ("Tire inspection", 7500),
    ("Tire replacement", 50000),
    ("Battery inspection", 7500),
    ("Battery replacement", 48000),
];

/// Ordered set of maintenance types with unique names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// The catalog that ships with carlog
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_CATALOG
                .iter()
                .map(|(name, distance)| CatalogEntry::new(*name, *distance))
                .collect(),
        }
    }

    /// Build a catalog, rejecting empty and duplicate names
    pub fn new(entries: Vec<CatalogEntry>) -> CarlogResult<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(CarlogError::config("maintenance name cannot be empty"));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(CarlogError::config(format!(
                    "duplicate maintenance name: {}",
                    entry.name
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Replace intervals of entries with matching names and append the rest
    pub fn with_overrides(mut self, overrides: &[CatalogEntry]) -> Self {
        for over in overrides {
            match self.entries.iter_mut().find(|e| e.name == over.name) {
                Some(existing) => {
                    debug!(
                        maintenance = %over.name,
                        from = existing.interval_distance,
                        to = over.interval_distance,
                        "Catalog interval overridden"
                    );
                    existing.interval_distance = over.interval_distance;
                }
                None => {
                    debug!(maintenance = %over.name, "Catalog entry added");
                    self.entries.push(over.clone());
                }
            }
        }
        self
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Match the pieces of a split maintenance field against the catalog.
    ///
    /// At each position the longest run of pieces whose `", "`-joined text
    /// is a catalog name wins. A piece that starts no match is returned as
    /// `Err` with its text.
    pub fn resolve_listed<'a>(&'a self, pieces: &[String]) -> Vec<Result<&'a CatalogEntry, String>> {
        let mut resolved = Vec::with_capacity(pieces.len());
        let mut start = 0;
        while start < pieces.len() {
            let matched = (start + 1..=pieces.len())
                .rev()
                .find_map(|end| self.get(&pieces[start..end].join(", ")).map(|e| (end, e)));
            match matched {
                Some((end, entry)) => {
                    resolved.push(Ok(entry));
                    start = end;
                }
                None => {
                    resolved.push(Err(pieces[start].clone()));
                    start += 1;
                }
            }
        }
        resolved
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
