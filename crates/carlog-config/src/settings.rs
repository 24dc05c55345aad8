//! Validated settings structures

use crate::schema::{RawConfig, RawGrading, RawSourceConfig};
use carlog_api::{CatalogEntry, GradeOrder, GradingPolicy};
use carlog_util::{default_data_dir, default_log_path};
use std::path::PathBuf;
use std::time::Duration;

/// Default cache lifetime of a fetched event log
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 600;

/// Validated settings ready for wiring the evaluator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub source: SourceSettings,

    pub grading: GradingPolicy,

    /// Applied on top of the built-in catalog, in file order
    pub catalog_overrides: Vec<CatalogEntry>,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            source: SourceSettings::from_raw(raw.source),
            grading: convert_grading(raw.grading),
            catalog_overrides: raw
                .maintenance
                .into_iter()
                .map(|m| CatalogEntry::new(m.name.trim(), m.interval_distance))
                .collect(),
        }
    }
}

/// Kind of event-log backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceKind {
    /// A JSON export of the spreadsheet
    #[default]
    Json,
    /// An `events` table in a SQLite database
    Sqlite,
}

impl SourceKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Sqlite => "sqlite",
        }
    }

    /// Where the log lives when no path is configured
    pub fn default_path(self) -> PathBuf {
        match self {
            Self::Json => default_log_path(),
            Self::Sqlite => default_data_dir().join("events.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    pub kind: SourceKind,
    pub path: PathBuf,
    /// Zero disables caching
    pub cache_ttl: Duration,
}

impl SourceSettings {
    fn from_raw(raw: RawSourceConfig) -> Self {
        let kind = raw
            .kind
            .as_deref()
            .and_then(SourceKind::parse)
            .unwrap_or_default();
        Self {
            kind,
            path: raw.path.unwrap_or_else(|| kind.default_path()),
            cache_ttl: Duration::from_secs(
                raw.cache_ttl_seconds.unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
            ),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::Json,
            path: SourceKind::Json.default_path(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECONDS),
        }
    }
}

fn convert_grading(raw: RawGrading) -> GradingPolicy {
    let defaults = GradingPolicy::default();
    GradingPolicy {
        good_after_days: raw.good_after_days.unwrap_or(defaults.good_after_days),
        not_recorded_after_overdue_days: raw
            .not_recorded_after_overdue_days
            .unwrap_or(defaults.not_recorded_after_overdue_days),
        distance_per_month: raw
            .distance_per_month
            .unwrap_or(defaults.distance_per_month),
        order: raw
            .order
            .as_deref()
            .and_then(GradeOrder::parse)
            .unwrap_or(defaults.order),
        ..defaults
    }
}
