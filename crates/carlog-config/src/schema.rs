//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Where the event log comes from
    #[serde(default)]
    pub source: RawSourceConfig,

    /// Grading thresholds
    #[serde(default)]
    pub grading: RawGrading,

    /// Catalog overrides and additions
    #[serde(default)]
    pub maintenance: Vec<RawMaintenance>,
}

/// Event-log source settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawSourceConfig {
    /// `json` (default) or `sqlite`
    pub kind: Option<String>,

    /// Defaults to a file in the data directory
    pub path: Option<PathBuf>,

    /// 0 disables caching (default: 600)
    pub cache_ttl_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawGrading {
    pub good_after_days: Option<i64>,
    pub not_recorded_after_overdue_days: Option<i64>,
    pub distance_per_month: Option<u32>,

    /// `severity` (default) or `alphabetical`
    pub order: Option<String>,
}

/// A catalog entry; replaces the built-in interval when the name matches
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawMaintenance {
    pub name: String,
    pub interval_distance: u32,
}
