//! Source and evaluator construction from settings

use carlog_config::{Settings, SourceKind, SourceSettings};
use carlog_core::{Catalog, HealthEvaluator};
use carlog_log::{CachedLogSource, JsonFileSource, LogSource, SourceResult, SqliteLogSource};
use std::path::Path;
use tracing::info;

/// Open the configured event-log backend. `path_override` replaces the
/// configured path but keeps the configured kind.
pub fn open_source(
    settings: &SourceSettings,
    path_override: Option<&Path>,
) -> SourceResult<Box<dyn LogSource>> {
    let path = path_override.unwrap_or(settings.path.as_path());
    let source: Box<dyn LogSource> = match settings.kind {
        SourceKind::Json => Box::new(JsonFileSource::new(path)),
        SourceKind::Sqlite => Box::new(SqliteLogSource::open(path)?),
    };
    info!(source = %source.describe(), "Event log source opened");
    Ok(source)
}

/// Open the configured source behind the configured cache lifetime
pub fn open_cached_source(
    settings: &SourceSettings,
    path_override: Option<&Path>,
) -> SourceResult<CachedLogSource<Box<dyn LogSource>>> {
    let source = open_source(settings, path_override)?;
    Ok(CachedLogSource::new(source, settings.cache_ttl))
}

/// Built-in catalog with configured overrides, graded by the configured policy
pub fn build_evaluator(settings: &Settings) -> HealthEvaluator {
    let catalog = Catalog::builtin().with_overrides(&settings.catalog_overrides);
    HealthEvaluator::new(catalog, settings.grading.clone())
}
