//! Configuration validation

use crate::schema::{RawConfig, RawGrading, RawSourceConfig};
use crate::settings::SourceKind;
use carlog_api::GradeOrder;
use std::collections::HashSet;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Maintenance '{name}': {message}")]
    MaintenanceError { name: String, message: String },

    #[error("Duplicate maintenance name: {0}")]
    DuplicateMaintenance(String),

    #[error("Unknown source kind '{0}' (expected json or sqlite)")]
    UnknownSourceKind(String),

    #[error("Unknown grade order '{0}' (expected severity or alphabetical)")]
    UnknownGradeOrder(String),

    #[error("Source config error: {0}")]
    SourceError(String),

    #[error("Grading config error: {0}")]
    GradingError(String),
}

/// Validate a raw configuration, collecting every problem
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_source(&config.source));
    errors.extend(validate_grading(&config.grading));

    let mut seen = HashSet::new();
    for entry in &config.maintenance {
        let name = entry.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::MaintenanceError {
                name: entry.name.clone(),
                message: "name cannot be empty".into(),
            });
            continue;
        }
        if name.contains(',') {
            errors.push(ValidationError::MaintenanceError {
                name: entry.name.clone(),
                message: "name cannot contain a comma".into(),
            });
        }
        if entry.interval_distance == 0 {
            errors.push(ValidationError::MaintenanceError {
                name: entry.name.clone(),
                message: "interval_distance must be positive".into(),
            });
        }
        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateMaintenance(name.to_string()));
        }
    }

    errors
}

fn validate_source(source: &RawSourceConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(kind) = &source.kind
        && SourceKind::parse(kind).is_none()
    {
        errors.push(ValidationError::UnknownSourceKind(kind.clone()));
    }

    if let Some(path) = &source.path
        && path.as_os_str().is_empty()
    {
        errors.push(ValidationError::SourceError("path cannot be empty".into()));
    }

    errors
}

fn validate_grading(grading: &RawGrading) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(days) = grading.good_after_days
        && days < 0
    {
        errors.push(ValidationError::GradingError(format!(
            "good_after_days must not be negative (got {days})"
        )));
    }

    if let Some(days) = grading.not_recorded_after_overdue_days
        && days < 0
    {
        errors.push(ValidationError::GradingError(format!(
            "not_recorded_after_overdue_days must not be negative (got {days})"
        )));
    }

    if grading.distance_per_month == Some(0) {
        errors.push(ValidationError::GradingError(
            "distance_per_month must be positive".into(),
        ));
    }

    if let Some(order) = &grading.order
        && GradeOrder::parse(order).is_none()
    {
        errors.push(ValidationError::UnknownGradeOrder(order.clone()));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawMaintenance;

    fn config(maintenance: Vec<RawMaintenance>) -> RawConfig {
        RawConfig {
            config_version: 1,
            source: Default::default(),
            grading: Default::default(),
            maintenance,
        }
    }

    fn entry(name: &str, interval_distance: u32) -> RawMaintenance {
        RawMaintenance {
            name: name.into(),
            interval_distance,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&config(vec![])).is_empty());
    }

    #[test]
    fn test_duplicate_maintenance_detection() {
        let errors = validate_config(&config(vec![
            entry("Battery inspection", 12000),
            entry(" Battery inspection ", 24000),
        ]));
        assert_eq!(
            errors,
            [ValidationError::DuplicateMaintenance("Battery inspection".into())]
        );
    }

    #[test]
    fn test_bad_maintenance_entries() {
        let errors = validate_config(&config(vec![
            entry("  ", 1000),
            entry("Oil, filter", 5000),
            entry("Wiper blades", 0),
        ]));
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ValidationError::MaintenanceError { .. })));
    }

    #[test]
    fn test_source_validation() {
        let mut raw = config(vec![]);
        raw.source.kind = Some("postgres".into());
        raw.source.path = Some("".into());

        let errors = validate_config(&raw);
        assert_eq!(
            errors,
            [
                ValidationError::UnknownSourceKind("postgres".into()),
                ValidationError::SourceError("path cannot be empty".into()),
            ]
        );
    }

    #[test]
    fn test_grading_validation() {
        let mut raw = config(vec![]);
        raw.grading = RawGrading {
            good_after_days: Some(-1),
            not_recorded_after_overdue_days: Some(-5),
            distance_per_month: Some(0),
            order: Some("random".into()),
        };

        let errors = validate_config(&raw);
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[3], ValidationError::UnknownGradeOrder("random".into()));
    }
}
