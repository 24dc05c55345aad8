//! Config validation CLI tool
//!
//! Validates a carlog configuration file and reports any errors.

use carlog_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates a carlog configuration file.");
            eprintln!();
            eprintln!("If no path is provided, uses: {}", default_path.display());
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-config {}", default_path.display());
            eprintln!("  validate-config config.example.toml");
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match carlog_config::load_config(&config_path) {
        Ok(settings) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", carlog_config::CURRENT_CONFIG_VERSION);
            println!(
                "  Source: {} ({})",
                settings.source.kind.as_str(),
                settings.source.path.display()
            );
            println!("  Cache TTL: {}s", settings.source.cache_ttl.as_secs());
            println!(
                "  Grading: good after {} days, not recorded after {} days overdue, {} per month, {} order",
                settings.grading.good_after_days,
                settings.grading.not_recorded_after_overdue_days,
                settings.grading.distance_per_month,
                settings.grading.order.as_str()
            );

            if !settings.catalog_overrides.is_empty() {
                println!();
                println!("Maintenance overrides:");
                for entry in &settings.catalog_overrides {
                    println!("  - {}: every {}", entry.name, entry.interval_distance);
                }
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                carlog_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                carlog_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                carlog_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                carlog_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        carlog_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
