//! Data types shared between the carlog crates
//!
//! This crate defines the stable shapes consumed by rendering shells:
//! - Grades, grade ordering and grading policy
//! - Catalog entries and record types
//! - Per-car health reports, fleet grade rows and fuel summaries

mod reports;
mod types;

pub use reports::*;
pub use types::*;
