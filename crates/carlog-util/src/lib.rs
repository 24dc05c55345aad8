//! Shared utilities for carlog
//!
//! This crate provides:
//! - ID types (CarId)
//! - Time utilities (mockable wall clock, monotonic instants, month arithmetic)
//! - Error types
//! - Default paths for configuration and data

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
