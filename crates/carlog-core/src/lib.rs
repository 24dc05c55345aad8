//! Maintenance health evaluation for carlog
//!
//! This crate is the heart of carlog, containing:
//! - The embedded maintenance catalog
//! - The health evaluator (last performed, next due, days until due, grade)
//! - The fleet summary aggregator
//! - The fuel summary

mod catalog;
mod evaluator;
mod fleet;
mod fuel;

pub use catalog::*;
pub use evaluator::*;
pub use fleet::*;
pub use fuel::*;
