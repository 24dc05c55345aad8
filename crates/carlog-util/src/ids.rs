//! Strongly-typed identifiers for carlog

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a vehicle as written in the event log's `Car` column
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarId(String);

impl CarId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CarId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CarId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
