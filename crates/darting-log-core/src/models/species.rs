//! Species catalog models.

use serde::{Deserialize, Serialize};

/// A species in the field catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Species {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub notes: String,
}

impl Default for Species {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl Species {
    /// Create a new species with a fresh identifier.
    pub fn new(name: String) -> Self {
        Self {
            id: super::new_id(),
            name,
            notes: String::new(),
        }
    }
}
