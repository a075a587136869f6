//! External entity state snapshots
//!
//! The external integration owns these wholesale: each change notification
//! replaces the previous snapshot, and the synchronizer only ever reads it.

use crate::error::{BridgeError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Most-recent-known state of an externally managed entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityState {
    /// Entity identifier, e.g. `climate.living_room`
    pub entity_id: String,

    /// Primary state value, e.g. `heat`, `cool`, `off`
    pub state: String,

    /// Device-type-specific attribute payload
    pub attributes: HashMap<String, serde_json::Value>,

    /// When the external integration reported this snapshot
    pub last_updated: DateTime<Utc>,
}

impl EntityState {
    /// Create a snapshot with the current time as the report time
    pub fn new<S: Into<String>>(entity_id: S, state: S) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes: HashMap::new(),
            last_updated: Utc::now(),
        }
    }

    /// Parse a snapshot from a raw JSON notification payload
    ///
    /// A snapshot without an entity id cannot be routed to a device
    /// instance and is rejected.
    pub fn from_json(payload: &str) -> Result<Self> {
        let entity: Self = serde_json::from_str(payload)?;
        if entity.entity_id.is_empty() {
            return Err(BridgeError::invalid_input(
                "entity snapshot is missing an entity_id",
            ));
        }
        Ok(entity)
    }

    /// Set an attribute, consuming and returning self for fixture-style
    /// construction
    pub fn with_attr<S: Into<String>, V: Into<serde_json::Value>>(
        mut self,
        key: S,
        value: V,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Numeric attribute lookup
    pub fn attr_f64(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).and_then(|v| v.as_f64())
    }

    /// String attribute lookup
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(|v| v.as_str())
    }
}
