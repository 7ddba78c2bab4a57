//! Request payload normalization
//!
//! The backend treats the presence of a key as intent to set it, so the body
//! of a create/update call carries only the fields the client asserts:
//!
//! - entries whose value is an empty string or `null` are dropped,
//! - server-managed keys (`employee_id`, `created_at`, `updated_at`) are
//!   dropped whatever their value.
//!
//! An unset `reporting_manager_id` therefore never appears in the body.
//! Normalization is idempotent.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{EmployeeDraft, SERVER_MANAGED_FIELDS};

/// Normalized request body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Normalize an arbitrary JSON object
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(
            map.into_iter()
                .filter(|(key, value)| is_asserted(key, value))
                .collect(),
        )
    }

    /// Normalize again; a no-op on any value this type produced
    pub fn normalized(self) -> Self {
        Self::from_map(self.0)
    }

    /// String value of a key, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// Normalize a draft into the body the backend accepts
pub fn normalize(draft: &EmployeeDraft) -> Payload {
    Payload::from_map(draft.to_map())
}

fn is_asserted(key: &str, value: &Value) -> bool {
    if SERVER_MANAGED_FIELDS.contains(&key) {
        return false;
    }
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
