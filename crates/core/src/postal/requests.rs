//! Create and update payloads for postal code operations.
//!
//! Pure data types shared by every storage backend: the in-memory store
//! applies them directly, the wire backends serialize them as-is.

use serde::{Deserialize, Serialize};

use super::types::PostalCode;

/// Payload for creating a new postal code. The store assigns the ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPostalCode {
    pub code: String,
    pub location_id: i64,
}

impl NewPostalCode {
    /// Creates a payload with the given code and location reference.
    pub fn new(code: impl Into<String>, location_id: i64) -> Self {
        Self {
            code: code.into(),
            location_id,
        }
    }
}

/// Partial update payload for a postal code.
///
/// Fields left as `None` are not touched by the write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalCodeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
}

impl PostalCodeUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new code value.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the new location reference.
    pub fn with_location_id(mut self, location_id: i64) -> Self {
        self.location_id = Some(location_id);
        self
    }

    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.location_id.is_none()
    }

    /// Applies the set fields to an existing row.
    pub fn apply_to(&self, postal_code: &mut PostalCode) {
        if let Some(code) = &self.code {
            postal_code.code = code.clone();
        }
        if let Some(location_id) = self.location_id {
            postal_code.location_id = location_id;
        }
    }
}
