use serde::{Deserialize, Serialize};

/// A geographic location that postal codes belong to.
///
/// Locations are owned entirely by the backing store; the repository only
/// ever reads them, nested inside a [`PostalCode`] when the relation is
/// explicitly embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub region: Option<String>,
}

impl Location {
    /// Creates a location with the given store-assigned ID and name.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            region: None,
        }
    }

    /// Sets the region for this location.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// A postal code row as stored.
///
/// `id` is assigned by the backing store. `code` is intended unique and
/// `location_id` is expected to reference an existing [`Location`], but
/// neither is validated by this layer; both are left to the store's own
/// constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalCode {
    pub id: i64,
    pub code: String,
    pub location_id: i64,
    /// The related location, populated only by operations that embed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl PostalCode {
    /// Creates a postal code row with the given store-assigned ID.
    pub fn new(id: i64, code: impl Into<String>, location_id: i64) -> Self {
        Self {
            id,
            code: code.into(),
            location_id,
            location: None,
        }
    }

    /// Attaches the related location to this row.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Returns a copy of this row without the embedded location.
    pub fn without_location(mut self) -> Self {
        self.location = None;
        self
    }
}
