use async_trait::async_trait;

use crate::postal::{NewPostalCode, PostalCode, PostalCodeUpdate};

use super::Result;

/// Repository for postal code operations.
///
/// Each operation is a single independent round trip to the backing store:
/// no caching, no retries, no cross-call transactions. Concurrent calls do
/// not interfere and their ordering is unspecified.
#[async_trait]
pub trait PostalCodeRepository: Send + Sync {
    /// Gets all postal codes, ascending by code, each with its related
    /// location embedded when the relation resolves.
    async fn get_postal_codes(&self) -> Result<Vec<PostalCode>>;

    /// Gets the postal codes referencing the given location, ascending by
    /// code. The related location is not embedded.
    async fn get_postal_codes_by_location(&self, location_id: i64) -> Result<Vec<PostalCode>>;

    /// Gets the postal code with the given code value, with its related
    /// location embedded. Resolves `Ok(None)` when no row matches; a missed
    /// lookup by code is expected, not exceptional.
    async fn get_postal_code(&self, code: &str) -> Result<Option<PostalCode>>;

    /// Inserts a new postal code and returns it with its store-assigned ID.
    async fn create_postal_code(&self, postal_code: &NewPostalCode) -> Result<PostalCode>;

    /// Updates the row matching `id` with the set fields and returns the row
    /// as stored after the write.
    async fn update_postal_code(&self, id: i64, changes: &PostalCodeUpdate) -> Result<PostalCode>;

    /// Deletes the row matching `id`. Resolves `true` on completion.
    async fn delete_postal_code(&self, id: i64) -> Result<bool>;
}
