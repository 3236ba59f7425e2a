//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use postalstore_core::postal::{Location, NewPostalCode, PostalCode, PostalCodeUpdate};
use postalstore_core::storage::{PostalCodeRepository, RepositoryError, Result};

use crate::mock_data;

/// In-memory storage backend.
///
/// Postal code rows are stored without their embedded location; lookups that
/// embed the relation resolve it against the locations map at read time, the
/// way a joined select would.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    postal_codes: Arc<RwLock<HashMap<i64, PostalCode>>>,
    locations: Arc<RwLock<HashMap<i64, Location>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            postal_codes: Arc::new(RwLock::new(HashMap::new())),
            locations: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Creates a repository seeded with demonstration data.
    pub async fn with_demo_data() -> Self {
        let repo = Self::new();
        for location in mock_data::demo_locations() {
            repo.insert_location(location).await;
        }
        for postal_code in mock_data::demo_postal_codes() {
            // Demo rows reference demo locations, so inserts cannot fail.
            let _ = repo.create_postal_code(&postal_code).await;
        }
        repo
    }

    /// Seeds a location. Locations are owned by the backing store; this
    /// helper exists so tests and demo setups can provision them.
    pub async fn insert_location(&self, location: Location) {
        let mut locations = self.locations.write().await;
        locations.insert(location.id, location);
    }

    fn sort_by_code(mut rows: Vec<PostalCode>) -> Vec<PostalCode> {
        rows.sort_by(|a, b| a.code.cmp(&b.code));
        rows
    }
}

#[async_trait]
impl PostalCodeRepository for InMemoryRepository {
    async fn get_postal_codes(&self) -> Result<Vec<PostalCode>> {
        let locations = self.locations.read().await;
        let postal_codes = self.postal_codes.read().await;

        let rows = postal_codes
            .values()
            .map(|row| match locations.get(&row.location_id) {
                Some(location) => row.clone().with_location(location.clone()),
                None => row.clone(),
            })
            .collect();

        Ok(Self::sort_by_code(rows))
    }

    async fn get_postal_codes_by_location(&self, location_id: i64) -> Result<Vec<PostalCode>> {
        let postal_codes = self.postal_codes.read().await;

        let rows = postal_codes
            .values()
            .filter(|row| row.location_id == location_id)
            .cloned()
            .collect();

        Ok(Self::sort_by_code(rows))
    }

    async fn get_postal_code(&self, code: &str) -> Result<Option<PostalCode>> {
        let locations = self.locations.read().await;
        let postal_codes = self.postal_codes.read().await;

        Ok(postal_codes
            .values()
            .find(|row| row.code == code)
            .map(|row| match locations.get(&row.location_id) {
                Some(location) => row.clone().with_location(location.clone()),
                None => row.clone(),
            }))
    }

    async fn create_postal_code(&self, postal_code: &NewPostalCode) -> Result<PostalCode> {
        let locations = self.locations.read().await;
        let mut postal_codes = self.postal_codes.write().await;

        if postal_codes.values().any(|row| row.code == postal_code.code) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "PostalCode",
                id: postal_code.code.clone(),
            });
        }
        if !locations.contains_key(&postal_code.location_id) {
            return Err(RepositoryError::InvalidData(format!(
                "no location with id {}",
                postal_code.location_id
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = PostalCode::new(id, postal_code.code.clone(), postal_code.location_id);
        postal_codes.insert(id, row.clone());
        Ok(row)
    }

    async fn update_postal_code(&self, id: i64, changes: &PostalCodeUpdate) -> Result<PostalCode> {
        let locations = self.locations.read().await;
        let mut postal_codes = self.postal_codes.write().await;

        // A missing row resolves before any constraint is evaluated, the
        // way an UPDATE matching zero rows never trips a constraint.
        if !postal_codes.contains_key(&id) {
            return Err(RepositoryError::NotFound {
                entity_type: "PostalCode",
                id: id.to_string(),
            });
        }
        if let Some(code) = &changes.code {
            if postal_codes
                .values()
                .any(|row| row.id != id && row.code == *code)
            {
                return Err(RepositoryError::AlreadyExists {
                    entity_type: "PostalCode",
                    id: id.to_string(),
                });
            }
        }
        if let Some(location_id) = changes.location_id {
            if !locations.contains_key(&location_id) {
                return Err(RepositoryError::InvalidData(format!(
                    "no location with id {location_id}"
                )));
            }
        }

        let row = postal_codes
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: "PostalCode",
                id: id.to_string(),
            })?;
        changes.apply_to(row);
        Ok(row.clone())
    }

    async fn delete_postal_code(&self, id: i64) -> Result<bool> {
        let mut postal_codes = self.postal_codes.write().await;
        if postal_codes.remove(&id).is_none() {
            return Err(RepositoryError::NotFound {
                entity_type: "PostalCode",
                id: id.to_string(),
            });
        }
        Ok(true)
    }
}
