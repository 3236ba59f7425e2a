//! SQLite repository implementation.
//!
//! Implements the repository trait from `postalstore_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use postalstore_core::postal::{Location, NewPostalCode, PostalCode, PostalCodeUpdate};
use postalstore_core::storage::{PostalCodeRepository, RepositoryError, Result};

use super::conversions::{row_to_location, row_to_postal_code, row_to_postal_code_with_location};
use super::error::map_tokio_rusqlite_error_with_id;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage over a single connection; each
/// operation is one round trip under the store's own transaction semantics.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Inserts a location and returns it with its store-assigned ID.
    ///
    /// Locations are owned by the store operator; the repository contract
    /// only reads them. This helper exists for bootstrapping and tests.
    pub async fn insert_location(&self, name: &str, region: Option<&str>) -> Result<Location> {
        let name = name.to_string();
        let region = region.map(str::to_string);

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_LOCATION, rusqlite::params![name, region])
                    .map_err(wrap_err)?;
                let id = conn.last_insert_rowid();
                let mut stmt = conn
                    .prepare(schema::SELECT_LOCATION_BY_ID)
                    .map_err(wrap_err)?;
                stmt.query_row([id], row_to_location).map_err(wrap_err)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl PostalCodeRepository for SqliteRepository {
    async fn get_postal_codes(&self) -> Result<Vec<PostalCode>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_POSTAL_CODES).map_err(wrap_err)?;
                let rows = stmt
                    .query_map([], row_to_postal_code_with_location)
                    .map_err(wrap_err)?;

                let mut postal_codes = Vec::new();
                for row_result in rows {
                    postal_codes.push(row_result.map_err(wrap_err)?);
                }
                Ok(postal_codes)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn get_postal_codes_by_location(&self, location_id: i64) -> Result<Vec<PostalCode>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_POSTAL_CODES_BY_LOCATION)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([location_id], row_to_postal_code)
                    .map_err(wrap_err)?;

                let mut postal_codes = Vec::new();
                for row_result in rows {
                    postal_codes.push(row_result.map_err(wrap_err)?);
                }
                Ok(postal_codes)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn get_postal_code(&self, code: &str) -> Result<Option<PostalCode>> {
        let code = code.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_POSTAL_CODE_BY_CODE)
                    .map_err(wrap_err)?;
                // A missed lookup by code is an expected outcome, not an error.
                match stmt.query_row([&code], row_to_postal_code_with_location) {
                    Ok(postal_code) => Ok(Some(postal_code)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn create_postal_code(&self, postal_code: &NewPostalCode) -> Result<PostalCode> {
        let code = postal_code.code.clone();
        let location_id = postal_code.location_id;
        let code_for_err = postal_code.code.clone();

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_POSTAL_CODE, rusqlite::params![code, location_id])
                    .map_err(wrap_err)?;
                let id = conn.last_insert_rowid();
                let mut stmt = conn
                    .prepare(schema::SELECT_POSTAL_CODE_BY_ID)
                    .map_err(wrap_err)?;
                stmt.query_row([id], row_to_postal_code).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, code_for_err))
    }

    async fn update_postal_code(&self, id: i64, changes: &PostalCodeUpdate) -> Result<PostalCode> {
        let code = changes.code.clone();
        let location_id = changes.location_id;

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_POSTAL_CODE,
                        rusqlite::params![id, code, location_id],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                let mut stmt = conn
                    .prepare(schema::SELECT_POSTAL_CODE_BY_ID)
                    .map_err(wrap_err)?;
                stmt.query_row([id], row_to_postal_code).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id.to_string()))
    }

    async fn delete_postal_code(&self, id: i64) -> Result<bool> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_POSTAL_CODE, [id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(true)
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to create a repository with a couple of seeded locations
    async fn seeded_repo() -> SqliteRepository {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        repo.insert_location("Montevideo", Some("Montevideo Department"))
            .await
            .unwrap();
        repo.insert_location("Canelones", None).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = seeded_repo().await;

        let created = repo
            .create_postal_code(&NewPostalCode::new("11300", 1))
            .await
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.code, "11300");
        assert_eq!(created.location_id, 1);
        // Insert-with-returning does not embed the relation.
        assert!(created.location.is_none());

        let retrieved = repo.get_postal_code("11300").await.unwrap().unwrap();
        assert_eq!(retrieved.id, created.id);
        assert_eq!(retrieved.location.as_ref().unwrap().name, "Montevideo");
    }

    #[tokio::test]
    async fn test_get_nonexistent_resolves_none() {
        let repo = seeded_repo().await;
        let result = repo.get_postal_code("00000").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_all_ordered_by_code_with_locations() {
        let repo = seeded_repo().await;
        repo.create_postal_code(&NewPostalCode::new("90000", 2))
            .await
            .unwrap();
        repo.create_postal_code(&NewPostalCode::new("11300", 1))
            .await
            .unwrap();
        repo.create_postal_code(&NewPostalCode::new("11200", 1))
            .await
            .unwrap();

        let rows = repo.get_postal_codes().await.unwrap();

        let codes: Vec<&str> = rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["11200", "11300", "90000"]);
        assert!(rows.iter().all(|r| r.location.is_some()));
        assert_eq!(rows[2].location.as_ref().unwrap().name, "Canelones");
    }

    #[tokio::test]
    async fn test_get_by_location_filters_and_orders() {
        let repo = seeded_repo().await;
        repo.create_postal_code(&NewPostalCode::new("11300", 1))
            .await
            .unwrap();
        repo.create_postal_code(&NewPostalCode::new("90000", 2))
            .await
            .unwrap();
        repo.create_postal_code(&NewPostalCode::new("11200", 1))
            .await
            .unwrap();

        let rows = repo.get_postal_codes_by_location(1).await.unwrap();

        let codes: Vec<&str> = rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["11200", "11300"]);
        assert!(rows.iter().all(|r| r.location.is_none()));
    }

    #[tokio::test]
    async fn test_create_duplicate_code_fails() {
        let repo = seeded_repo().await;
        repo.create_postal_code(&NewPostalCode::new("11300", 1))
            .await
            .unwrap();

        let result = repo.create_postal_code(&NewPostalCode::new("11300", 2)).await;
        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "PostalCode",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_create_with_unknown_location_fails() {
        let repo = seeded_repo().await;
        let result = repo.create_postal_code(&NewPostalCode::new("11300", 99)).await;
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_update_changes_code() {
        let repo = seeded_repo().await;
        let created = repo
            .create_postal_code(&NewPostalCode::new("11300", 1))
            .await
            .unwrap();

        let updated = repo
            .update_postal_code(created.id, &PostalCodeUpdate::new().with_code("99999"))
            .await
            .unwrap();
        assert_eq!(updated.code, "99999");
        assert_eq!(updated.location_id, 1);

        assert!(repo.get_postal_code("99999").await.unwrap().is_some());
        assert!(repo.get_postal_code("11300").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_unset_fields() {
        let repo = seeded_repo().await;
        let created = repo
            .create_postal_code(&NewPostalCode::new("11300", 1))
            .await
            .unwrap();

        let updated = repo
            .update_postal_code(created.id, &PostalCodeUpdate::new().with_location_id(2))
            .await
            .unwrap();
        assert_eq!(updated.code, "11300");
        assert_eq!(updated.location_id, 2);
    }

    #[tokio::test]
    async fn test_update_nonexistent_fails() {
        let repo = seeded_repo().await;
        let result = repo
            .update_postal_code(42, &PostalCodeUpdate::new().with_code("99999"))
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_to_taken_code_fails() {
        let repo = seeded_repo().await;
        repo.create_postal_code(&NewPostalCode::new("11200", 1))
            .await
            .unwrap();
        let created = repo
            .create_postal_code(&NewPostalCode::new("11300", 1))
            .await
            .unwrap();

        let result = repo
            .update_postal_code(created.id, &PostalCodeUpdate::new().with_code("11200"))
            .await;
        match result {
            Err(RepositoryError::AlreadyExists { entity_type, id }) => {
                assert_eq!(entity_type, "PostalCode");
                assert_eq!(id, created.id.to_string());
            }
            other => panic!("Expected AlreadyExists error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_missing_row_with_taken_code_reports_not_found() {
        let repo = seeded_repo().await;
        repo.create_postal_code(&NewPostalCode::new("11200", 1))
            .await
            .unwrap();

        // Zero rows match the UPDATE, so the UNIQUE constraint is never hit.
        let result = repo
            .update_postal_code(42, &PostalCodeUpdate::new().with_code("11200"))
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_resolves_true_and_removes_row() {
        let repo = seeded_repo().await;
        let created = repo
            .create_postal_code(&NewPostalCode::new("11300", 1))
            .await
            .unwrap();

        assert!(repo.delete_postal_code(created.id).await.unwrap());
        assert!(repo.get_postal_code("11300").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_fails() {
        let repo = seeded_repo().await;
        let result = repo.delete_postal_code(42).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }
}
