//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository trait
//! defined in `postalstore_core::storage`. Backends are compiled in via
//! feature flags and selected at startup through [`build_repository`].
//!
//! # Feature Flags
//!
//! - `sqlite` (default): Local SQLite backend using `rusqlite` and `tokio-rusqlite`
//! - `rest`: Remote table API backend using `reqwest`
//! - `inmemory` (default): In-memory backend for testing and local development
//!
//! The `sqlite` and `rest` features are mutually exclusive - only one
//! persistent storage backend can be enabled at a time.
//!
//! # Examples
//!
//! Build with SQLite (default):
//! ```bash
//! cargo build -p postalstore
//! ```
//!
//! Build with the remote table API:
//! ```bash
//! cargo build -p postalstore --no-default-features --features rest,inmemory
//! ```

use std::sync::Arc;

use postalstore_core::storage::{PostalCodeRepository, RepositoryError, Result};

use crate::config::Config;

// Compile-time check for mutual exclusivity
#[cfg(all(feature = "sqlite", feature = "rest"))]
compile_error!(
    "Features 'sqlite' and 'rest' are mutually exclusive. \
    Enable only one persistent storage backend at a time."
);

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "rest")]
pub mod rest;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;

#[cfg(feature = "rest")]
pub use rest::RestRepository;

/// Builds the repository named by `config.backend`.
///
/// Callers receive the repository through their construction parameters;
/// nothing is registered globally. Backends not compiled in are reported as
/// configuration errors, not silently substituted.
pub async fn build_repository(config: &Config) -> Result<Arc<dyn PostalCodeRepository>> {
    match config.backend.as_str() {
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            tracing::info!(path = %config.sqlite_path, "using sqlite storage backend");
            Ok(Arc::new(SqliteRepository::new(&config.sqlite_path).await?))
        }
        #[cfg(feature = "rest")]
        "rest" => {
            tracing::info!(url = %config.store_url, "using remote table API backend");
            Ok(Arc::new(RestRepository::new(
                &config.store_url,
                config.store_api_key.clone(),
            )?))
        }
        #[cfg(feature = "inmemory")]
        "memory" => {
            tracing::info!("using in-memory storage backend with demo data");
            Ok(Arc::new(InMemoryRepository::with_demo_data().await))
        }
        other => Err(RepositoryError::InvalidData(format!(
            "unknown or disabled storage backend: {other}"
        ))),
    }
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;

    fn config_with_backend(backend: &str) -> Config {
        Config {
            backend: backend.to_string(),
            sqlite_path: ":memory:".to_string(),
            store_url: "http://localhost:3000".to_string(),
            store_api_key: None,
        }
    }

    #[tokio::test]
    async fn test_memory_backend_is_buildable() {
        let repo = build_repository(&config_with_backend("memory")).await.unwrap();
        assert!(!repo.get_postal_codes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_backend_is_rejected() {
        let result = build_repository(&config_with_backend("carrier-pigeon")).await;
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }
}
