//! In-memory storage backend for testing and local development.
//!
//! Stores all data in HashMaps wrapped in `Arc<RwLock<_>>`. Data is not
//! persisted and will be lost when the repository is dropped. The backend
//! emulates the real store's constraints (unique codes, valid location
//! references) so constraint failures propagate the same way everywhere.

mod repository;

pub use repository::InMemoryRepository;
