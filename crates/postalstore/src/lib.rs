//! postalstore - Postal code data-access layer.
//!
//! Concrete storage backends for the repository contract defined in
//! `postalstore_core`, selected by configuration at startup.

pub mod cli;
pub mod config;
pub mod mock_data;
pub mod output;
pub mod storage;

pub use config::Config;
pub use storage::build_repository;
