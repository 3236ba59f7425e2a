//! postalstore_core - Core for the postalstore project.
//!
//! Pure domain types and the storage contract. No I/O lives here; concrete
//! backends are provided by the `postalstore` crate.

pub mod postal;
pub mod storage;
