//! Remote table API storage backend.
//!
//! Talks to a PostgREST-style table endpoint: equality filters and ordering
//! are expressed in the query string, related rows are embedded through the
//! `select` parameter, and writes return their rows via the
//! `Prefer: return=representation` header. The backend's "no rows" signal
//! is abstracted behind a named sentinel so the repository never matches on
//! raw backend error codes.

mod conversions;
mod error;
mod repository;

pub use repository::RestRepository;
