//! Postal code domain types.

mod requests;
mod types;

pub use requests::{NewPostalCode, PostalCodeUpdate};
pub use types::{Location, PostalCode};
