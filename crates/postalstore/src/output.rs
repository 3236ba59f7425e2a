//! Output formatting for the CLI.

use serde::Serialize;

use postalstore_core::postal::PostalCode;

/// Serializes a value as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("serialization error: {e}"))
}

/// Human-readable formatting.
pub mod pretty {
    use super::*;

    /// Formats a single postal code line.
    pub fn format_postal_code(postal_code: &PostalCode) -> String {
        match &postal_code.location {
            Some(location) => format!(
                "{}  [id {}]  {} ({})",
                postal_code.code, postal_code.id, location.name, location.id
            ),
            None => format!(
                "{}  [id {}]  location {}",
                postal_code.code, postal_code.id, postal_code.location_id
            ),
        }
    }

    /// Formats a listing, one row per line.
    pub fn format_postal_codes(postal_codes: &[PostalCode]) -> String {
        if postal_codes.is_empty() {
            return "(no postal codes)".to_string();
        }
        postal_codes
            .iter()
            .map(format_postal_code)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
