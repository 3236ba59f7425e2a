//! Wire-to-domain conversions for the remote table API.
//!
//! The table API keys an embedded relation by its table name (`locations`),
//! so responses are decoded into wire rows first and converted into domain
//! types afterwards.

use serde::Deserialize;

use postalstore_core::postal::{Location, PostalCode};

/// A location row as returned by the table API.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationRow {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
}

/// A postal code row as returned by the table API, with the optionally
/// embedded relation under its table name.
#[derive(Debug, Clone, Deserialize)]
pub struct PostalCodeRow {
    pub id: i64,
    pub code: String,
    pub location_id: i64,
    #[serde(default)]
    pub locations: Option<LocationRow>,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Location {
            id: row.id,
            name: row.name,
            region: row.region,
        }
    }
}

impl From<PostalCodeRow> for PostalCode {
    fn from(row: PostalCodeRow) -> Self {
        PostalCode {
            id: row.id,
            code: row.code,
            location_id: row.location_id,
            location: row.locations.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_with_embedded_location() {
        let row: PostalCodeRow = serde_json::from_str(
            r#"{
                "id": 7,
                "code": "11300",
                "location_id": 1,
                "locations": {"id": 1, "name": "Montevideo", "region": null}
            }"#,
        )
        .unwrap();

        let postal_code: PostalCode = row.into();
        assert_eq!(postal_code.code, "11300");
        assert_eq!(postal_code.location.as_ref().unwrap().name, "Montevideo");
        assert_eq!(postal_code.location.as_ref().unwrap().region, None);
    }

    #[test]
    fn test_row_without_embedded_location() {
        let row: PostalCodeRow =
            serde_json::from_str(r#"{"id": 7, "code": "11300", "location_id": 1}"#).unwrap();

        let postal_code: PostalCode = row.into();
        assert_eq!(postal_code, PostalCode::new(7, "11300", 1));
    }

    #[test]
    fn test_row_array() {
        let rows: Vec<PostalCodeRow> = serde_json::from_str(
            r#"[
                {"id": 1, "code": "11200", "location_id": 1},
                {"id": 2, "code": "11300", "location_id": 1}
            ]"#,
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].code, "11300");
    }
}
