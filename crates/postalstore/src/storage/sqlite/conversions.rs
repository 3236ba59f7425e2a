//! Row-to-domain conversions for the SQLite backend.

use postalstore_core::postal::{Location, PostalCode};

/// Converts a plain postal code row: `id, code, location_id`.
pub fn row_to_postal_code(row: &rusqlite::Row) -> rusqlite::Result<PostalCode> {
    Ok(PostalCode::new(
        row.get::<_, i64>(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, i64>(2)?,
    ))
}

/// Converts a joined postal code row:
/// `p.id, p.code, p.location_id, l.id, l.name, l.region`.
///
/// The location columns come from a LEFT JOIN and may all be NULL when the
/// referenced row is gone; the relation is then left unset.
pub fn row_to_postal_code_with_location(row: &rusqlite::Row) -> rusqlite::Result<PostalCode> {
    let postal_code = row_to_postal_code(row)?;

    match row.get::<_, Option<i64>>(3)? {
        Some(location_id) => {
            let mut location = Location::new(location_id, row.get::<_, String>(4)?);
            if let Some(region) = row.get::<_, Option<String>>(5)? {
                location = location.with_region(region);
            }
            Ok(postal_code.with_location(location))
        }
        None => Ok(postal_code),
    }
}

/// Converts a location row: `id, name, region`.
pub fn row_to_location(row: &rusqlite::Row) -> rusqlite::Result<Location> {
    let mut location = Location::new(row.get::<_, i64>(0)?, row.get::<_, String>(1)?);
    if let Some(region) = row.get::<_, Option<String>>(2)? {
        location = location.with_region(region);
    }
    Ok(location)
}
