//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
///
/// Foreign keys are off by default in SQLite; the pragma makes the store
/// enforce `location_id` references like the remote table store does.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

-- Locations table (owned by the store operator, read-only for the repository)
CREATE TABLE IF NOT EXISTS locations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    region TEXT
);

-- Postal codes table
CREATE TABLE IF NOT EXISTS postal_codes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL UNIQUE,
    location_id INTEGER NOT NULL,
    FOREIGN KEY (location_id) REFERENCES locations(id)
);

-- Index for the by-location listing
CREATE INDEX IF NOT EXISTS idx_postal_codes_location_id ON postal_codes(location_id);
"#;

// Postal code queries
pub const SELECT_POSTAL_CODES: &str = r#"
SELECT p.id, p.code, p.location_id, l.id, l.name, l.region
FROM postal_codes p
LEFT JOIN locations l ON p.location_id = l.id
ORDER BY p.code ASC
"#;

pub const SELECT_POSTAL_CODES_BY_LOCATION: &str = r#"
SELECT id, code, location_id
FROM postal_codes
WHERE location_id = ?1
ORDER BY code ASC
"#;

pub const SELECT_POSTAL_CODE_BY_CODE: &str = r#"
SELECT p.id, p.code, p.location_id, l.id, l.name, l.region
FROM postal_codes p
LEFT JOIN locations l ON p.location_id = l.id
WHERE p.code = ?1
"#;

pub const SELECT_POSTAL_CODE_BY_ID: &str = r#"
SELECT id, code, location_id
FROM postal_codes
WHERE id = ?1
"#;

pub const INSERT_POSTAL_CODE: &str = r#"
INSERT INTO postal_codes (code, location_id)
VALUES (?1, ?2)
"#;

/// Partial update: unset fields arrive as NULL and COALESCE keeps the
/// stored value.
pub const UPDATE_POSTAL_CODE: &str = r#"
UPDATE postal_codes
SET code = COALESCE(?2, code), location_id = COALESCE(?3, location_id)
WHERE id = ?1
"#;

pub const DELETE_POSTAL_CODE: &str = r#"
DELETE FROM postal_codes
WHERE id = ?1
"#;

// Location queries (bootstrap/seeding only)
pub const INSERT_LOCATION: &str = r#"
INSERT INTO locations (name, region)
VALUES (?1, ?2)
"#;

pub const SELECT_LOCATION_BY_ID: &str = r#"
SELECT id, name, region
FROM locations
WHERE id = ?1
"#;
