//! Demonstration data for the in-memory backend.

use postalstore_core::postal::{Location, NewPostalCode};

/// Locations referenced by the demo postal codes.
pub fn demo_locations() -> Vec<Location> {
    vec![
        Location::new(1, "Montevideo").with_region("Montevideo Department"),
        Location::new(2, "Canelones").with_region("Canelones Department"),
        Location::new(3, "Maldonado").with_region("Maldonado Department"),
    ]
}

/// A handful of postal codes spread across the demo locations.
pub fn demo_postal_codes() -> Vec<NewPostalCode> {
    vec![
        NewPostalCode::new("11200", 1),
        NewPostalCode::new("11300", 1),
        NewPostalCode::new("11700", 1),
        NewPostalCode::new("15000", 2),
        NewPostalCode::new("15800", 2),
        NewPostalCode::new("20000", 3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_demo_postal_codes_reference_demo_locations() {
        let location_ids: HashSet<i64> = demo_locations().iter().map(|l| l.id).collect();
        assert!(demo_postal_codes()
            .iter()
            .all(|p| location_ids.contains(&p.location_id)));
    }

    #[test]
    fn test_demo_codes_are_unique() {
        let codes: HashSet<String> = demo_postal_codes().iter().map(|p| p.code.clone()).collect();
        assert_eq!(codes.len(), demo_postal_codes().len());
    }
}
