//! Error mapping for the remote table API.
//!
//! Maps transport failures and non-success responses to `RepositoryError`
//! from `postalstore_core::storage`.

use serde::Deserialize;

use postalstore_core::storage::RepositoryError;

/// Error code the table API uses when a single object was requested but
/// zero (or multiple) rows matched. This is the one condition the
/// single-item lookup treats as a successful absent result.
pub const NO_ROWS_CODE: &str = "PGRST116";

/// Error body returned by the table API on non-success responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Parses an error body, tolerating non-JSON payloads.
pub fn parse_error_body(body: &str) -> ErrorBody {
    serde_json::from_str(body).unwrap_or_default()
}

/// Returns true when the error body carries the "no rows" sentinel.
pub fn is_no_rows(body: &ErrorBody) -> bool {
    body.code.as_deref() == Some(NO_ROWS_CODE)
}

const ENTITY: &str = "PostalCode";

/// What a failed request was addressing. Decides how `404` and `409`
/// map onto the error taxonomy.
#[derive(Debug, Clone, Copy)]
pub enum ErrorTarget<'a> {
    /// A single row addressed by id or code; `404` means the row is missing
    /// and `409` means its code collided with an existing row.
    Row(&'a str),
    /// An insert; a `409` conflict names the new row's code, while `404`
    /// points at a misconfigured endpoint rather than a missing row.
    Insert(&'a str),
    /// A collection read; any non-success status is a store-side problem.
    Collection,
}

/// Maps a non-success response to a RepositoryError.
///
/// # Error Mapping
///
/// - `404` on a `Row` target → `RepositoryError::NotFound`
/// - `409` on a `Row` or `Insert` target → `RepositoryError::AlreadyExists`
/// - Everything else → `RepositoryError::QueryFailed`
pub fn map_error_response(status: u16, body: &str, target: ErrorTarget<'_>) -> RepositoryError {
    let parsed = parse_error_body(body);
    let message = parsed
        .message
        .unwrap_or_else(|| body.trim().to_string());

    match (status, target) {
        (404, ErrorTarget::Row(id)) => RepositoryError::NotFound {
            entity_type: ENTITY,
            id: id.to_string(),
        },
        (409, ErrorTarget::Row(id)) | (409, ErrorTarget::Insert(id)) => {
            RepositoryError::AlreadyExists {
                entity_type: ENTITY,
                id: id.to_string(),
            }
        }
        _ => RepositoryError::QueryFailed(format!("store returned {status}: {message}")),
    }
}

/// Maps a transport-level reqwest error to a RepositoryError.
pub fn map_request_error(err: reqwest::Error) -> RepositoryError {
    if err.is_connect() || err.is_timeout() {
        RepositoryError::ConnectionFailed(err.to_string())
    } else if err.is_decode() {
        RepositoryError::Serialization(err.to_string())
    } else {
        RepositoryError::QueryFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_rows_sentinel_is_recognized() {
        let body = parse_error_body(
            r#"{"code": "PGRST116", "message": "JSON object requested, multiple (or no) rows returned"}"#,
        );
        assert!(is_no_rows(&body));
    }

    #[test]
    fn test_other_codes_are_not_no_rows() {
        let body = parse_error_body(r#"{"code": "23505", "message": "duplicate key"}"#);
        assert!(!is_no_rows(&body));
    }

    #[test]
    fn test_non_json_body_is_tolerated() {
        let body = parse_error_body("upstream timeout");
        assert!(!is_no_rows(&body));
        assert_eq!(body.message, None);
    }

    #[test]
    fn test_conflict_on_row_maps_to_already_exists() {
        let result = map_error_response(
            409,
            r#"{"code": "23505", "message": "duplicate key"}"#,
            ErrorTarget::Row("42"),
        );
        match result {
            RepositoryError::AlreadyExists { entity_type, id } => {
                assert_eq!(entity_type, "PostalCode");
                assert_eq!(id, "42");
            }
            _ => panic!("Expected AlreadyExists error"),
        }
    }

    #[test]
    fn test_conflict_on_insert_carries_the_code() {
        let result = map_error_response(
            409,
            r#"{"code": "23505", "message": "duplicate key"}"#,
            ErrorTarget::Insert("11300"),
        );
        match result {
            RepositoryError::AlreadyExists { id, .. } => assert_eq!(id, "11300"),
            _ => panic!("Expected AlreadyExists error"),
        }
    }

    #[test]
    fn test_missing_row_maps_to_not_found() {
        let result = map_error_response(404, "", ErrorTarget::Row("42"));
        assert!(matches!(result, RepositoryError::NotFound { .. }));
    }

    #[test]
    fn test_missing_endpoint_on_collection_is_query_failed() {
        let result = map_error_response(404, "", ErrorTarget::Collection);
        match result {
            RepositoryError::QueryFailed(message) => assert!(message.contains("404")),
            _ => panic!("Expected QueryFailed error"),
        }
    }

    #[test]
    fn test_missing_endpoint_on_insert_is_query_failed() {
        let result = map_error_response(404, "", ErrorTarget::Insert("11300"));
        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }

    #[test]
    fn test_other_status_maps_to_query_failed() {
        let result = map_error_response(
            500,
            r#"{"message": "internal error"}"#,
            ErrorTarget::Row("42"),
        );
        match result {
            RepositoryError::QueryFailed(message) => {
                assert!(message.contains("500"));
                assert!(message.contains("internal error"));
            }
            _ => panic!("Expected QueryFailed error"),
        }
    }
}
