use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// Every backend normalizes its own error signal into one of these variants.
/// The "no rows" condition is only an error for operations that expected a
/// matching row (update/delete); the single-item lookup by code converts it
/// into a successful absent result instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "PostalCode",
            id: "42".to_string(),
        };
        assert_eq!(error.to_string(), "PostalCode not found: 42");
    }

    #[test]
    fn test_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "PostalCode",
            id: "11300".to_string(),
        };
        assert_eq!(error.to_string(), "PostalCode already exists: 11300");
    }

    #[test]
    fn test_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("store unreachable".to_string());
        assert_eq!(error.to_string(), "Connection failed: store unreachable");
    }

    #[test]
    fn test_query_failed_display() {
        let error = RepositoryError::QueryFailed("syntax error".to_string());
        assert_eq!(error.to_string(), "Query failed: syntax error");
    }

    #[test]
    fn test_invalid_data_display() {
        let error = RepositoryError::InvalidData("unknown location".to_string());
        assert_eq!(error.to_string(), "Invalid data: unknown location");
    }
}
