//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Unauthorized access")]
    Unauthorized,

    /// The actor does not own the resource it is trying to change.
    #[error("Permission denied")]
    PermissionDenied,

    #[error("Post {0} can no longer be edited")]
    EditWindowClosed(Uuid),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn user_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "User",
            id,
        }
    }

    pub fn post_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "Post",
            id,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl RepoError {
    /// Convert to a domain error, reporting a missing row as `missing`.
    pub fn or_missing(self, missing: DomainError) -> DomainError {
        match self {
            RepoError::NotFound => missing,
            other => other.into(),
        }
    }
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            other => DomainError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_row_becomes_not_found() {
        let id = Uuid::new_v4();
        let err = RepoError::NotFound.or_missing(DomainError::post_not_found(id));

        assert!(matches!(
            err,
            DomainError::NotFound { entity_type: "Post", id: found } if found == id
        ));
    }

    #[test]
    fn test_other_repo_errors_keep_their_mapping() {
        let id = Uuid::new_v4();

        let dup = RepoError::Constraint("taken".into()).or_missing(DomainError::post_not_found(id));
        assert!(matches!(dup, DomainError::Duplicate(_)));

        let conn = RepoError::Connection("down".into()).or_missing(DomainError::post_not_found(id));
        assert!(matches!(conn, DomainError::Internal(_)));
    }
}
