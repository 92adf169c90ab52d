//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Query is empty")]
    EmptyQuery,

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Command not found: {0}")]
    CommandNotFound(String),
}

impl DomainError {
    /// Check if this error maps to a not-found condition
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::SessionNotFound(_) | DomainError::CommandNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_display() {
        let error = DomainError::EmptyQuery;
        assert_eq!(error.to_string(), "Query is empty");
    }

    #[test]
    fn test_is_not_found_check() {
        assert!(DomainError::SessionNotFound("abc".to_string()).is_not_found());
        assert!(DomainError::CommandNotFound("review".to_string()).is_not_found());
        assert!(!DomainError::EmptyQuery.is_not_found());
    }
}
