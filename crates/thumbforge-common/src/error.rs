//! Common error types used throughout thumbforge.
//!
//! The storage layer reports two kinds of failure: a lookup that matched no
//! image, and everything else the database threw at us.

/// Common error type for thumbforge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No stored image has the requested id.
    #[error("Image not found: {0}")]
    NotFound(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),
}

impl Error {
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Self::NotFound(what.into())
    }

    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this error came from the database layer.
    pub fn is_database(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::not_found("42").to_string(), "Image not found: 42");
        assert_eq!(
            Error::database("connection failed").to_string(),
            "Database error: connection failed"
        );
    }

    #[test]
    fn test_kind_predicates() {
        assert!(Error::database("locked").is_database());
        assert!(!Error::database("locked").is_not_found());
        assert!(Error::not_found("1").is_not_found());
        assert!(!Error::not_found("1").is_database());
    }
}
