use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Already liked today")]
    AlreadyLiked,

    #[error("Authentication required")]
    AuthRequired,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        self.has_pg_code("23505")
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        self.has_pg_code("23503")
    }

    pub fn is_check_violation(&self) -> bool {
        self.has_pg_code("23514")
    }

    /// Maps Postgres constraint failures onto the domain errors.
    pub fn classify(self) -> Self {
        if self.is_foreign_key_violation() {
            StorageError::NotFound
        } else if self.is_check_violation() {
            StorageError::Validation(self.to_string())
        } else if self.is_unique_violation() {
            StorageError::ConstraintViolation(self.to_string())
        } else {
            self
        }
    }

    fn has_pg_code(&self, code: &str) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some(code)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_leaves_domain_errors_untouched() {
        assert!(matches!(
            StorageError::AlreadyLiked.classify(),
            StorageError::AlreadyLiked
        ));
        assert!(matches!(
            StorageError::NotFound.classify(),
            StorageError::NotFound
        ));
    }

    #[test]
    fn test_non_database_errors_have_no_pg_code() {
        let err = StorageError::Validation("comment must not be empty".to_string());
        assert!(!err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
        assert!(!err.is_check_violation());
    }
}
