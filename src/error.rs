//! Error handling for the quotation engine

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Quotation not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True when the error is a rejected entry-build or input check,
    /// as opposed to an infrastructure failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::Forbidden(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(AppError::Validation("missing date".into()).is_validation());
        assert!(AppError::Forbidden("not an admin".into()).is_validation());
        assert!(!AppError::NotFound.is_validation());
        assert!(!AppError::Export("boom".into()).is_validation());
    }

    #[test]
    fn test_display_messages() {
        let err = AppError::Validation("check-out must be after check-in".into());
        assert!(err.to_string().contains("check-out"));

        let err = AppError::Export("page overflow".into());
        assert!(err.to_string().contains("Export failed"));
    }
}
