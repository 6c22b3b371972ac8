use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether this error means the requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_not_found() {
        let err = CoreError::NotFound {
            entity: "script",
            id: 7,
        };
        assert_eq!(err.to_string(), "Entity not found: script with id 7");
        assert!(err.is_not_found());
    }

    #[test]
    fn validation_is_not_not_found() {
        let err = CoreError::Validation("name must not be empty".to_string());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Validation failed: name must not be empty");
    }
}
