use crate::types::DbId;

/// Domain-level error taxonomy shared by the persistence and API layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error produced when a string code does not belong to its vocabulary.
///
/// Used by the `TryFrom<String>` / `FromStr` impls of every domain enum so
/// unknown codes are rejected at the boundary instead of stored.
#[derive(Debug, thiserror::Error)]
#[error("unknown {vocabulary} code: '{code}'")]
pub struct UnknownCode {
    pub vocabulary: &'static str,
    pub code: String,
}

impl UnknownCode {
    pub fn new(vocabulary: &'static str, code: impl Into<String>) -> Self {
        Self {
            vocabulary,
            code: code.into(),
        }
    }
}
