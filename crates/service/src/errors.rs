use thiserror::Error;

/// Message returned when a create payload lacks `name` or `description`.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name and description are required";

/// Failures of the item operations. Both are ordinary per-request outcomes;
/// the `Display` text is what clients see.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn missing_required_fields() -> Self { Self::Validation(REQUIRED_FIELDS_MESSAGE.into()) }
}
