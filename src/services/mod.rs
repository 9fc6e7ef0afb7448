//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own persistence and document seeding so route handlers
//! can stay focused on request parsing and status mapping. Canvas documents
//! are stored as opaque JSON; only the `canvas` crate interprets them.

pub mod campaign;
pub mod template;

use uuid::Uuid;

/// Errors shared by the template and campaign services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("record not found: {0}")]
    NotFound(Uuid),
    #[error("invalid request: {0}")]
    Invalid(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Trim a display name and reject blank or oversized ones.
///
/// # Errors
///
/// Returns [`ServiceError::Invalid`] for an empty or overlong name.
pub(crate) fn validate_name(raw: &str) -> Result<String, ServiceError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ServiceError::Invalid("name must not be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ServiceError::Invalid(format!("name exceeds {MAX_NAME_LEN} characters")));
    }
    Ok(name.to_owned())
}

/// Stored documents must at least be JSON objects.
///
/// # Errors
///
/// Returns [`ServiceError::Invalid`] for any other JSON value.
pub(crate) fn require_object(value: &serde_json::Value, field: &str) -> Result<(), ServiceError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(ServiceError::Invalid(format!("{field} must be a JSON object")))
    }
}

pub(crate) const MAX_NAME_LEN: usize = 200;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
