use std::collections::BTreeMap;

use thiserror::Error;

/// Field name to human-readable message, as produced by form validation.
/// A `BTreeMap` keeps iteration order stable for display and assertions.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation failed: {}", format_field_errors(.0))]
    Validation(FieldErrors),

    #[error("Propagation failed: {0}")]
    Propagation(String),
}

fn format_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type AppResult<T> = Result<T, AppError>;
