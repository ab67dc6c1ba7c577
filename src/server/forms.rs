use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in the {0} field.")]
    MissingField(&'static str),
}

/// Returns the trimmed value, treating absent and blank values alike.
pub fn required(value: Option<String>, field: &'static str) -> Result<String, FormError> {
    match value.as_deref().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(FormError::MissingField(field)),
    }
}
