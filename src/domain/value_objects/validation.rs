//! Field constraint violations for user-supplied requests

/// Validation error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field_name} cannot be empty")]
    Empty { field_name: &'static str },

    #[error("{field_name} must be at least {min} characters")]
    TooShort { field_name: &'static str, min: usize },

    #[error("{field_name} must be between {min} and {max} (got {actual})")]
    OutOfRange {
        field_name: &'static str,
        min: u32,
        max: u32,
        actual: u32,
    },
}

/// Validate a string has at least `min` characters after trimming.
pub fn require_min_length(
    value: &str,
    min: usize,
    field_name: &'static str,
) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field_name });
    }
    if trimmed.chars().count() < min {
        return Err(ValidationError::TooShort { field_name, min });
    }
    Ok(())
}

/// Validate a number lies within an inclusive range.
pub fn require_range(
    value: u32,
    min: u32,
    max: u32,
    field_name: &'static str,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field_name,
            min,
            max,
            actual: value,
        });
    }
    Ok(())
}
