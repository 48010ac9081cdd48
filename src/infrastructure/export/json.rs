use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Two-space indented JSON
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}
