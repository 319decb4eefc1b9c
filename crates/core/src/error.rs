#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Required identifiers are still missing after every fallback.
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        fields: Vec<&'static str>,
    },

    /// A source or factor column value could not be read as a number.
    #[error("Not a valid number: {}", fields.join(", "))]
    InvalidNumbers { fields: Vec<&'static str> },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build a [`CoreError::Validation`] for a set of missing request fields.
    pub fn missing_fields(fields: Vec<&'static str>) -> Self {
        CoreError::Validation {
            message: format!("Missing required fields: {}", fields.join(", ")),
            fields,
        }
    }

    /// Field names attached to the error, if any.
    pub fn fields(&self) -> &[&'static str] {
        match self {
            CoreError::Validation { fields, .. } | CoreError::InvalidNumbers { fields } => fields,
            _ => &[],
        }
    }
}
