//! Central error handling for style translation
//!
//! Every translator failure is a `StyleError`; the async surface resolves
//! with the same value it would have returned synchronously.

/// Centralized error type for all translation operations
#[derive(thiserror::Error, Debug)]
pub enum StyleError {
    #[error("No recognizable style layer in native style: {snapshot}")]
    Classification { snapshot: String },

    #[error("Reading {kind} symbolizers from a native style is not supported")]
    UnsupportedDirection { kind: String },

    #[error("Unsupported filter operator: {operator}")]
    UnsupportedFilterOperator { operator: String },

    #[error("Unknown symbolizer kind: {kind}")]
    UnknownSymbolizerKind { kind: String },

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StyleError {
    /// Convenience constructors for common error types
    pub fn unsupported_direction<T: ToString>(kind: T) -> Self {
        StyleError::UnsupportedDirection {
            kind: kind.to_string(),
        }
    }

    pub fn unsupported_operator<T: ToString>(operator: T) -> Self {
        StyleError::UnsupportedFilterOperator {
            operator: operator.to_string(),
        }
    }

    pub fn unknown_kind<T: ToString>(kind: T) -> Self {
        StyleError::UnknownSymbolizerKind {
            kind: kind.to_string(),
        }
    }

    pub fn invalid_filter<T: ToString>(msg: T) -> Self {
        StyleError::InvalidFilter(msg.to_string())
    }

    /// Short category name, handy for log prefixes.
    pub fn category(&self) -> &'static str {
        match self {
            StyleError::Classification { .. } => "Classification",
            StyleError::UnsupportedDirection { .. } => "UnsupportedDirection",
            StyleError::UnsupportedFilterOperator { .. } => "UnsupportedFilterOperator",
            StyleError::UnknownSymbolizerKind { .. } => "UnknownSymbolizerKind",
            StyleError::InvalidFilter(_) => "InvalidFilter",
            StyleError::Json(_) => "Json",
        }
    }
}

/// Result type alias for translation operations
pub type StyleResult<T> = Result<T, StyleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_offending_value() {
        let err = StyleError::unsupported_operator("~=");
        assert_eq!(err.to_string(), "Unsupported filter operator: ~=");
        assert_eq!(err.category(), "UnsupportedFilterOperator");

        let err = StyleError::unknown_kind("Icon");
        assert!(err.to_string().contains("Icon"));
    }
}
