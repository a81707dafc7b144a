//! Error types for schema resolution.

use thiserror::Error;

/// Result alias for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Why a raw payload could not be resolved into a typed document.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No registered schema shares even one field with the input.
    #[error("no registered schema shares a field with the input")]
    NoCandidate,

    /// A schema won the similarity scoring but its typed decode rejected
    /// the payload. Nothing is partially accepted.
    #[error("input matched schema `{schema}` but failed to decode: {source}")]
    Validation {
        /// Name of the schema that won the scoring.
        schema: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_names_the_schema() {
        let source = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = ResolveError::Validation {
            schema: "image",
            source,
        };
        let text = err.to_string();
        assert!(text.contains("image"), "display was: {text}");
    }

    #[test]
    fn test_no_candidate_display() {
        let text = ResolveError::NoCandidate.to_string();
        assert!(text.contains("no registered schema"), "display was: {text}");
    }
}
