//! Skill error types

use thiserror::Error;

/// Failures raised while routing a single event
#[derive(Debug, Error)]
pub enum SkillError {
    /// The event came from an application other than the configured one
    #[error("Invalid Application ID: {actual}")]
    InvalidApplicationId { actual: String },

    /// No handler is registered for the intent and no fallback applies
    #[error("Invalid Intent: {0}")]
    UnrecognizedIntent(String),

    /// The request type is not one the skill routes
    #[error("Unsupported request type")]
    UnsupportedRequest,

    /// The event body is not a valid skill event
    #[error("Malformed event: {0}")]
    MalformedEvent(#[from] serde_json::Error),
}

impl SkillError {
    /// Failure string reported to the caller
    pub fn failure_message(&self) -> String {
        match self {
            Self::InvalidApplicationId { .. } => "Invalid Application ID".to_string(),
            other => format!("Exception: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        let err = SkillError::UnrecognizedIntent("Dance".to_string());
        assert_eq!(err.failure_message(), "Exception: Invalid Intent: Dance");

        let err = SkillError::InvalidApplicationId {
            actual: "amzn1.echo-sdk-ams.app.other".to_string(),
        };
        assert_eq!(err.failure_message(), "Invalid Application ID");
    }
}
