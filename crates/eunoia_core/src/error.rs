//! Request-level error taxonomy.
//!
//! Only malformed input surfaces to callers as an error; internal faults
//! (snapshot restore, learning cycles, the scheduler) degrade with a log
//! line and defaults instead.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    /// Chat message text was empty or whitespace-only.
    #[error("message text must not be empty")]
    EmptyMessage,

    /// A required request field was absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Assessment submitted with no answers; the score would be undefined.
    #[error("assessment contains no answers")]
    EmptyAssessment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(AgentError::EmptyMessage.to_string(), "message text must not be empty");
        assert_eq!(
            AgentError::MissingField("user_id").to_string(),
            "missing required field: user_id"
        );
    }
}
