// Letter generation: validate → build prompt → call Gemini → record the result.
// All Gemini calls go through llm_client; no direct HTTP calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod validator;

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::models::notification::Notification;
use crate::models::resignation::RequiredField;

/// Every way a generation attempt can fail. Each is reported to the user and
/// none is retried automatically.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Please enter your Google Gemini API key")]
    MissingCredential,

    #[error("Please fill in all required fields (missing: {})", join_labels(.0))]
    MissingRequiredField(Vec<RequiredField>),

    #[error("Network request failed: {0}")]
    TransportFailure(String),

    #[error("API request failed: {status}")]
    RequestRejected { status: u16 },

    #[error("No content generated")]
    EmptyResponse,
}

impl GenerationError {
    /// Stable machine-readable code used in error response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::MissingCredential => "MISSING_CREDENTIAL",
            GenerationError::MissingRequiredField(_) => "MISSING_REQUIRED_FIELD",
            GenerationError::TransportFailure(_) => "TRANSPORT_FAILURE",
            GenerationError::RequestRejected { .. } => "REQUEST_REJECTED",
            GenerationError::EmptyResponse => "EMPTY_RESPONSE",
        }
    }

    /// True for failures caught before any network call is made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GenerationError::MissingCredential | GenerationError::MissingRequiredField(_)
        )
    }

    pub fn notification(&self) -> Notification {
        match self {
            GenerationError::MissingCredential => Notification::destructive(
                "API Key Required",
                "Please enter your Google Gemini API key to generate the letter.",
            ),
            GenerationError::MissingRequiredField(_) => Notification::destructive(
                "Missing Information",
                "Please fill in all required fields to generate the letter.",
            ),
            _ => Notification::destructive("Generation Failed", self.to_string()),
        }
    }
}

impl From<LlmError> for GenerationError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Transport(e) => GenerationError::TransportFailure(e.to_string()),
            LlmError::RequestRejected { status } => GenerationError::RequestRejected { status },
            LlmError::EmptyResponse => GenerationError::EmptyResponse,
        }
    }
}

fn join_labels(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notification::NotificationKind;

    #[test]
    fn test_missing_fields_message_lists_labels() {
        let err = GenerationError::MissingRequiredField(vec![
            RequiredField::FullName,
            RequiredField::LastWorkingDay,
        ]);
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields (missing: Full Name, Last Working Day)"
        );
    }

    #[test]
    fn test_upstream_failures_share_generation_failed_title() {
        let n = GenerationError::RequestRejected { status: 429 }.notification();
        assert_eq!(n.kind, NotificationKind::Destructive);
        assert_eq!(n.title, "Generation Failed");
        assert_eq!(n.description, "API request failed: 429");
    }

    #[test]
    fn test_llm_error_maps_to_matching_kind() {
        assert!(matches!(
            GenerationError::from(LlmError::EmptyResponse),
            GenerationError::EmptyResponse
        ));
        assert!(matches!(
            GenerationError::from(LlmError::RequestRejected { status: 400 }),
            GenerationError::RequestRejected { status: 400 }
        ));
    }

    #[test]
    fn test_validation_classification() {
        assert!(GenerationError::MissingCredential.is_validation());
        assert!(!GenerationError::EmptyResponse.is_validation());
    }
}
