use super::types::AssessError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl AssessError {
    /// Classify this error to determine its type and whether the evaluator
    /// transport may retry it.
    pub fn classify(&self) -> ErrorClassification {
        let (error_type, retryable) = match self {
            // Retryable at the transport layer
            AssessError::Transport(_) => ("TransportError", true),
            AssessError::RateLimit(_) => ("RateLimitError", true),
            AssessError::Timeout(_) => ("TimeoutError", true),

            // Non-retryable
            AssessError::Authentication(_) => ("AuthenticationError", false),
            AssessError::Config(_) => ("ConfigError", false),
            AssessError::CatalogLoad(_) => ("CatalogLoadError", false),
            AssessError::UnknownCategory(_) => ("UnknownCategoryError", false),
            AssessError::UnknownControl(_) => ("UnknownControlError", false),
            AssessError::EmptySelection => ("EmptySelectionError", false),
            AssessError::SessionBusy(_) => ("SessionBusyError", false),
            AssessError::InvalidState(_) => ("InvalidStateError", false),
            AssessError::Io(_) => ("IoError", false),
            AssessError::Json(_) => ("JsonError", false),
            AssessError::Yaml(_) => ("YamlError", false),
            AssessError::Internal(_) => ("InternalError", false),
        };
        ErrorClassification { error_type, retryable }
    }
}
