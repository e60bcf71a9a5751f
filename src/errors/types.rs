use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssessError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown control: {0}")]
    UnknownControl(String),

    #[error("Nothing selected: choose at least one control before assessing")]
    EmptySelection,

    #[error("Session busy: {0}")]
    SessionBusy(String),

    #[error("Invalid session state: {0}")]
    InvalidState(String),

    #[error("Evaluator transport error: {0}")]
    Transport(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AssessError {
    /// Load-time errors stop the session from starting at all.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AssessError::Config(_) | AssessError::CatalogLoad(_))
    }

    /// Errors raised while talking to the evaluator. The session turns these
    /// into a transition back to Idle.
    pub fn is_dispatch_failure(&self) -> bool {
        matches!(
            self,
            AssessError::Transport(_)
                | AssessError::RateLimit(_)
                | AssessError::Authentication(_)
                | AssessError::Timeout(_)
        )
    }
}

impl From<reqwest::Error> for AssessError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AssessError::Timeout(e.to_string())
        } else {
            AssessError::Transport(e.to_string())
        }
    }
}
