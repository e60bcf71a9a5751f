pub mod http;
pub mod report;

use async_trait::async_trait;
use reqwest::Url;

use crate::errors::AssessError;
use crate::models::{AssessmentRequest, AssessmentResponse};

pub use http::HttpEvaluator;
pub use report::{ReportLocator, ReportResolver};

/// The external service that judges controls. Implementations send exactly
/// the given request and resolve to the parsed response or a transport-class
/// error.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn assess(&self, request: &AssessmentRequest) -> Result<AssessmentResponse, AssessError>;

    /// Name for logging
    fn name(&self) -> &str;
}

/// Parse and check an evaluator base URL. Only http and https are accepted.
pub fn parse_base_url(raw: &str) -> Result<Url, AssessError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AssessError::Config(format!("Invalid evaluator URL '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AssessError::Config(format!(
            "Unsupported evaluator URL scheme '{}' in {}",
            other, raw
        ))),
    }
}

/// Append one path segment to `base`, keeping any path prefix it carries.
pub(crate) fn endpoint(base: &Url, segment: &str) -> Result<Url, AssessError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| AssessError::Config(format!("Evaluator URL cannot be a base: {}", base)))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}
