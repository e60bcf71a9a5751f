use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, info, warn};

use super::{endpoint, Evaluator};
use crate::errors::{with_retry, AssessError, RetryConfig};
use crate::models::{AssessmentRequest, AssessmentResponse};

const CONDUCT_ASSESSMENT_PATH: &str = "conduct-assessment";
const MAX_ERROR_BODY: usize = 200;

/// Evaluator reached over HTTP: `POST {base}/conduct-assessment`.
pub struct HttpEvaluator {
    client: Client,
    base_url: Url,
    timeout: Option<Duration>,
    retry: RetryConfig,
    api_token: Option<String>,
}

impl HttpEvaluator {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
            timeout: None,
            retry: RetryConfig::default(),
            api_token: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_api_token(mut self, token: Option<String>) -> Self {
        self.api_token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send_once(&self, url: &Url, request: &AssessmentRequest) -> Result<AssessmentResponse, AssessError> {
        let mut builder = self.client.post(url.clone()).json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let resp = builder.send().await?;

        let status = resp.status();
        debug!(status = status.as_u16(), "Evaluator responded");
        if status.as_u16() == 429 {
            return Err(AssessError::RateLimit("Evaluator rate limit".into()));
        }
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(AssessError::Authentication(format!("Evaluator rejected credentials ({})", status)));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(AssessError::Transport(format!("Evaluator returned {}: {}", status, snippet)));
        }

        let body = resp.bytes().await?;
        let parsed = AssessmentResponse::from_slice(&body);
        if parsed.is_malformed() {
            warn!(bytes = body.len(), "Evaluator response has no assessments array");
        }
        Ok(parsed)
    }
}

#[async_trait]
impl Evaluator for HttpEvaluator {
    async fn assess(&self, request: &AssessmentRequest) -> Result<AssessmentResponse, AssessError> {
        let url = endpoint(&self.base_url, CONDUCT_ASSESSMENT_PATH)?;
        info!(url = %url, items = request.items.len(), "Requesting assessment");

        with_retry("conduct-assessment", &self.retry, || self.send_once(&url, request)).await
    }

    fn name(&self) -> &str {
        self.base_url.as_str()
    }
}
