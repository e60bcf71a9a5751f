use reqwest::Url;
use serde::Serialize;
use tracing::warn;

use super::endpoint;
use crate::models::AssessmentResponse;

const DOWNLOAD_REPORT_PATH: &str = "download-report";

/// Where the generated report for a session can be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLocator {
    pub url: String,
    pub filename: String,
}

impl std::fmt::Display for ReportLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}

/// Builds `GET {base}/download-report?filename=...` locators.
#[derive(Debug, Clone)]
pub struct ReportResolver {
    base_url: Url,
}

impl ReportResolver {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// `None` when the evaluator produced no artifact for this response.
    pub fn resolve(&self, response: &AssessmentResponse) -> Option<ReportLocator> {
        self.locate(response.output_file.as_deref()?)
    }

    pub fn locate(&self, output_file: &str) -> Option<ReportLocator> {
        let filename = output_file.trim();
        if filename.is_empty() {
            return None;
        }

        let mut url = match endpoint(&self.base_url, DOWNLOAD_REPORT_PATH) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "Cannot build report locator");
                return None;
            }
        };
        url.query_pairs_mut().append_pair("filename", filename);

        Some(ReportLocator {
            url: url.to_string(),
            filename: filename.to_string(),
        })
    }
}
