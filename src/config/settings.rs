use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use super::credentials::resolve_credential;
use super::types::*;
use crate::errors::{AssessError, RetryConfig};
use crate::evaluator::{parse_base_url, HttpEvaluator, ReportResolver};
use crate::session::SessionPolicy;

/// Values given on the command line. They win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub catalog: Option<String>,
    pub evaluator_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog_path: PathBuf,
    pub evaluator_url: Url,
    pub timeout: Duration,
    pub retry: RetryConfig,
    pub evaluator_token: Option<String>,
    pub policy: SessionPolicy,
    pub server_host: String,
    pub server_port: u16,
    pub server_token: Option<String>,
}

impl Settings {
    pub fn resolve(config: &AppConfig, overrides: &Overrides) -> Result<Self, AssessError> {
        let evaluator = config.evaluator.clone().unwrap_or_default();
        let server = config.server.clone().unwrap_or_default();

        let catalog_path = overrides.catalog.clone()
            .or_else(|| config.catalog.as_ref()?.path.clone())
            .unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string());

        let evaluator_url = overrides.evaluator_url.as_deref()
            .or(evaluator.base_url.as_deref())
            .unwrap_or(DEFAULT_EVALUATOR_URL);

        Ok(Self {
            catalog_path: PathBuf::from(catalog_path),
            evaluator_url: parse_base_url(evaluator_url)?,
            timeout: Duration::from_secs(evaluator.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            retry: RetryConfig { max_retries: evaluator.max_retries.unwrap_or(0) },
            evaluator_token: evaluator.api_token.as_deref().and_then(resolve_credential),
            policy: SessionPolicy {
                clear_selection_on_failure: config.session.as_ref()
                    .and_then(|s| s.clear_selection_on_failure)
                    .unwrap_or(false),
            },
            server_host: overrides.host.clone()
                .or(server.host)
                .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: overrides.port.or(server.port).unwrap_or(DEFAULT_SERVER_PORT),
            server_token: server.api_token.as_deref().and_then(resolve_credential),
        })
    }

    pub fn evaluator(&self) -> HttpEvaluator {
        HttpEvaluator::new(self.evaluator_url.clone())
            .with_timeout(self.timeout)
            .with_retry(self.retry.clone())
            .with_api_token(self.evaluator_token.clone())
    }

    pub fn report_resolver(&self) -> ReportResolver {
        ReportResolver::new(self.evaluator_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config_str;

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&AppConfig::default(), &Overrides::default()).unwrap();
        assert_eq!(settings.catalog_path, PathBuf::from(DEFAULT_CATALOG_PATH));
        assert_eq!(settings.evaluator_url.as_str(), "http://localhost:8000/");
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(settings.retry.max_retries, 0);
        assert!(!settings.policy.clear_selection_on_failure);
        assert_eq!(settings.server_port, DEFAULT_SERVER_PORT);
        assert!(settings.evaluator_token.is_none());
    }

    #[test]
    fn test_file_values_apply() {
        let config = parse_config_str(
            "catalog:\n  path: ism.json\nevaluator:\n  base_url: https://eval.example.com/api\n  max_retries: 2\nsession:\n  clear_selection_on_failure: true\n",
        ).unwrap();
        let settings = Settings::resolve(&config, &Overrides::default()).unwrap();
        assert_eq!(settings.catalog_path, PathBuf::from("ism.json"));
        assert_eq!(settings.evaluator_url.as_str(), "https://eval.example.com/api");
        assert_eq!(settings.retry.max_retries, 2);
        assert!(settings.policy.clear_selection_on_failure);
    }

    #[test]
    fn test_overrides_win() {
        let config = parse_config_str("catalog:\n  path: ism.json\nserver:\n  port: 9000\n").unwrap();
        let overrides = Overrides {
            catalog: Some("other.json".into()),
            evaluator_url: Some("http://10.0.0.5:8000".into()),
            host: None,
            port: Some(9100),
        };
        let settings = Settings::resolve(&config, &overrides).unwrap();
        assert_eq!(settings.catalog_path, PathBuf::from("other.json"));
        assert_eq!(settings.evaluator_url.host_str(), Some("10.0.0.5"));
        assert_eq!(settings.server_port, 9100);
    }

    #[test]
    fn test_invalid_override_url() {
        let overrides = Overrides { evaluator_url: Some("nope".into()), ..Default::default() };
        assert!(Settings::resolve(&AppConfig::default(), &overrides).is_err());
    }
}
