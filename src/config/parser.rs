use std::path::Path;
use crate::errors::AssessError;
use crate::evaluator::parse_base_url;
use super::types::{AppConfig, MAX_RETRIES_LIMIT};
use tracing::warn;

pub async fn parse_config(path: &Path) -> Result<AppConfig, AssessError> {
    if !path.exists() {
        return Err(AssessError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(AssessError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<AppConfig, AssessError> {
    // An empty document is a valid, all-default config.
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }

    let config: AppConfig = serde_yaml::from_str(content)
        .map_err(|e| AssessError::Config(format!("Invalid config: {}", e)))?;

    validate_config(&config)?;

    Ok(config)
}

/// Detect invalid values in the parsed configuration.
fn validate_config(config: &AppConfig) -> Result<(), AssessError> {
    if let Some(evaluator) = &config.evaluator {
        if let Some(url) = &evaluator.base_url {
            parse_base_url(url)?;
        }
        if evaluator.timeout_secs == Some(0) {
            return Err(AssessError::Config("evaluator.timeout_secs must be greater than 0".into()));
        }
        if let Some(retries) = evaluator.max_retries {
            if retries > MAX_RETRIES_LIMIT {
                return Err(AssessError::Config(format!(
                    "evaluator.max_retries must be at most {}",
                    MAX_RETRIES_LIMIT
                )));
            }
        }
        if evaluator.api_token.as_deref().is_some_and(|t| !t.starts_with('$')) {
            warn!("evaluator.api_token is stored in plain text; prefer a $VARIABLE reference");
        }
    }

    if let Some(server) = &config.server {
        if server.port == Some(0) {
            return Err(AssessError::Config("server.port must be greater than 0".into()));
        }
    }

    Ok(())
}
