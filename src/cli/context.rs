use std::path::Path;

use tracing::debug;

use crate::catalog::{load_catalog, Catalog};
use crate::config::{parse_config, AppConfig, Overrides, Settings};
use crate::errors::AssessError;

/// Settings plus the loaded catalog, shared by every command.
#[derive(Debug)]
pub struct AppContext {
    pub settings: Settings,
    pub catalog: Catalog,
}

/// Read the config file when one was given and merge the overrides into it.
pub async fn load_settings(config_path: Option<&str>, overrides: &Overrides) -> Result<Settings, AssessError> {
    let config = match config_path {
        Some(path) => parse_config(Path::new(path)).await?,
        None => AppConfig::default(),
    };
    let settings = Settings::resolve(&config, overrides)?;
    debug!(
        catalog = %settings.catalog_path.display(),
        evaluator = %settings.evaluator_url,
        "Settings resolved"
    );
    Ok(settings)
}

pub async fn load_context(config_path: Option<&str>, overrides: &Overrides) -> Result<AppContext, AssessError> {
    let settings = load_settings(config_path, overrides).await?;
    let catalog = load_catalog(&settings.catalog_path).await?;
    Ok(AppContext { settings, catalog })
}
