use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use super::normalizer::normalize;
use super::schema::CATALOG_SCHEMA;
use super::types::{Catalog, RawCatalog};
use crate::errors::AssessError;

const MAX_CATALOG_BYTES: u64 = 16 * 1_048_576;

/// Load, validate and normalize the catalog document at `path`. Any failure
/// is a fatal `CatalogLoad` error; nothing is partially recovered.
pub async fn load_catalog(path: &Path) -> Result<Catalog, AssessError> {
    if !path.exists() {
        return Err(AssessError::CatalogLoad(format!("Catalog file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await
        .map_err(|e| AssessError::CatalogLoad(format!("{}: {}", path.display(), e)))?;
    if metadata.len() > MAX_CATALOG_BYTES {
        return Err(AssessError::CatalogLoad("Catalog file exceeds 16MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await
        .map_err(|e| AssessError::CatalogLoad(format!("{}: {}", path.display(), e)))?;
    let catalog = parse_catalog(&content)?;

    info!(
        path = %path.display(),
        categories = catalog.categories().len(),
        controls = catalog.total_controls(),
        "Loaded control catalog"
    );
    Ok(catalog)
}

/// Parse a catalog document from text.
pub fn parse_catalog(content: &str) -> Result<Catalog, AssessError> {
    let json: Value = serde_json::from_str(content)
        .map_err(|e| AssessError::CatalogLoad(format!("Invalid catalog JSON: {}", e)))?;

    validate_schema(&json)?;

    let raw: RawCatalog = serde_json::from_value(json)
        .map_err(|e| AssessError::CatalogLoad(format!("Invalid catalog structure: {}", e)))?;

    let before: usize = raw.values().map(|c| c.len()).sum();
    let catalog = normalize(raw);
    let dropped = before - catalog.total_controls();
    if dropped > 0 {
        debug!(dropped, "Collapsed duplicate control ids");
    }

    Ok(catalog)
}

fn validate_schema(json: &Value) -> Result<(), AssessError> {
    let compiled = jsonschema::JSONSchema::compile(&CATALOG_SCHEMA)
        .map_err(|e| AssessError::Internal(format!("Catalog schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(json) {
        let messages: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();
        return Err(AssessError::CatalogLoad(format!(
            "Catalog does not match schema: {}",
            messages.join("; ")
        )));
    }

    Ok(())
}
