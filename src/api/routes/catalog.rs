use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use crate::api::AppState;
use crate::errors::AssessError;

pub async fn list_catalog(State(state): State<AppState>) -> Json<Value> {
    let categories: Vec<Value> = state.catalog.iter()
        .map(|(name, controls)| json!({
            "name": name,
            "controls": controls,
        }))
        .collect();

    Json(json!({
        "categories": categories,
        "total_controls": state.catalog.total_controls(),
    }))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Value>, AssessError> {
    let controls = state.catalog.controls(&category)
        .ok_or_else(|| AssessError::UnknownCategory(category.clone()))?;
    Ok(Json(json!({
        "name": category,
        "controls": controls,
    })))
}
