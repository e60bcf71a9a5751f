use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use crate::api::models::{SessionView, ToggleRequest};
use crate::api::AppState;
use crate::errors::AssessError;

pub async fn toggle_control(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<Value>, AssessError> {
    let control_id = req.control_id.trim();
    if !state.catalog.contains(control_id) {
        return Err(AssessError::UnknownControl(control_id.to_string()));
    }

    let mut session = state.session.lock().await;
    let selected = session.toggle(control_id)?;
    Ok(Json(json!({
        "control_id": control_id,
        "selected": selected,
        "selection_size": session.selection().len(),
        "version": session.selection().version(),
    })))
}

pub async fn select_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Value>, AssessError> {
    let mut session = state.session.lock().await;
    let added = session.select_all_in_category(&category, &state.catalog)?;
    Ok(Json(json!({
        "category": category,
        "added": added,
        "selection_size": session.selection().len(),
        "version": session.selection().version(),
    })))
}

pub async fn clear_selection(State(state): State<AppState>) -> Result<Json<SessionView>, AssessError> {
    let mut session = state.session.lock().await;
    session.clear()?;
    Ok(Json(SessionView::from(&*session)))
}
