use axum::{extract::State, Json};
use crate::api::models::SessionView;
use crate::api::AppState;

pub async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(SessionView::from(&*session))
}
