use axum::{extract::State, http::StatusCode, Json};
use tracing::debug;
use crate::api::models::ResultsView;
use crate::api::AppState;
use crate::errors::AssessError;

/// Dispatch the current selection. The session lock is held only for the
/// two transitions, never across the evaluator call, so concurrent requests
/// observe Dispatching and are rejected.
///
/// The evaluator call and the closing transition run in their own task, so a
/// client that disconnects mid-call still leaves the session in Results.
pub async fn create_assessment(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ResultsView>), AssessError> {
    let ticket = state.session.lock().await.begin_dispatch()?;

    debug!(evaluator = state.evaluator.name(), items = ticket.snapshot().len(), "Calling evaluator");
    let AppState { session, evaluator, resolver, .. } = state;
    let dispatch = tokio::spawn(async move {
        let outcome = evaluator.assess(&ticket.request()).await;
        let mut session = session.lock().await;
        let view = session.complete_dispatch(ticket, outcome, &resolver).map(ResultsView::from);
        view
    });

    let view = dispatch
        .await
        .map_err(|e| AssessError::Internal(format!("Dispatch task failed: {}", e)))??;
    Ok((StatusCode::CREATED, Json(view)))
}
