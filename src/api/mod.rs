pub mod routes;
pub mod models;
pub mod errors;
pub mod auth;

use std::sync::Arc;
use axum::Router;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use crate::catalog::Catalog;
use crate::evaluator::{Evaluator, ReportResolver};
use crate::session::{AssessmentSession, SessionPolicy};

/// Everything a request handler needs: the read-only catalog, the single
/// session this server drives, and the evaluator it dispatches to.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub session: Arc<Mutex<AssessmentSession>>,
    pub evaluator: Arc<dyn Evaluator>,
    pub resolver: Arc<ReportResolver>,
    pub api_token: Option<Arc<str>>,
}

pub fn create_app_state(
    catalog: Catalog,
    evaluator: Arc<dyn Evaluator>,
    resolver: ReportResolver,
    policy: SessionPolicy,
) -> AppState {
    AppState {
        catalog: Arc::new(catalog),
        session: Arc::new(Mutex::new(AssessmentSession::new(policy))),
        evaluator,
        resolver: Arc::new(resolver),
        api_token: None,
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .route("/api/catalog", axum::routing::get(routes::catalog::list_catalog))
        .route("/api/catalog/{category}", axum::routing::get(routes::catalog::get_category))
        .route("/api/session", axum::routing::get(routes::session::get_session))
        .route("/api/selection", axum::routing::delete(routes::selection::clear_selection))
        .route("/api/selection/toggle", axum::routing::post(routes::selection::toggle_control))
        .route("/api/selection/categories/{category}", axum::routing::post(routes::selection::select_category))
        .route("/api/assessments", axum::routing::post(routes::assessments::create_assessment))
        .layer(axum::middleware::from_fn_with_state(state.clone(), auth::api_auth_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
