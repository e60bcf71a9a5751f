use std::sync::Arc;

use tracing::info;

use crate::api;
use crate::cli::commands::ServeArgs;
use crate::cli::context::load_context;
use crate::errors::AssessError;

pub async fn handle_serve(args: ServeArgs, config_path: Option<&str>) -> Result<(), AssessError> {
    let mut overrides = args.source.overrides();
    overrides.host = args.host;
    overrides.port = args.port;
    let ctx = load_context(config_path, &overrides).await?;
    let settings = ctx.settings;

    info!(
        host = %settings.server_host,
        port = settings.server_port,
        evaluator = %settings.evaluator_url,
        auth = settings.server_token.is_some(),
        "Starting API server"
    );

    let mut state = api::create_app_state(
        ctx.catalog,
        Arc::new(settings.evaluator()),
        settings.report_resolver(),
        settings.policy,
    );
    state.api_token = settings.server_token.as_deref().map(Arc::from);
    let app = api::build_router(state);

    let addr = format!("{}:{}", settings.server_host, settings.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AssessError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
