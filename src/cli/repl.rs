use std::sync::Arc;

use crate::cli::commands::ReplArgs;
use crate::cli::context::load_context;
use crate::errors::AssessError;
use crate::repl::ReplSession;

pub async fn handle_repl(args: ReplArgs, config_path: Option<&str>) -> Result<(), AssessError> {
    let ctx = load_context(config_path, &args.source.overrides()).await?;
    let settings = ctx.settings;
    ReplSession::new(
        ctx.catalog,
        Arc::new(settings.evaluator()),
        settings.report_resolver(),
        settings.policy,
    )
    .run()
    .await
}
