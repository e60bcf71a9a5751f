use serde_json::json;
use tracing::info;

use crate::cli::commands::AssessArgs;
use crate::cli::context::load_context;
use crate::errors::AssessError;
use crate::evaluator::Evaluator;
use crate::repl::progress::dispatch_spinner;
use crate::reporting::formatter::format_summary_markdown;
use crate::session::AssessmentSession;

/// One non-interactive session: select, dispatch once, print the summary.
pub async fn handle_assess(args: AssessArgs, config_path: Option<&str>, quiet: bool) -> Result<(), AssessError> {
    let ctx = load_context(config_path, &args.source.overrides()).await?;
    let evaluator = ctx.settings.evaluator();
    let resolver = ctx.settings.report_resolver();
    let mut session = AssessmentSession::new(ctx.settings.policy);
    let session_id = session.id().to_string();

    for category in &args.categories {
        let added = session.select_all_in_category(category, &ctx.catalog)?;
        info!(category = %category, added, "Category selected");
    }
    for control_id in &args.controls {
        if !ctx.catalog.contains(control_id) {
            return Err(AssessError::UnknownControl(control_id.clone()));
        }
        if !session.selection().contains(control_id) {
            session.toggle(control_id)?;
        }
    }

    let spinner = (!quiet && !args.json)
        .then(|| dispatch_spinner(session.selection().len(), evaluator.name()));
    let outcome = session.dispatch(&evaluator, &resolver).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let results = outcome?;

    if args.json {
        let body = json!({
            "session": session_id,
            "requested": results.requested.ids(),
            "summary": &results.summary,
            "all_passed": results.summary.all_passed(),
            "pass_rate": results.summary.pass_rate(),
            "report": &results.report,
            "duration_ms": results.duration_ms(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!(
            "{}",
            format_summary_markdown(&results.summary, results.report.as_ref(), Some(&ctx.catalog))
        );
    }
    Ok(())
}
