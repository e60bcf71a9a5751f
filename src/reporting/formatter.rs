use crate::catalog::Catalog;
use crate::evaluator::ReportLocator;
use crate::models::Verdict;
use crate::reporting::aggregator::{AssessmentSummary, ControlOutcome};

/// One-line verdict for the session: celebratory when every evaluated
/// control passed, commiseratory otherwise.
pub fn headline(summary: &AssessmentSummary) -> &'static str {
    if summary.all_passed() {
        "All selected controls passed."
    } else if summary.degraded {
        "The evaluator returned no usable verdicts."
    } else if summary.evaluated == 0 {
        "No controls were evaluated."
    } else {
        "Some controls need attention."
    }
}

pub fn format_counts_table(summary: &AssessmentSummary) -> String {
    format!(
        "| Result | Count |\n|---|---|\n| Passed | {} |\n| Failed | {} |\n| **Evaluated** | **{}** |\n",
        summary.passed, summary.failed, summary.evaluated
    )
}

pub fn format_outcome_markdown(outcome: &ControlOutcome, catalog: Option<&Catalog>) -> String {
    let id = outcome.control_id.as_deref().unwrap_or("(unidentified)");
    let mark = match outcome.verdict {
        Verdict::Pass => "PASS",
        Verdict::Fail => "FAIL",
    };
    let mut line = format!("- **{}** {}: {}", id, mark, outcome.status);
    if let Some(description) = outcome.control_id.as_deref()
        .and_then(|id| catalog?.find(id))
        .map(|c| c.description.as_str())
        .filter(|d| !d.is_empty())
    {
        line.push_str(&format!("\n  - {}", description));
    }
    if let Some(comment) = outcome.comment.as_deref().filter(|c| !c.trim().is_empty()) {
        line.push_str(&format!("\n  - _{}_", comment.trim()));
    }
    line.push('\n');
    line
}

/// Markdown rendering of a completed session.
pub fn format_summary_markdown(
    summary: &AssessmentSummary,
    report: Option<&ReportLocator>,
    catalog: Option<&Catalog>,
) -> String {
    let mut out = String::new();
    out.push_str("## Assessment Summary\n\n");
    out.push_str(headline(summary));
    out.push_str("\n\n");
    out.push_str(&format_counts_table(summary));
    out.push_str(&format!("\nPass rate: {:.1}%\n", summary.pass_rate()));

    if !summary.outcomes.is_empty() {
        out.push_str("\n### Controls\n\n");
        for outcome in &summary.outcomes {
            out.push_str(&format_outcome_markdown(outcome, catalog));
        }
    }

    match report {
        Some(locator) => out.push_str(&format!("\nReport: [{}]({})\n", locator.filename, locator.url)),
        None => out.push_str("\nNo report was generated.\n"),
    }
    out
}
