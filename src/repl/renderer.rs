use console::style;

use crate::catalog::Catalog;
use crate::models::{Control, Verdict};
use crate::reporting::formatter::headline;
use crate::repl::commands::{CommandHelp, COMMAND_HELP};
use crate::selection::SelectionStore;
use crate::session::{AssessmentSession, SessionPhase, SessionResults};
use crate::utils::formatting::{format_duration, format_pass_rate, pluralize};

/// Render a verdict badge with appropriate colors.
pub fn render_verdict_badge(verdict: Verdict) -> String {
    match verdict {
        Verdict::Pass => style(" PASS ").green().bold().to_string(),
        Verdict::Fail => style(" FAIL ").on_red().white().bold().to_string(),
    }
}

/// Render the help listing for all commands.
pub fn render_help(specific_command: Option<&str>) -> String {
    if let Some(cmd_name) = specific_command {
        if let Some(cmd) = COMMAND_HELP.iter().find(|c| c.name == cmd_name) {
            return format_command_detail(cmd);
        } else {
            return format!("{} Unknown command: /{}", style("✗").red(), cmd_name);
        }
    }

    let mut out = String::new();
    out.push_str(&format!("\n{}\n\n", style("Available commands:").white().bold()));
    for cmd in COMMAND_HELP {
        out.push_str(&format!(
            "  {:<16} {}\n",
            style(format!("/{}", cmd.name)).cyan().bold(),
            style(cmd.description).dim(),
        ));
    }
    out
}

fn format_command_detail(cmd: &CommandHelp) -> String {
    format!(
        "\n{}\n  {}\n\n  {}\n",
        style(format!("/{}", cmd.name)).cyan().bold(),
        style(cmd.description).dim(),
        style(cmd.usage).white(),
    )
}

pub fn render_welcome(catalog: &Catalog, evaluator: &str) -> String {
    format!(
        "\n  {} {}  {}\n  {} {} in {}, evaluator {}\n  {} {} {}\n",
        style("ism-assess").cyan().bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style("✔ ready").green().dim(),
        style("Catalog:").dim(),
        pluralize(catalog.distinct_controls().len(), "control"),
        pluralize(catalog.categories().len(), "category"),
        style(evaluator).white(),
        style("Type").dim(),
        style("/help").white().bold(),
        style("for commands.").dim(),
    )
}

pub fn render_categories(catalog: &Catalog, selection: &SelectionStore) -> String {
    if catalog.is_empty() {
        return format!("\n  {}\n", style("The catalog is empty.").dim());
    }

    let mut out = String::new();
    out.push_str(&format!("\n{}\n\n", style("Categories:").white().bold()));
    for (name, controls) in catalog.iter() {
        let selected = controls.iter().filter(|c| selection.contains(&c.control_id)).count();
        let marker = if selected > 0 {
            style(format!("{}/{} selected", selected, controls.len())).green().to_string()
        } else {
            style(pluralize(controls.len(), "control")).dim().to_string()
        };
        out.push_str(&format!("  {:<48} {}\n", style(name).cyan(), marker));
    }
    out
}

pub fn render_controls(category: &str, controls: &[Control], selection: &SelectionStore) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{}\n\n",
        style(format!("{} ({}):", category, controls.len())).white().bold(),
    ));
    for control in controls {
        let check = if selection.contains(&control.control_id) {
            style("[x]").green().bold()
        } else {
            style("[ ]").dim()
        };
        out.push_str(&format!(
            "  {} {:<12} {}\n",
            check,
            style(&control.control_id).white().bold(),
            style(truncate(&control.description, 72)).dim(),
        ));
    }
    if controls.is_empty() {
        out.push_str(&format!("  {}\n", style("No controls in this category.").dim()));
    }
    out
}

pub fn render_control(control: &Control, categories: &[&str], selected: bool) -> String {
    let mut out = format!(
        "\n{} {}\n",
        style(&control.control_id).cyan().bold(),
        if selected { style("(selected)").green().to_string() } else { String::new() },
    );
    let fields = [
        ("Description", control.description.as_str()),
        ("Section", control.section.as_str()),
        ("Topic", control.topic.as_str()),
        ("Aligned topics", control.aligned_topics.as_str()),
        ("Blueprint area", control.blueprint_area.as_str()),
    ];
    for (label, value) in fields.iter().filter(|(_, v)| !v.is_empty()) {
        out.push_str(&format!("  {} {}\n", style(format!("{}:", label)).dim(), value));
    }
    out.push_str(&format!("  {} {}\n", style("Categories:").dim(), categories.join(", ")));
    out
}

pub fn render_selection(selection: &SelectionStore, catalog: &Catalog) -> String {
    let snapshot = selection.snapshot();
    if snapshot.is_empty() {
        return format!("\n  {}\n", style("Nothing selected. Use /toggle or /select-all.").dim());
    }

    let mut out = format!(
        "\n{}\n\n",
        style(format!("Selected ({}):", snapshot.len())).white().bold(),
    );
    for id in snapshot.ids() {
        let description = catalog.find(id).map(|c| c.description.as_str()).unwrap_or_default();
        out.push_str(&format!(
            "  {:<12} {}\n",
            style(id).white().bold(),
            style(truncate(description, 72)).dim(),
        ));
    }
    out
}

/// Render the results of a completed assessment.
pub fn render_results(results: &SessionResults, catalog: &Catalog) -> String {
    let summary = &results.summary;
    let banner = if summary.all_passed() {
        style(format!("✓ {}", headline(summary))).green().bold()
    } else {
        style(format!("✗ {}", headline(summary))).red().bold()
    };

    let mut out = format!("\n  {}\n\n", banner);
    out.push_str(&format!(
        "  {} {}   {} {}   {} {}\n  {} {}   {} {}\n",
        style("Evaluated:").dim(),
        style(summary.evaluated).white().bold(),
        style("Passed:").dim(),
        style(summary.passed).green().bold(),
        style("Failed:").dim(),
        style(summary.failed).red().bold(),
        style("Pass rate:").dim(),
        format_pass_rate(summary.passed, summary.evaluated),
        style("Took:").dim(),
        format_duration(results.duration_ms()),
    ));

    if !summary.outcomes.is_empty() {
        out.push('\n');
        for outcome in &summary.outcomes {
            let id = outcome.control_id.as_deref().unwrap_or("?");
            let description = outcome.control_id.as_deref()
                .and_then(|id| catalog.find(id))
                .map(|c| truncate(&c.description, 56))
                .unwrap_or_default();
            out.push_str(&format!(
                "  {} {:<12} {:<24} {}\n",
                render_verdict_badge(outcome.verdict),
                style(id).white().bold(),
                outcome.status,
                style(description).dim(),
            ));
            if let Some(comment) = outcome.comment.as_deref().filter(|c| !c.trim().is_empty()) {
                out.push_str(&format!("         {}\n", style(truncate(comment.trim(), 96)).italic().dim()));
            }
        }
    }

    match &results.report {
        Some(report) => out.push_str(&format!(
            "\n  {} {}\n",
            style("Report:").dim(),
            style(report).cyan().underlined(),
        )),
        None => out.push_str(&format!("\n  {}\n", style("No report was generated.").dim())),
    }
    out
}

pub fn render_status(session: &AssessmentSession, evaluator: &str) -> String {
    let phase = session.phase();
    let styled_phase = match phase {
        SessionPhase::Idle => style(phase.to_string()).white(),
        SessionPhase::Dispatching => style(phase.to_string()).yellow().bold(),
        SessionPhase::Results => style(phase.to_string()).cyan(),
    };
    let mut out = format!(
        "\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n",
        style("Session:").dim(),
        style(session.id()).white(),
        style("Phase:").dim(),
        styled_phase,
        style("Selected:").dim(),
        style(session.selection().len()).white().bold(),
        style("Evaluator:").dim(),
        style(evaluator).white(),
    );
    if let Some(error) = session.last_error() {
        out.push_str(&format!("  {} {}\n", style("Last error:").dim(), style(error).red()));
    }
    out
}

/// Print an error message to the REPL.
pub fn render_error(msg: &str) -> String {
    format!("{} {}", style("✗").red(), style(msg).red())
}

/// Print a success message.
pub fn render_success(msg: &str) -> String {
    format!("{} {}", style("✓").green(), msg)
}

/// Print an info message.
pub fn render_info(msg: &str) -> String {
    format!("{}", style(msg).dim())
}

fn truncate(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}
