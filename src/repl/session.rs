use std::sync::Arc;

use console::style;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

use crate::catalog::Catalog;
use crate::errors::AssessError;
use crate::evaluator::{Evaluator, ReportResolver};
use crate::repl::commands::{self, SlashCommand};
use crate::repl::completer::ReplHelper;
use crate::repl::progress::dispatch_spinner;
use crate::repl::renderer;
use crate::session::{AssessmentSession, SessionPhase, SessionPolicy};
use crate::utils::formatting::pluralize;

/// Interactive selection and assessment over one catalog.
pub struct ReplSession {
    catalog: Arc<Catalog>,
    evaluator: Arc<dyn Evaluator>,
    resolver: ReportResolver,
    session: AssessmentSession,
}

impl ReplSession {
    pub fn new(
        catalog: Catalog,
        evaluator: Arc<dyn Evaluator>,
        resolver: ReportResolver,
        policy: SessionPolicy,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            evaluator,
            resolver,
            session: AssessmentSession::new(policy),
        }
    }

    pub async fn run(mut self) -> Result<(), AssessError> {
        println!("{}", renderer::render_welcome(&self.catalog, self.evaluator.name()));

        let config = Config::builder()
            .auto_add_history(true)
            .build();
        let mut editor: Editor<ReplHelper, DefaultHistory> = Editor::with_config(config)
            .map_err(|e| AssessError::Internal(format!("Failed to initialize REPL: {}", e)))?;
        editor.set_helper(Some(ReplHelper::for_catalog(&self.catalog)));

        loop {
            let prompt = self.prompt();
            let readline = {
                // rustyline is blocking
                let result = tokio::task::spawn_blocking(move || {
                    let result = editor.readline(&prompt);
                    (editor, result)
                })
                .await
                .map_err(|e| AssessError::Internal(format!("Readline task failed: {}", e)))?;

                editor = result.0;
                result.1
            };

            match readline {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    match commands::parse_command(&line) {
                        Ok(cmd) => {
                            if self.handle_command(cmd).await {
                                break;
                            }
                        }
                        Err(msg) => {
                            println!("{}", renderer::render_error(&msg));
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    println!("{}", renderer::render_error(&format!("Input error: {}", err)));
                    break;
                }
            }
        }

        println!("{}", renderer::render_info("Goodbye."));
        Ok(())
    }

    fn prompt(&self) -> String {
        let marker = match self.session.phase() {
            SessionPhase::Results => style("results".to_string()).cyan().to_string(),
            _ => style(format!("{} selected", self.session.selection().len())).dim().to_string(),
        };
        format!("{} {} ", style("ism-assess").cyan().bold(), style(format!("[{}]>", marker)))
    }

    /// Returns true when the REPL should exit.
    async fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Exit => return true,

            SlashCommand::Help { command } => {
                println!("{}", renderer::render_help(command.as_deref()));
            }

            SlashCommand::Categories => {
                println!("{}", renderer::render_categories(&self.catalog, self.session.selection()));
            }

            SlashCommand::Controls { category } => {
                let category = self.category_name(category);
                match self.catalog.controls(&category) {
                    Some(controls) => {
                        println!("{}", renderer::render_controls(&category, controls, self.session.selection()));
                    }
                    None => self.report_error(AssessError::UnknownCategory(category)),
                }
            }

            SlashCommand::Show { control_id } => match self.catalog.find(&control_id) {
                Some(control) => {
                    let categories = self.catalog.categories_of(&control_id);
                    let selected = self.session.selection().contains(&control_id);
                    println!("{}", renderer::render_control(control, &categories, selected));
                }
                None => self.report_error(AssessError::UnknownControl(control_id)),
            },

            SlashCommand::Toggle { control_ids } => {
                for control_id in control_ids {
                    if let Err(e) = self.toggle(&control_id) {
                        self.report_error(e);
                        break;
                    }
                }
            }

            SlashCommand::SelectAll { category } => {
                let category = self.category_name(category);
                match self.session.select_all_in_category(&category, &self.catalog) {
                    Ok(added) => println!(
                        "{}",
                        renderer::render_success(&format!(
                            "Added {} from {} ({} selected)",
                            pluralize(added, "control"),
                            category,
                            self.session.selection().len()
                        ))
                    ),
                    Err(e) => self.report_error(e),
                }
            }

            SlashCommand::Selection => {
                println!("{}", renderer::render_selection(self.session.selection(), &self.catalog));
            }

            SlashCommand::Clear => {
                let had_results = self.session.phase() == SessionPhase::Results;
                match self.session.clear() {
                    Ok(()) if had_results => println!("{}", renderer::render_success("Results cleared")),
                    Ok(()) => println!("{}", renderer::render_success("Selection cleared")),
                    Err(e) => self.report_error(e),
                }
            }

            SlashCommand::Assess => self.handle_assess().await,

            SlashCommand::Results => match self.session.results() {
                Some(results) => println!("{}", renderer::render_results(results, &self.catalog)),
                None => println!("{}", renderer::render_info("No results yet. Use /assess.")),
            },

            SlashCommand::Status => {
                println!("{}", renderer::render_status(&self.session, self.evaluator.name()));
            }
        }
        false
    }

    /// The exact name wins; stray spacing typed around a name is forgiven.
    fn category_name(&self, raw: String) -> String {
        if self.catalog.controls(&raw).is_some() {
            raw
        } else {
            raw.trim().to_string()
        }
    }

    fn toggle(&mut self, control_id: &str) -> Result<(), AssessError> {
        if !self.catalog.contains(control_id) {
            return Err(AssessError::UnknownControl(control_id.to_string()));
        }
        let message = if self.session.toggle(control_id)? {
            format!("Selected {}", control_id)
        } else {
            format!("Deselected {}", control_id)
        };
        println!("{}", renderer::render_success(&message));
        Ok(())
    }

    async fn handle_assess(&mut self) {
        let spinner = (self.session.phase() == SessionPhase::Idle && !self.session.selection().is_empty())
            .then(|| dispatch_spinner(self.session.selection().len(), self.evaluator.name()));

        let outcome = self.session.dispatch(self.evaluator.as_ref(), &self.resolver).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        match outcome {
            Ok(results) => println!("{}", renderer::render_results(results, &self.catalog)),
            Err(e) if e.is_dispatch_failure() => {
                println!("{}", renderer::render_error(&format!("Assessment failed: {}", e)));
                if !self.session.selection().is_empty() {
                    println!("{}", renderer::render_info("Selection kept. Run /assess to retry."));
                }
            }
            Err(e) => self.report_error(e),
        }
    }

    fn report_error(&self, error: AssessError) {
        println!("{}", renderer::render_error(&error.to_string()));
    }
}
