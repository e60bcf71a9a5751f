use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::catalog::Catalog;
use crate::repl::commands::{CATEGORY_COMMANDS, COMMAND_NAMES, CONTROL_COMMANDS};

/// Hints and completes command names, category names and control ids.
#[derive(Default)]
pub struct ReplHelper {
    categories: Vec<String>,
    control_ids: Vec<String>,
}

impl ReplHelper {
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self {
            categories: catalog.categories().into_iter().map(str::to_string).collect(),
            control_ids: catalog.distinct_controls().into_iter().cloned().collect(),
        }
    }

    fn arguments_for(&self, cmd: &str) -> &[String] {
        if CATEGORY_COMMANDS.contains(&cmd) {
            &self.categories
        } else if CONTROL_COMMANDS.contains(&cmd) {
            &self.control_ids
        } else {
            &[]
        }
    }
}

impl Helper for ReplHelper {}
impl Validator for ReplHelper {}
impl Highlighter for ReplHelper {}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let trimmed = line.trim();
        if !trimmed.starts_with('/') || trimmed.contains(' ') {
            return None;
        }
        for name in COMMAND_NAMES {
            if name.starts_with(trimmed) && *name != trimmed {
                return Some(name[trimmed.len()..].to_string());
            }
        }
        None
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let trimmed = prefix.trim_start();

        if !trimmed.starts_with('/') {
            return Ok((0, vec![]));
        }

        // Past the command name: complete its argument
        if let Some(space_idx) = trimmed.find(' ') {
            let cmd = &trimmed[..space_idx];
            let rest = trimmed[space_idx..].trim_start();

            // Category names can contain spaces; control ids cannot.
            let arg_prefix = if CATEGORY_COMMANDS.contains(&cmd) {
                rest
            } else {
                rest.rsplit(' ').next().unwrap_or(rest)
            };
            let arg_start = pos - arg_prefix.len();

            let matches: Vec<Pair> = self
                .arguments_for(cmd)
                .iter()
                .filter(|candidate| candidate.starts_with(arg_prefix))
                .map(|candidate| Pair {
                    display: candidate.clone(),
                    replacement: candidate.clone(),
                })
                .collect();

            return Ok((arg_start, matches));
        }

        let start = pos - trimmed.len();
        let matches: Vec<Pair> = COMMAND_NAMES
            .iter()
            .filter(|name| name.starts_with(trimmed))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();

        Ok((start, matches))
    }
}
