/// All slash commands supported by the REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Categories,
    Controls {
        category: String,
    },
    Show {
        control_id: String,
    },
    Toggle {
        control_ids: Vec<String>,
    },
    SelectAll {
        category: String,
    },
    Selection,
    Clear,
    Assess,
    Results,
    Status,
    Help {
        command: Option<String>,
    },
    Exit,
}

/// Description of a command for help display.
pub struct CommandHelp {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub static COMMAND_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "categories",
        usage: "/categories",
        description: "List catalog categories and how many controls each holds",
    },
    CommandHelp {
        name: "controls",
        usage: "/controls <category>",
        description: "List the controls of a category, marking the selected ones",
    },
    CommandHelp {
        name: "show",
        usage: "/show <control-id>",
        description: "Show the full record of a control",
    },
    CommandHelp {
        name: "toggle",
        usage: "/toggle <control-id> [control-id...]",
        description: "Add or remove controls from the selection",
    },
    CommandHelp {
        name: "select-all",
        usage: "/select-all <category>",
        description: "Add every control of a category to the selection",
    },
    CommandHelp {
        name: "selection",
        usage: "/selection",
        description: "Show the currently selected controls",
    },
    CommandHelp {
        name: "clear",
        usage: "/clear",
        description: "Empty the selection, or discard the last results",
    },
    CommandHelp {
        name: "assess",
        usage: "/assess",
        description: "Send the selection to the evaluator and wait for the verdicts",
    },
    CommandHelp {
        name: "results",
        usage: "/results",
        description: "Show the last assessment summary and report link",
    },
    CommandHelp {
        name: "status",
        usage: "/status",
        description: "Show the session phase, selection size and evaluator",
    },
    CommandHelp {
        name: "help",
        usage: "/help [command]",
        description: "Show help for all or a specific command",
    },
    CommandHelp {
        name: "exit",
        usage: "/exit",
        description: "Quit the REPL",
    },
];

/// All command names for tab completion.
pub static COMMAND_NAMES: &[&str] = &[
    "/categories",
    "/controls",
    "/show",
    "/toggle",
    "/select-all",
    "/selection",
    "/clear",
    "/assess",
    "/results",
    "/status",
    "/help",
    "/exit",
];

/// Commands whose argument is a category name.
pub static CATEGORY_COMMANDS: &[&str] = &["/controls", "/select-all"];

/// Commands whose arguments are control ids.
pub static CONTROL_COMMANDS: &[&str] = &["/show", "/toggle"];

/// Parse a raw input line into a SlashCommand, or return an error message.
pub fn parse_command(input: &str) -> Result<SlashCommand, String> {
    let input = input.trim_start();
    if !input.starts_with('/') {
        return Err("Commands must start with /. Type /help for available commands.".into());
    }

    let (cmd, rest) = split_command(input);
    let args: Vec<&str> = rest.split_whitespace().collect();
    let args = args.as_slice();

    match cmd {
        "/categories" => Ok(SlashCommand::Categories),
        "/controls" => Ok(SlashCommand::Controls {
            category: required_category(cmd, rest)?,
        }),
        "/show" => match args {
            [id] => Ok(SlashCommand::Show { control_id: id.to_string() }),
            [] => Err("Usage: /show <control-id>".into()),
            _ => Err("/show takes a single control id".into()),
        },
        "/toggle" => {
            if args.is_empty() {
                return Err("Usage: /toggle <control-id> [control-id...]".into());
            }
            Ok(SlashCommand::Toggle {
                control_ids: args.iter().map(|s| s.to_string()).collect(),
            })
        }
        "/select-all" => Ok(SlashCommand::SelectAll {
            category: required_category(cmd, rest)?,
        }),
        "/selection" => Ok(SlashCommand::Selection),
        "/clear" => Ok(SlashCommand::Clear),
        "/assess" => Ok(SlashCommand::Assess),
        "/results" => Ok(SlashCommand::Results),
        "/status" => Ok(SlashCommand::Status),
        "/help" => Ok(SlashCommand::Help {
            command: args.first().map(|s| s.trim_start_matches('/').to_string()),
        }),
        "/exit" | "/quit" | "/q" => Ok(SlashCommand::Exit),
        other => Err(format!("Unknown command: {}. Type /help for available commands.", other)),
    }
}

/// Split off the command token. The remainder loses only the single
/// separator character and is otherwise returned untouched.
fn split_command(input: &str) -> (&str, &str) {
    match input.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((idx, sep)) => (&input[..idx], &input[idx + sep.len_utf8()..]),
        None => (input, ""),
    }
}

// Category names may contain any spacing, so the raw rest of the line is the name.
fn required_category(cmd: &str, rest: &str) -> Result<String, String> {
    if rest.trim().is_empty() {
        return Err(format!("Usage: {} <category>", cmd));
    }
    Ok(rest.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("/categories"), Ok(SlashCommand::Categories));
        assert_eq!(parse_command("  /assess  "), Ok(SlashCommand::Assess));
        assert_eq!(parse_command("/q"), Ok(SlashCommand::Exit));
    }

    #[test]
    fn test_parse_category_with_spaces() {
        assert_eq!(
            parse_command("/select-all Cyber Security Incidents"),
            Ok(SlashCommand::SelectAll { category: "Cyber Security Incidents".into() })
        );
    }

    #[test]
    fn test_category_spacing_is_kept_verbatim() {
        assert_eq!(
            parse_command("/controls Access  Control"),
            Ok(SlashCommand::Controls { category: "Access  Control".into() })
        );
        assert_eq!(
            parse_command("/select-all  Padded "),
            Ok(SlashCommand::SelectAll { category: " Padded ".into() })
        );
        assert!(parse_command("/controls   ").is_err());
    }

    #[test]
    fn test_parse_toggle_multiple() {
        assert_eq!(
            parse_command("/toggle ISM-1 ISM-2"),
            Ok(SlashCommand::Toggle { control_ids: vec!["ISM-1".into(), "ISM-2".into()] })
        );
    }

    #[test]
    fn test_missing_arguments_rejected() {
        assert!(parse_command("/toggle").is_err());
        assert!(parse_command("/controls").is_err());
        assert!(parse_command("/show").is_err());
        assert!(parse_command("/show a b").is_err());
    }

    #[test]
    fn test_help_strips_slash() {
        assert_eq!(
            parse_command("/help /assess"),
            Ok(SlashCommand::Help { command: Some("assess".into()) })
        );
    }

    #[test]
    fn test_unknown_and_bare_input() {
        assert!(parse_command("/scan").unwrap_err().contains("Unknown command"));
        assert!(parse_command("assess").unwrap_err().contains("must start with /"));
    }

    #[test]
    fn test_every_command_has_help() {
        for name in COMMAND_NAMES {
            let bare = name.trim_start_matches('/');
            assert!(COMMAND_HELP.iter().any(|c| c.name == bare), "no help for {}", name);
        }
    }
}
