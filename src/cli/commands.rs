use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

#[derive(Parser)]
#[command(name = "ism-assess", version, about = "Select ISM compliance controls and assess them against an evaluator service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the normalized control catalog
    Catalog(CatalogArgs),
    /// Load and validate the catalog and configuration
    Validate(ValidateArgs),
    /// Select controls and run one assessment
    Assess(AssessArgs),
    /// Start an interactive selection session
    Repl(ReplArgs),
    /// Start the HTTP interaction API
    Serve(ServeArgs),
}

/// Where controls come from and where they are sent.
#[derive(Args, Clone, Default)]
pub struct SourceArgs {
    /// Control catalog JSON file
    #[arg(long)]
    pub catalog: Option<String>,

    /// Evaluator base URL
    #[arg(long)]
    pub evaluator: Option<String>,
}

impl SourceArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            catalog: self.catalog.clone(),
            evaluator_url: self.evaluator.clone(),
            ..Default::default()
        }
    }
}

#[derive(Args, Clone)]
pub struct CatalogArgs {
    /// Control catalog JSON file
    #[arg(long)]
    pub catalog: Option<String>,

    /// Only print this category
    #[arg(long)]
    pub category: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Control catalog JSON file
    #[arg(long)]
    pub catalog: Option<String>,
}

#[derive(Args, Clone)]
pub struct AssessArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Control to assess (repeatable)
    #[arg(short = 'c', long = "control")]
    pub controls: Vec<String>,

    /// Select every control of a category (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ReplArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address
    #[arg(long)]
    pub host: Option<String>,
}
