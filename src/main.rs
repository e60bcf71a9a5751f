use clap::Parser;
use tracing_subscriber::EnvFilter;

use ism_assess::cli::{self, Commands};
use ism_assess::errors::AssessError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    // Initialize logging
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(!cli.no_color)
            .with_writer(std::io::stderr)
            .init();
    }

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Catalog(args) => cli::catalog::handle_catalog(args, config_path).await,
        Commands::Validate(args) => cli::validate::handle_validate(args, config_path).await,
        Commands::Assess(args) => cli::assess::handle_assess(args, config_path, cli.quiet).await,
        Commands::Repl(args) => cli::repl::handle_repl(args, config_path).await,
        Commands::Serve(args) => cli::serve::handle_serve(args, config_path).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(&e));
    }
}

fn exit_code(error: &AssessError) -> i32 {
    match error {
        AssessError::Config(_) => 2,
        AssessError::CatalogLoad(_) => 3,
        _ => 1,
    }
}
