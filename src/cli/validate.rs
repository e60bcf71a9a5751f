use crate::cli::commands::ValidateArgs;
use crate::cli::context::load_context;
use crate::config::Overrides;
use crate::errors::AssessError;

pub async fn handle_validate(args: ValidateArgs, config_path: Option<&str>) -> Result<(), AssessError> {
    let overrides = Overrides {
        catalog: args.catalog,
        ..Default::default()
    };
    let ctx = load_context(config_path, &overrides).await?;

    if let Some(path) = config_path {
        println!("Configuration is valid: {}", path);
    }
    println!(
        "Catalog is valid: {} ({} categories, {} entries, {} distinct controls)",
        ctx.settings.catalog_path.display(),
        ctx.catalog.categories().len(),
        ctx.catalog.total_controls(),
        ctx.catalog.distinct_controls().len(),
    );
    Ok(())
}
