use console::style;

use crate::cli::commands::CatalogArgs;
use crate::cli::context::load_context;
use crate::config::Overrides;
use crate::errors::AssessError;
use crate::models::Control;

pub async fn handle_catalog(args: CatalogArgs, config_path: Option<&str>) -> Result<(), AssessError> {
    let overrides = Overrides {
        catalog: args.catalog.clone(),
        ..Default::default()
    };
    let ctx = load_context(config_path, &overrides).await?;

    let selected: Vec<(&str, &[Control])> = match args.category.as_deref() {
        Some(name) => {
            let controls = ctx.catalog.controls(name)
                .ok_or_else(|| AssessError::UnknownCategory(name.to_string()))?;
            vec![(name, controls)]
        }
        None => ctx.catalog.iter().collect(),
    };

    if args.json {
        let map = selected
            .iter()
            .map(|(name, controls)| serde_json::to_value(controls).map(|v| (name.to_string(), v)))
            .collect::<Result<serde_json::Map<String, serde_json::Value>, _>>()?;
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    for (name, controls) in selected {
        println!("{} ({})", style(name).cyan().bold(), controls.len());
        for control in controls {
            println!("  {:<12} {}", control.control_id, style(&control.description).dim());
        }
        println!();
    }
    Ok(())
}
