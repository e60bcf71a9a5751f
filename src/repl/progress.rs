use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a dispatch is in flight.
pub fn dispatch_spinner(items: usize, evaluator: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("  {spinner:.cyan} {msg} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    bar.set_style(style);
    bar.set_message(format!(
        "Assessing {} control{} via {}",
        items,
        if items == 1 { "" } else { "s" },
        evaluator
    ));
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}
