use super::terminal::TerminalSurface;
use super::ui;
use crate::core::{IndicatorProvider, load_catalog};
use anyhow::Result;
use tracing::debug;

/// Lists the currencies available for conversion.
pub async fn run(provider: &dyn IndicatorProvider) -> Result<()> {
    let mut surface = TerminalSurface::new(true);

    // Failures are reported on the status line; whatever loaded is still shown.
    if let Err(e) = load_catalog(provider, &mut surface).await {
        debug!(error = ?e, "Catalog load failed");
    }

    if !surface.options().is_empty() {
        println!(
            "\n{}",
            ui::style_text("Available currencies", ui::StyleType::Title)
        );
        surface.print_options();
    }
    Ok(())
}
