use super::terminal::TerminalSurface;
use super::ui;
use crate::charts::SvgCanvas;
use crate::core::conversion::Conversion;
use crate::core::{ConverterWidget, IndicatorProvider};
use anyhow::Result;
use comfy_table::Cell;
use std::path::Path;

/// Runs a single conversion and draws its history chart on `canvas`.
pub async fn run(
    provider: &dyn IndicatorProvider,
    canvas: SvgCanvas,
    amount: &str,
    currency: &str,
) -> Result<()> {
    let mut widget = ConverterWidget::new(provider, canvas);
    let mut surface = TerminalSurface::new(true);
    surface.set_input(amount, currency);

    // The status line already shows the failure; the error only sets the
    // exit code.
    let conversion = widget.on_convert(&mut surface).await?;
    display_history(&conversion);
    if let Some(chart) = widget.chart().current() {
        print_chart_location(&chart.path);
    }
    Ok(())
}

pub(crate) fn print_chart_location(path: &Path) {
    println!(
        "{}",
        ui::style_text(
            &format!("History chart written to {}", path.display()),
            ui::StyleType::Subtle
        )
    );
}

fn display_history(conversion: &Conversion) {
    if conversion.history.is_empty() {
        return;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell(&format!("CLP per {}", conversion.code.to_uppercase())),
    ]);

    let newest = conversion.history.len() - 1;
    for (i, point) in conversion.history.iter().enumerate() {
        let value = if i == newest {
            ui::latest_value_cell(point.value)
        } else {
            ui::value_cell(point.value)
        };
        table.add_row(vec![
            Cell::new(point.day().format("%d-%m-%Y").to_string()),
            value,
        ]);
    }
    println!("{table}");
}
