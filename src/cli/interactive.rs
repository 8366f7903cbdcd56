use super::convert::print_chart_location;
use super::terminal::TerminalSurface;
use super::ui;
use crate::charts::SvgCanvas;
use crate::core::{ConverterWidget, IndicatorProvider};
use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

const PROMPT: &str = "amount currency> ";

/// Loads the catalog once, then converts one `<amount> <currency>` line at a
/// time from stdin until `quit` or end of input.
pub async fn run(provider: &dyn IndicatorProvider, canvas: SvgCanvas) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    run_with_input(provider, canvas, stdin, true).await
}

pub async fn run_with_input<R>(
    provider: &dyn IndicatorProvider,
    canvas: SvgCanvas,
    input: R,
    prompt: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut widget = ConverterWidget::new(provider, canvas);
    let mut surface = TerminalSurface::new(prompt);

    if widget.load_catalog(&mut surface).await.is_ok() {
        surface.print_options();
    }
    println!(
        "{}",
        ui::style_text(
            "Enter an amount in CLP and a currency code or number, or `quit`.",
            ui::StyleType::Subtle
        )
    );

    let mut lines = input.lines();
    loop {
        if prompt {
            print!("{PROMPT}");
            std::io::stdout().flush().context("Failed to flush stdout")?;
        }

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        let mut tokens = line.split_whitespace();
        let amount = tokens.next().unwrap_or_default();
        if matches!(amount, "quit" | "exit" | "q") {
            break;
        }
        if amount.is_empty() {
            continue;
        }
        let currency = tokens.next().unwrap_or_default();
        debug!(%amount, %currency, "Convert triggered");

        surface.set_input(amount, currency);
        if widget.on_convert(&mut surface).await.is_ok() {
            if let Some(chart) = widget.chart().current() {
                print_chart_location(&chart.path);
            }
        }
    }
    Ok(())
}
