pub mod charts;
pub mod cli;
pub mod core;
pub mod providers;

use crate::charts::SvgCanvas;
use crate::core::config::AppConfig;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

pub enum AppCommand {
    Currencies,
    Convert {
        amount: String,
        currency: String,
        chart_path: Option<PathBuf>,
    },
    Interactive,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Peso converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = providers::MindicadorProvider::new(&config.provider.base_url)?;
    let chart = &config.chart;

    match command {
        AppCommand::Currencies => cli::currencies::run(&provider).await,
        AppCommand::Convert {
            amount,
            currency,
            chart_path,
        } => {
            let path = chart_path.unwrap_or_else(|| chart.path.clone());
            let canvas = SvgCanvas::new(path, chart.width, chart.height);
            cli::convert::run(&provider, canvas, &amount, &currency).await
        }
        AppCommand::Interactive => {
            let canvas = SvgCanvas::new(chart.path.clone(), chart.width, chart.height);
            cli::interactive::run(&provider, canvas).await
        }
    }
}
