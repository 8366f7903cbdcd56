use clap::{CommandFactory, Parser, Subcommand};
use pesoconv::core::WidgetError;
use pesoconv::core::log::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for pesoconv::AppCommand {
    fn from(cmd: Commands) -> pesoconv::AppCommand {
        match cmd {
            Commands::Currencies => pesoconv::AppCommand::Currencies,
            Commands::Convert {
                amount,
                currency,
                chart,
            } => pesoconv::AppCommand::Convert {
                amount,
                currency,
                chart_path: chart,
            },
            Commands::Interactive => pesoconv::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List the currencies available for conversion
    Currencies,
    /// Convert an amount of Chilean pesos and chart the last 10 days
    Convert {
        /// Amount in CLP
        amount: String,
        /// Currency code (dolar, euro or bitcoin)
        currency: String,
        /// Where to write the SVG history chart
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Convert repeatedly, replacing the chart after each conversion
    Interactive,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => pesoconv::cli::setup::setup(),
        Some(cmd) => pesoconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => Cli::command().print_help().map_err(Into::into),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // Widget failures were already printed on the status line.
        Err(e) if e.is::<WidgetError>() => {
            tracing::debug!(error = ?e, "Conversion failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "Application failed");
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}
