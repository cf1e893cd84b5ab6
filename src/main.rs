use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use exrate::core::log::init_logging;
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Base currency, overrides the configured one
    #[arg(short, long, global = true)]
    base: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for exrate::AppCommand {
    fn from(cmd: Commands) -> exrate::AppCommand {
        match cmd {
            Commands::Latest { symbols } => exrate::AppCommand::Latest { symbols },
            Commands::Historical { date, symbols } => {
                exrate::AppCommand::Historical { date, symbols }
            }
            Commands::Convert {
                target,
                amount,
                date,
            } => exrate::AppCommand::Convert {
                target,
                amount,
                date,
            },
            Commands::Timeseries {
                start,
                end,
                symbols,
            } => exrate::AppCommand::Timeseries {
                start,
                end,
                symbols,
            },
            Commands::Fluctuation {
                start,
                end,
                symbols,
            } => exrate::AppCommand::Fluctuation {
                start,
                end,
                symbols,
            },
            Commands::Forex => exrate::AppCommand::Forex,
            Commands::Crypto => exrate::AppCommand::Crypto,
            Commands::Sources => exrate::AppCommand::Sources,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show the latest rates, for all currencies unless SYMBOLS are given
    Latest { symbols: Vec<String> },
    /// Show the rates as of DATE (YYYY-MM-DD)
    Historical { date: String, symbols: Vec<String> },
    /// Convert AMOUNT of the base currency into TARGET
    Convert {
        target: String,
        amount: Decimal,
        /// Use the rate of this date (YYYY-MM-DD) instead of the latest
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show daily rates between START and END
    Timeseries {
        start: String,
        end: String,
        symbols: Vec<String>,
    },
    /// Show how rates moved between START and END
    Fluctuation {
        start: String,
        end: String,
        symbols: Vec<String>,
    },
    /// List supported fiat currencies
    Forex,
    /// List supported cryptocurrencies
    Crypto,
    /// List rate sources
    Sources,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => exrate::cli::setup::setup(),
        Some(cmd) => {
            exrate::run_command(cmd.into(), cli.config_path.as_deref(), cli.base.as_deref()).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
