//! Client for the [exchangerate.host](https://exchangerate.host) currency rates API.
//!
//! [`Exchange`] is the entry point: it holds a base currency and exposes latest,
//! historical, conversion, timeseries and fluctuation queries plus the lists of
//! supported fiat codes, cryptocurrencies and sources. Inputs are validated
//! before any request is sent. Caching is left to the caller.
//!
//! ```no_run
//! # async fn demo() -> exrate::Result<()> {
//! use rust_decimal::Decimal;
//!
//! let mut ex = exrate::Exchange::new("USD");
//! let eur = ex.convert_to("EUR", Decimal::TEN).await?;
//! ex.set_base("EUR")?;
//! let rates = ex.latest_rates_multiple(&["USD", "JPY"]).await?;
//! # let _ = (eur, rates);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod context;
pub mod core;
pub mod decode;
pub mod error;
pub mod exchange;
pub mod query;
pub mod transport;
pub mod validate;

pub use context::{CancelHandle, Context};
pub use decode::{CodeDataMap, FluctuationMap, FluctuationRecord, RateMap, TimeSeriesMap};
pub use error::{ApiFailure, Error, Result};
pub use exchange::Exchange;
pub use query::Query;
pub use transport::Client;
pub use validate::{validate_code, validate_date, validate_symbols, validate_time_frame};

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::cli::codes::Listing;
use crate::core::config::AppConfig;

/// A subcommand of the `exrate` binary.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Latest {
        symbols: Vec<String>,
    },
    Historical {
        date: String,
        symbols: Vec<String>,
    },
    Convert {
        target: String,
        amount: Decimal,
        date: Option<String>,
    },
    Timeseries {
        start: String,
        end: String,
        symbols: Vec<String>,
    },
    Fluctuation {
        start: String,
        end: String,
        symbols: Vec<String>,
    },
    Forex,
    Crypto,
    Sources,
}

/// Builds an [`Exchange`] from `config`, with `base` overriding the configured base.
pub fn exchange_from_config(config: &AppConfig, base: Option<&str>) -> anyhow::Result<Exchange> {
    let mut exchange = Exchange::with_client(&config.base, Client::new(&config.api.base_url));
    if let Some(base) = base {
        exchange.set_base(base)?;
    }
    exchange.set_timeout(config.api.timeout());
    Ok(exchange)
}

/// Runs `command` and returns the rendered output.
pub async fn render_command(
    command: AppCommand,
    config_path: Option<&str>,
    base: Option<&str>,
) -> anyhow::Result<String> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let exchange = exchange_from_config(&config, base)?;
    info!(base = exchange.base(), command = ?command, "Running command");

    match command {
        AppCommand::Latest { symbols } => cli::rates::latest(&exchange, &symbols).await,
        AppCommand::Historical { date, symbols } => {
            cli::rates::historical(&exchange, &date, &symbols).await
        }
        AppCommand::Convert {
            target,
            amount,
            date,
        } => cli::convert::run(&exchange, &target, amount, date.as_deref()).await,
        AppCommand::Timeseries {
            start,
            end,
            symbols,
        } => cli::series::timeseries(&exchange, &start, &end, &symbols).await,
        AppCommand::Fluctuation {
            start,
            end,
            symbols,
        } => cli::series::fluctuation(&exchange, &start, &end, &symbols).await,
        AppCommand::Forex => cli::codes::run(&exchange, Listing::Forex).await,
        AppCommand::Crypto => cli::codes::run(&exchange, Listing::Crypto).await,
        AppCommand::Sources => cli::codes::run(&exchange, Listing::Sources).await,
    }
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    base: Option<&str>,
) -> anyhow::Result<()> {
    let output = render_command(command, config_path, base).await?;
    println!("{output}");
    Ok(())
}
