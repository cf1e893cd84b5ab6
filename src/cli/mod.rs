//! Rendering for the `exrate` binary's subcommands.

pub mod codes;
pub mod convert;
pub mod rates;
pub mod series;
pub mod setup;
pub mod ui;

use std::future::Future;

use anyhow::{Context, Result};

/// Awaits `fut` behind a spinner, attaching `what` to any error.
pub(crate) async fn fetch<T>(what: &str, fut: impl Future<Output = crate::Result<T>>) -> Result<T> {
    let pb = ui::new_spinner(&format!("Fetching {what}..."));
    let result = fut.await;
    pb.finish_and_clear();
    result.with_context(|| format!("Failed to fetch {what}"))
}

pub(crate) fn as_strs(symbols: &[String]) -> Vec<&str> {
    symbols.iter().map(String::as_str).collect()
}
