//! Currency conversion abstractions

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// How many units of `to` one unit of `from` buys.
    async fn get_rate(&self, from: &str, to: &str) -> Result<Decimal>;
}
