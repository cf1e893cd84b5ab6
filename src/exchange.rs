//! The [`Exchange`] facade: one method per API operation.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::instrument;

use crate::context::Context;
use crate::core::CurrencyRateProvider;
use crate::decode::{
    self, CodeDataMap, FluctuationMap, FluctuationRecord, RateMap, TimeSeriesMap,
};
use crate::error::{Error, Result};
use crate::query::Query;
use crate::transport::{Client, Endpoint};
use crate::validate::{validate_code, validate_date};

/// Session against the rates API, holding the base currency and the context
/// every call runs under.
///
/// The base passed to [`Exchange::new`] is not validated; it is checked when a
/// request is built from it.
#[derive(Debug, Clone)]
pub struct Exchange {
    base: String,
    ctx: Context,
    timeout: Option<Duration>,
    client: Client,
}

fn missing(code: &str) -> Error {
    Error::MalformedResponse(format!("no rate for {code} in response"))
}

impl Exchange {
    pub fn new(base: &str) -> Self {
        Self::with_client(base, Client::default())
    }

    /// Uses `client` for transport, e.g. one pointed at another base URL.
    pub fn with_client(base: &str, client: Client) -> Self {
        Exchange {
            base: base.to_string(),
            ctx: Context::background(),
            timeout: None,
            client,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn set_base(&mut self, base: &str) -> Result<()> {
        validate_code(base)?;
        self.base = base.to_string();
        Ok(())
    }

    /// Binds every later call on this instance to `ctx`.
    pub fn set_context(&mut self, ctx: Context) {
        self.ctx = ctx;
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Limits each later call to `timeout`, counted from when the call starts.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn get(&self, endpoint: Endpoint<'_>, query: &Query) -> Result<serde_json::Value> {
        match self.timeout {
            Some(timeout) => {
                let ctx = self.ctx.clone().with_timeout(timeout);
                self.client.get(endpoint, query, &ctx).await
            }
            None => self.client.get(endpoint, query, &self.ctx).await,
        }
    }

    async fn convert(&self, target: &str, amount: Decimal, date: Option<&str>) -> Result<Decimal> {
        let mut query = Query::new().from(&self.base).to(target).amount(amount);
        if let Some(date) = date {
            query = query.date(date);
        }
        decode::decode_conversion(self.get(Endpoint::Convert, &query).await?)
    }

    /// Converts `amount` of the base currency into `target` at the latest rate.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn convert_to(&self, target: &str, amount: Decimal) -> Result<Decimal> {
        self.convert(target, amount, None).await
    }

    /// Converts `amount` of the base currency into `target` at the rate of `date`.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn convert_at(&self, date: &str, target: &str, amount: Decimal) -> Result<Decimal> {
        self.convert(target, amount, Some(date)).await
    }

    async fn latest(&self, symbols: &[&str]) -> Result<RateMap> {
        let query = Query::new().base(&self.base).symbols(symbols.iter().copied());
        decode::decode_rates(self.get(Endpoint::Latest, &query).await?)
    }

    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn latest_rates_single(&self, symbol: &str) -> Result<Decimal> {
        let rates = self.latest(&[symbol]).await?;
        rates.get(symbol).copied().ok_or_else(|| missing(symbol))
    }

    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn latest_rates_multiple(&self, symbols: &[&str]) -> Result<RateMap> {
        self.latest(symbols).await
    }

    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn latest_rates_all(&self) -> Result<RateMap> {
        self.latest(&[]).await
    }

    async fn historical(&self, date: &str, symbols: &[&str]) -> Result<RateMap> {
        // The date travels in the path, so it is checked here rather than by the query
        validate_date(date)?;
        let query = Query::new().base(&self.base).symbols(symbols.iter().copied());
        decode::decode_rates(self.get(Endpoint::Historical(date), &query).await?)
    }

    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn historical_rates_single(&self, date: &str, symbol: &str) -> Result<Decimal> {
        let rates = self.historical(date, &[symbol]).await?;
        rates.get(symbol).copied().ok_or_else(|| missing(symbol))
    }

    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn historical_rates_multiple(&self, date: &str, symbols: &[&str]) -> Result<RateMap> {
        self.historical(date, symbols).await
    }

    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn historical_rates_all(&self, date: &str) -> Result<RateMap> {
        self.historical(date, &[]).await
    }

    async fn timeseries(&self, start: &str, end: &str, symbols: &[&str]) -> Result<TimeSeriesMap> {
        let query = Query::new()
            .base(&self.base)
            .symbols(symbols.iter().copied())
            .time_frame(start, end);
        decode::decode_time_series(self.get(Endpoint::Timeseries, &query).await?)
    }

    /// Daily rates of `symbol` from `start` to `end`, keyed by date.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn timeseries_single(
        &self,
        start: &str,
        end: &str,
        symbol: &str,
    ) -> Result<BTreeMap<String, Decimal>> {
        let series = self.timeseries(start, end, &[symbol]).await?;
        series
            .into_iter()
            .map(|(date, rates)| {
                let rate = rates.get(symbol).copied().ok_or_else(|| missing(symbol))?;
                Ok((date, rate))
            })
            .collect()
    }

    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn timeseries_multiple(
        &self,
        start: &str,
        end: &str,
        symbols: &[&str],
    ) -> Result<TimeSeriesMap> {
        self.timeseries(start, end, symbols).await
    }

    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn timeseries_all(&self, start: &str, end: &str) -> Result<TimeSeriesMap> {
        self.timeseries(start, end, &[]).await
    }

    async fn fluctuation(
        &self,
        start: &str,
        end: &str,
        symbols: &[&str],
    ) -> Result<FluctuationMap> {
        let query = Query::new()
            .base(&self.base)
            .symbols(symbols.iter().copied())
            .time_frame(start, end);
        decode::decode_fluctuation(self.get(Endpoint::Fluctuation, &query).await?)
    }

    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn fluctuation_single(
        &self,
        start: &str,
        end: &str,
        symbol: &str,
    ) -> Result<FluctuationRecord> {
        let fluctuation = self.fluctuation(start, end, &[symbol]).await?;
        fluctuation
            .get(symbol)
            .copied()
            .ok_or_else(|| missing(symbol))
    }

    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn fluctuation_multiple(
        &self,
        start: &str,
        end: &str,
        symbols: &[&str],
    ) -> Result<FluctuationMap> {
        self.fluctuation(start, end, symbols).await
    }

    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn fluctuation_all(&self, start: &str, end: &str) -> Result<FluctuationMap> {
        self.fluctuation(start, end, &[]).await
    }

    async fn code_data(&self, endpoint: Endpoint<'_>, key: &str) -> Result<CodeDataMap> {
        decode::decode_code_data(self.get(endpoint, &Query::new()).await?, key)
    }

    /// Supported fiat currency codes, sorted.
    #[instrument(skip(self))]
    pub async fn forex_codes(&self) -> Result<Vec<String>> {
        Ok(self.forex_data().await?.into_keys().collect())
    }

    /// Supported fiat currencies with their `description` and `code`.
    #[instrument(skip(self))]
    pub async fn forex_data(&self) -> Result<CodeDataMap> {
        self.code_data(Endpoint::Symbols, "symbols").await
    }

    /// Supported cryptocurrency codes, sorted.
    #[instrument(skip(self))]
    pub async fn crypto_codes(&self) -> Result<Vec<String>> {
        Ok(self.crypto_data().await?.into_keys().collect())
    }

    /// Supported cryptocurrencies with their metadata fields.
    #[instrument(skip(self))]
    pub async fn crypto_data(&self) -> Result<CodeDataMap> {
        self.code_data(Endpoint::Cryptocurrencies, "cryptocurrencies")
            .await
    }

    /// Supported rate sources, sorted.
    #[instrument(skip(self))]
    pub async fn sources(&self) -> Result<Vec<String>> {
        Ok(self.sources_data().await?.into_keys().collect())
    }

    #[instrument(skip(self))]
    pub async fn sources_data(&self) -> Result<CodeDataMap> {
        self.code_data(Endpoint::Sources, "sources").await
    }
}

#[async_trait]
impl CurrencyRateProvider for Exchange {
    /// Latest rate of `to` against `from`, leaving this exchange's base untouched.
    async fn get_rate(&self, from: &str, to: &str) -> Result<Decimal> {
        if from == to {
            validate_code(from)?;
            return Ok(Decimal::ONE);
        }
        let mut exchange = self.clone();
        exchange.set_base(from)?;
        exchange.latest_rates_single(to).await
    }
}
