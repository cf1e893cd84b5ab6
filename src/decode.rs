//! Typed views of the API responses.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// Currency code to rate.
pub type RateMap = BTreeMap<String, Decimal>;

/// `YYYY-MM-DD` date to the rates of that day.
pub type TimeSeriesMap = BTreeMap<String, RateMap>;

/// Currency code to its metadata fields (`description`, or `name`/`symbol` for crypto).
pub type CodeDataMap = BTreeMap<String, BTreeMap<String, String>>;

/// How one rate moved across a timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct FluctuationRecord {
    pub start_rate: Decimal,
    pub end_rate: Decimal,
    pub change: Decimal,
    pub change_pct: Decimal,
}

/// Currency code to its fluctuation.
pub type FluctuationMap = BTreeMap<String, FluctuationRecord>;

#[derive(Debug, Deserialize)]
struct RatesResponse<T> {
    rates: T,
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    result: Decimal,
}

fn decode<T: DeserializeOwned>(payload: Value, what: &str) -> Result<T> {
    serde_json::from_value(payload)
        .map_err(|e| Error::MalformedResponse(format!("unexpected {what} payload: {e}")))
}

/// Decodes `{"<key>": {"<code>": {<string fields>}}}` as returned by
/// `/symbols`, `/cryptocurrencies` and `/sources`.
pub fn decode_code_data(mut payload: Value, key: &str) -> Result<CodeDataMap> {
    let data = payload
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| Error::MalformedResponse(format!("missing {key:?} field")))?;
    let data: CodeDataMap = decode(data, key)?;
    debug!(entries = data.len(), "Decoded {key}");
    Ok(data)
}

/// Decodes `{"rates": {code: number}}` from `/latest` or a historical date.
pub fn decode_rates(payload: Value) -> Result<RateMap> {
    let RatesResponse { rates } = decode::<RatesResponse<RateMap>>(payload, "rates")?;
    debug!(rates = rates.len(), "Decoded rates");
    Ok(rates)
}

/// Decodes `{"result": number}` from `/convert`.
pub fn decode_conversion(payload: Value) -> Result<Decimal> {
    let ConvertResponse { result } = decode(payload, "conversion")?;
    Ok(result)
}

/// Decodes `{"rates": {date: {code: number}}}` from `/timeseries`.
pub fn decode_time_series(payload: Value) -> Result<TimeSeriesMap> {
    let RatesResponse { rates } = decode::<RatesResponse<TimeSeriesMap>>(payload, "timeseries")?;
    debug!(days = rates.len(), "Decoded timeseries");
    Ok(rates)
}

/// Decodes `{"rates": {code: {start_rate, end_rate, change, change_pct}}}` from `/fluctuation`.
pub fn decode_fluctuation(payload: Value) -> Result<FluctuationMap> {
    let RatesResponse { rates } =
        decode::<RatesResponse<FluctuationMap>>(payload, "fluctuation")?;
    debug!(rates = rates.len(), "Decoded fluctuation");
    Ok(rates)
}
