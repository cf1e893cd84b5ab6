//! HTTP transport for the exchangerate.host API.

use std::sync::LazyLock;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::context::Context;
use crate::error::{ApiFailure, Error, Result};
use crate::query::Query;

pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate.host";

static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// API endpoints, relative to the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Symbols,
    Cryptocurrencies,
    Sources,
    Latest,
    Convert,
    /// Rates as of a `YYYY-MM-DD` date.
    Historical(&'a str),
    Timeseries,
    Fluctuation,
}

impl Endpoint<'_> {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Symbols => "/symbols".to_string(),
            Endpoint::Cryptocurrencies => "/cryptocurrencies".to_string(),
            Endpoint::Sources => "/sources".to_string(),
            Endpoint::Latest => "/latest".to_string(),
            Endpoint::Convert => "/convert".to_string(),
            Endpoint::Historical(date) => format!("/{date}"),
            Endpoint::Timeseries => "/timeseries".to_string(),
            Endpoint::Fluctuation => "/fluctuation".to_string(),
        }
    }
}

/// Issues one GET per call and checks the `success` flag of the reply.
///
/// Clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Client {
    /// A client against `base_url` using the process-wide HTTP client.
    pub fn new(base_url: &str) -> Self {
        Self::with_http(SHARED_CLIENT.clone(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> Self {
        Client {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends `query` to `endpoint` and returns the decoded JSON document.
    ///
    /// The query is validated before anything is sent.
    #[instrument(name = "ExchangeGet", skip(self, query, ctx), fields(path = %endpoint.path()))]
    pub async fn get(&self, endpoint: Endpoint<'_>, query: &Query, ctx: &Context) -> Result<Value> {
        let params = query.to_params()?;
        let url = format!("{}{}", self.base_url, endpoint.path());
        debug!(url = %url, params = ?params, "Requesting rates data");

        let payload = ctx
            .run(async {
                let response = self.http.get(&url).query(&params).send().await?;
                debug!(status = %response.status(), "Received response");
                Ok::<_, Error>(response.json::<Value>().await?)
            })
            .await?;

        check_success(payload)
    }
}

fn check_success(payload: Value) -> Result<Value> {
    match payload.get("success").and_then(Value::as_bool) {
        Some(true) => Ok(payload),
        _ => {
            let failure = api_failure(&payload);
            debug!(error = %failure, "API reported failure");
            Err(Error::InvalidApiResponse(failure))
        }
    }
}

fn api_failure(payload: &Value) -> ApiFailure {
    let Some(error) = payload.get("error") else {
        return ApiFailure::default();
    };
    if let Some(message) = error.as_str() {
        return ApiFailure {
            info: Some(message.to_string()),
            ..ApiFailure::default()
        };
    }
    ApiFailure {
        code: error.get("code").and_then(Value::as_i64),
        kind: error
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_string),
        info: error
            .get("info")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}
