//! [`Error`] type.

use std::fmt;

use chrono::NaiveDate;

/// Failure details reported by the upstream API alongside `"success": false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiFailure {
    pub code: Option<i64>,
    pub kind: Option<String>,
    pub info: Option<String>,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.kind, &self.info) {
            (None, None, None) => write!(f, "unknown API error"),
            (code, kind, info) => {
                let mut parts = Vec::new();
                if let Some(code) = code {
                    parts.push(format!("code {code}"));
                }
                if let Some(kind) = kind {
                    parts.push(kind.clone());
                }
                if let Some(info) = info {
                    parts.push(info.clone());
                }
                write!(f, "{}", parts.join(": "))
            }
        }
    }
}

/// An error from input validation, the API, or the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The currency code is not 3 characters long.
    #[error("invalid currency code: {0:?}")]
    InvalidCode(String),
    /// The date isn't formatted as `YYYY-MM-DD`.
    #[error("date format must be YYYY-MM-DD, got {0:?}")]
    InvalidDateFormat(String),
    /// The date is older than the oldest date the API serves.
    #[error("oldest possible date is 1999-01-03, got {0:?}")]
    InvalidDate(String),
    /// The end of a timeframe is before its start.
    #[error("start date {start} must not be after end date {end}")]
    InvalidTimeFrame { start: NaiveDate, end: NaiveDate },
    /// The timeframe spans more than the API allows.
    #[error("maximum allowed timeframe is 365 days, {start} to {end} is longer")]
    TimeframeExceeded { start: NaiveDate, end: NaiveDate },
    /// The API answered with `"success": false` or without a `success` flag.
    #[error("API error: {0}")]
    InvalidApiResponse(ApiFailure),
    /// The response body does not have the shape the endpoint promises.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// The request context was cancelled.
    #[error("request cancelled")]
    Cancelled,
    /// The request context deadline passed before the response arrived.
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

impl Error {
    /// Whether this error was raised while validating input, before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidCode(_)
                | Error::InvalidDateFormat(_)
                | Error::InvalidDate(_)
                | Error::InvalidTimeFrame { .. }
                | Error::TimeframeExceeded { .. }
        )
    }

    /// Whether this error is a transport-level failure (network, cancellation, deadline).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Cancelled | Error::DeadlineExceeded
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
