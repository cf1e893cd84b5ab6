//! Input checks applied before any request is sent.

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Oldest date the API has rates for.
pub const OLDEST_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1999, 1, 3) {
    Some(date) => date,
    None => panic!("invalid oldest date"),
};

/// Longest span a timeframe may cover, in hours.
pub const MAX_TIMEFRAME_HOURS: f64 = 8759.992992006;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates a single currency code.
///
/// Only the length is checked; codes are not matched against a currency list.
pub fn validate_code(code: &str) -> Result<()> {
    if code.chars().count() != 3 {
        return Err(Error::InvalidCode(code.to_string()));
    }
    Ok(())
}

/// Validates every code in `symbols`, stopping at the first invalid one.
pub fn validate_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<()> {
    symbols
        .iter()
        .try_for_each(|code| validate_code(code.as_ref()))
}

/// Checks the `YYYY-MM-DD` shape: month 01-12 and a day whose tens digit is 0-3.
fn has_date_shape(date: &str) -> bool {
    let b = date.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return false;
    }
    let digits = [0, 1, 2, 3, 5, 6, 8, 9];
    if !digits.iter().all(|&i| b[i].is_ascii_digit()) {
        return false;
    }
    let month_ok = match (b[5], b[6]) {
        (b'0', m) => m != b'0',
        (b'1', m) => m <= b'2',
        _ => false,
    };
    month_ok && b[8] <= b'3'
}

/// Validates a `YYYY-MM-DD` date string and returns the parsed date.
///
/// A string with the right shape that is not a calendar date (`2012-02-30`)
/// is treated like a date out of range.
pub fn validate_date(date: &str) -> Result<NaiveDate> {
    if !has_date_shape(date) {
        return Err(Error::InvalidDateFormat(date.to_string()));
    }
    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(date.to_string()))?;
    if parsed < OLDEST_DATE {
        return Err(Error::InvalidDate(date.to_string()));
    }
    Ok(parsed)
}

/// Checks that `start` is not after `end` and the span stays under the ceiling.
pub fn validate_time_frame(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end < start {
        return Err(Error::InvalidTimeFrame { start, end });
    }
    let hours = (end - start).num_seconds() as f64 / 3600.0;
    if hours > MAX_TIMEFRAME_HOURS {
        return Err(Error::TimeframeExceeded { start, end });
    }
    Ok(())
}
