//! Request parameters and their rendering into URL query pairs.

use rust_decimal::Decimal;

use crate::error::Result;
use crate::validate::{validate_code, validate_date, validate_symbols, validate_time_frame};

/// Parameters for one API request.
///
/// Fields are validated when the query is rendered with [`Query::to_params`],
/// not when they are set, so a query can be assembled piecemeal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub base: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub amount: Option<Decimal>,
    pub symbols: Vec<String>,
    pub date: Option<String>,
    pub time_frame: Option<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn time_frame(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.time_frame = Some((start.into(), end.into()));
        self
    }

    /// Validates the populated fields and renders them as query pairs.
    ///
    /// The first invalid field aborts rendering with its error.
    pub fn to_params(&self) -> Result<Vec<(&'static str, String)>> {
        let mut params = Vec::new();

        for (key, code) in [("base", &self.base), ("from", &self.from), ("to", &self.to)] {
            if let Some(code) = code {
                validate_code(code)?;
                params.push((key, code.clone()));
            }
        }

        if let Some(amount) = self.amount {
            params.push(("amount", amount.normalize().to_string()));
        }

        if !self.symbols.is_empty() {
            validate_symbols(&self.symbols)?;
            params.push(("symbols", self.symbols.join(",")));
        }

        if let Some(date) = &self.date {
            validate_date(date)?;
            params.push(("date", date.clone()));
        }

        if let Some((start, end)) = &self.time_frame {
            let start_date = validate_date(start)?;
            let end_date = validate_date(end)?;
            validate_time_frame(start_date, end_date)?;
            params.push(("start_date", start.clone()));
            params.push(("end_date", end.clone()));
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::str::FromStr;

    fn get<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_empty_query_renders_nothing() {
        assert!(Query::new().to_params().unwrap().is_empty());
    }

    #[test]
    fn test_only_populated_fields_are_rendered() {
        let params = Query::new()
            .base("USD")
            .symbols(["EUR", "JPY"])
            .to_params()
            .unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(get(&params, "base"), Some("USD"));
        assert_eq!(get(&params, "symbols"), Some("EUR,JPY"));
        assert_eq!(get(&params, "from"), None);
        assert_eq!(get(&params, "amount"), None);
    }

    #[test]
    fn test_conversion_fields() {
        let params = Query::new()
            .from("USD")
            .to("EUR")
            .amount(Decimal::from_str("10.50").unwrap())
            .date("2012-12-12")
            .to_params()
            .unwrap();
        assert_eq!(get(&params, "from"), Some("USD"));
        assert_eq!(get(&params, "to"), Some("EUR"));
        assert_eq!(get(&params, "amount"), Some("10.5"));
        assert_eq!(get(&params, "date"), Some("2012-12-12"));
    }

    #[test]
    fn test_amount_keeps_fraction_and_small_values() {
        for (amount, expected) in [("1", "1"), ("0.25", "0.25"), ("1234.5678", "1234.5678")] {
            let params = Query::new()
                .amount(Decimal::from_str(amount).unwrap())
                .to_params()
                .unwrap();
            assert_eq!(get(&params, "amount"), Some(expected));
        }
    }

    #[test]
    fn test_time_frame_fields() {
        let params = Query::new()
            .time_frame("2012-12-10", "2012-12-12")
            .to_params()
            .unwrap();
        assert_eq!(get(&params, "start_date"), Some("2012-12-10"));
        assert_eq!(get(&params, "end_date"), Some("2012-12-12"));
    }

    #[test]
    fn test_invalid_symbol_anywhere_fails() {
        let single = Query::new().symbols(["UNKNOWN"]).to_params();
        let multiple = Query::new().symbols(["USD", "EUR", "UNKNOWN"]).to_params();
        assert!(matches!(single, Err(Error::InvalidCode(ref c)) if c == "UNKNOWN"));
        assert!(matches!(multiple, Err(Error::InvalidCode(ref c)) if c == "UNKNOWN"));
    }

    #[test]
    fn test_invalid_codes_fail() {
        assert!(matches!(
            Query::new().base("US").to_params(),
            Err(Error::InvalidCode(_))
        ));
        assert!(matches!(
            Query::new().from("USD").to("EURO").to_params(),
            Err(Error::InvalidCode(c)) if c == "EURO"
        ));
    }

    #[test]
    fn test_time_frame_checks_both_ends() {
        let result = Query::new()
            .time_frame("2012-12-10", "2012-13-12")
            .to_params();
        assert!(matches!(result, Err(Error::InvalidDateFormat(d)) if d == "2012-13-12"));

        let result = Query::new()
            .time_frame("2012-12-12", "2012-12-10")
            .to_params();
        assert!(matches!(result, Err(Error::InvalidTimeFrame { .. })));

        let result = Query::new()
            .time_frame("2010-01-01", "2012-01-01")
            .to_params();
        assert!(matches!(result, Err(Error::TimeframeExceeded { .. })));
    }

    #[test]
    fn test_invalid_date_fails() {
        assert!(matches!(
            Query::new().date("1998-12-31").to_params(),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(
            Query::new().date("12/12/2012").to_params(),
            Err(Error::InvalidDateFormat(_))
        ));
    }
}
