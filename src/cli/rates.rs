use super::{as_strs, fetch, ui};
use crate::Exchange;
use crate::decode::RateMap;
use anyhow::Result;
use comfy_table::Cell;

/// Latest rates for `symbols`, or every currency when empty.
pub async fn latest(exchange: &Exchange, symbols: &[String]) -> Result<String> {
    let rates = match as_strs(symbols).as_slice() {
        [] => fetch("latest rates", exchange.latest_rates_all()).await?,
        [symbol] => {
            let rate = fetch("latest rate", exchange.latest_rates_single(symbol)).await?;
            RateMap::from([(symbol.to_string(), rate)])
        }
        many => fetch("latest rates", exchange.latest_rates_multiple(many)).await?,
    };
    Ok(render_rates("Latest rates", exchange.base(), &rates))
}

/// Rates as of `date` for `symbols`, or every currency when empty.
pub async fn historical(exchange: &Exchange, date: &str, symbols: &[String]) -> Result<String> {
    let rates = match as_strs(symbols).as_slice() {
        [] => fetch("historical rates", exchange.historical_rates_all(date)).await?,
        [symbol] => {
            let rate = fetch(
                "historical rate",
                exchange.historical_rates_single(date, symbol),
            )
            .await?;
            RateMap::from([(symbol.to_string(), rate)])
        }
        many => {
            fetch(
                "historical rates",
                exchange.historical_rates_multiple(date, many),
            )
            .await?
        }
    };
    Ok(render_rates(
        &format!("Rates on {date}"),
        exchange.base(),
        &rates,
    ))
}

pub fn render_rates(title: &str, base: &str, rates: &RateMap) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate (1 {base})")),
    ]);
    for (code, rate) in rates {
        table.add_row(vec![Cell::new(code), ui::rate_cell(*rate)]);
    }
    format!(
        "{}\n{table}",
        ui::style_text(title, ui::StyleType::Title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_rates() {
        let rates = RateMap::from([
            ("EUR".to_string(), dec!(0.9012)),
            ("JPY".to_string(), dec!(110.50)),
        ]);
        let output = render_rates("Latest rates", "USD", &rates);
        assert!(output.contains("Latest rates"));
        assert!(output.contains("Rate (1 USD)"));
        assert!(output.contains("EUR"));
        assert!(output.contains("0.9012"));
        assert!(output.contains("110.5"));
        assert!(output.find("EUR").unwrap() < output.find("JPY").unwrap());
    }
}
