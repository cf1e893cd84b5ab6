use super::{fetch, ui};
use crate::Exchange;
use crate::decode::CodeDataMap;
use anyhow::Result;
use comfy_table::{Cell, Color};

/// Which code listing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Forex,
    Crypto,
    Sources,
}

impl Listing {
    fn title(&self) -> &'static str {
        match self {
            Listing::Forex => "Fiat currencies",
            Listing::Crypto => "Cryptocurrencies",
            Listing::Sources => "Rate sources",
        }
    }

    /// Field shown next to each code.
    fn field(&self) -> &'static str {
        match self {
            Listing::Forex | Listing::Sources => "description",
            Listing::Crypto => "name",
        }
    }
}

pub async fn run(exchange: &Exchange, listing: Listing) -> Result<String> {
    let data = match listing {
        Listing::Forex => fetch("currency list", exchange.forex_data()).await?,
        Listing::Crypto => fetch("cryptocurrency list", exchange.crypto_data()).await?,
        Listing::Sources => fetch("source list", exchange.sources_data()).await?,
    };
    Ok(render_codes(listing, &data))
}

pub fn render_codes(listing: Listing, data: &CodeDataMap) -> String {
    let field = listing.field();
    let mut header_label = field.to_string();
    if let Some(first) = header_label.get_mut(0..1) {
        first.make_ascii_uppercase();
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell(&header_label)]);
    for (code, fields) in data {
        let value = match fields.get(field) {
            Some(value) => Cell::new(value),
            None => Cell::new("N/A").fg(Color::DarkGrey),
        };
        table.add_row(vec![Cell::new(code), value]);
    }
    format!(
        "{} {}\n{table}",
        ui::style_text(listing.title(), ui::StyleType::Title),
        ui::style_text(&format!("({})", data.len()), ui::StyleType::Subtle)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn entry(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_forex_codes() {
        let data = CodeDataMap::from([
            ("USD".to_string(), entry(&[("description", "United States Dollar")])),
            ("EUR".to_string(), entry(&[("description", "Euro")])),
        ]);
        let output = render_codes(Listing::Forex, &data);
        assert!(output.contains("Fiat currencies"));
        assert!(output.contains("Description"));
        assert!(output.contains("United States Dollar"));
        assert!(output.find("EUR").unwrap() < output.find("USD").unwrap());
    }

    #[test]
    fn test_render_crypto_codes_missing_field() {
        let data = CodeDataMap::from([
            ("BTC".to_string(), entry(&[("name", "Bitcoin"), ("symbol", "BTC")])),
            ("XYZ".to_string(), entry(&[("symbol", "XYZ")])),
        ]);
        let output = render_codes(Listing::Crypto, &data);
        assert!(output.contains("Name"));
        assert!(output.contains("Bitcoin"));
        assert!(output.contains("N/A"));
    }
}
