use super::{fetch, ui};
use crate::Exchange;
use anyhow::Result;
use rust_decimal::Decimal;

/// Converts `amount` of the base currency into `target`, at `date` when given.
pub async fn run(
    exchange: &Exchange,
    target: &str,
    amount: Decimal,
    date: Option<&str>,
) -> Result<String> {
    let result = match date {
        Some(date) => fetch("conversion", exchange.convert_at(date, target, amount)).await?,
        None => fetch("conversion", exchange.convert_to(target, amount)).await?,
    };
    Ok(render_conversion(
        exchange.base(),
        target,
        amount,
        result,
        date,
    ))
}

pub fn render_conversion(
    base: &str,
    target: &str,
    amount: Decimal,
    result: Decimal,
    date: Option<&str>,
) -> String {
    let converted = format!("{} {target}", result.normalize());
    let line = format!(
        "{} {base} = {}",
        amount.normalize(),
        ui::style_text(&converted, ui::StyleType::Value)
    );
    match date {
        Some(date) => format!(
            "{line} {}",
            ui::style_text(&format!("(on {date})"), ui::StyleType::Subtle)
        ),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_conversion() {
        console::set_colors_enabled(false);
        let line = render_conversion("USD", "EUR", dec!(10.0), dec!(9.0120), None);
        assert_eq!(line, "10 USD = 9.012 EUR");

        let line = render_conversion("USD", "EUR", dec!(10), dec!(7.669), Some("2012-12-12"));
        assert_eq!(line, "10 USD = 7.669 EUR (on 2012-12-12)");
    }
}
