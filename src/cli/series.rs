use std::collections::BTreeSet;

use super::{as_strs, fetch, ui};
use crate::Exchange;
use crate::decode::{FluctuationMap, RateMap, TimeSeriesMap};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Color};

pub async fn timeseries(
    exchange: &Exchange,
    start: &str,
    end: &str,
    symbols: &[String],
) -> Result<String> {
    let series = match as_strs(symbols).as_slice() {
        [] => fetch("timeseries", exchange.timeseries_all(start, end)).await?,
        [symbol] => fetch("timeseries", exchange.timeseries_single(start, end, symbol))
            .await?
            .into_iter()
            .map(|(date, rate)| (date, RateMap::from([(symbol.to_string(), rate)])))
            .collect(),
        many => fetch("timeseries", exchange.timeseries_multiple(start, end, many)).await?,
    };
    Ok(render_timeseries(exchange.base(), &series))
}

pub async fn fluctuation(
    exchange: &Exchange,
    start: &str,
    end: &str,
    symbols: &[String],
) -> Result<String> {
    let fluctuation = match as_strs(symbols).as_slice() {
        [] => fetch("fluctuation", exchange.fluctuation_all(start, end)).await?,
        [symbol] => {
            let record =
                fetch("fluctuation", exchange.fluctuation_single(start, end, symbol)).await?;
            FluctuationMap::from([(symbol.to_string(), record)])
        }
        many => fetch("fluctuation", exchange.fluctuation_multiple(start, end, many)).await?,
    };
    Ok(render_fluctuation(exchange.base(), start, end, &fluctuation))
}

/// One row per date, one column per currency seen in any day.
pub fn render_timeseries(base: &str, series: &TimeSeriesMap) -> String {
    let codes: BTreeSet<&String> = series.values().flat_map(|rates| rates.keys()).collect();

    let mut table = ui::new_styled_table();
    let mut header = vec![ui::header_cell("Date")];
    header.extend(codes.iter().map(|code| ui::header_cell(code)));
    table.set_header(header);

    for (date, rates) in series {
        let mut row = vec![Cell::new(date)];
        row.extend(codes.iter().map(|code| match rates.get(*code) {
            Some(rate) => ui::rate_cell(*rate),
            None => Cell::new("N/A")
                .fg(Color::DarkGrey)
                .set_alignment(CellAlignment::Right),
        }));
        table.add_row(row);
    }

    format!(
        "{}\n{table}",
        ui::style_text(&format!("Daily rates (1 {base})"), ui::StyleType::Title)
    )
}

pub fn render_fluctuation(
    base: &str,
    start: &str,
    end: &str,
    fluctuation: &FluctuationMap,
) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate on {start}")),
        ui::header_cell(&format!("Rate on {end}")),
        ui::header_cell("Change"),
        ui::header_cell("Change (%)"),
    ]);
    for (code, record) in fluctuation {
        table.add_row(vec![
            Cell::new(code),
            ui::rate_cell(record.start_rate),
            ui::rate_cell(record.end_rate),
            ui::change_cell(record.change, ""),
            ui::change_cell(record.change_pct, "%"),
        ]);
    }
    format!(
        "{}\n{table}",
        ui::style_text(&format!("Fluctuation (1 {base})"), ui::StyleType::Title)
    )
}
