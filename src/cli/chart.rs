//! Chart points table.

use std::cmp::Ordering;
use std::collections::HashMap;

use cmc_cli::client::ChartPoint;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use crate::utils::{format_ts, usd, usd_grouped};

/// Orders points by numeric timestamp; keys that are not numbers go last.
pub fn ordered_points(points: HashMap<String, ChartPoint>) -> Vec<(String, ChartPoint)> {
    let mut ordered: Vec<(String, ChartPoint)> = points.into_iter().collect();
    ordered.sort_by(|(a, _), (b, _)| match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
    ordered
}

/// Keeps the `last` most recent of already ordered points.
pub fn tail(mut ordered: Vec<(String, ChartPoint)>, last: usize) -> Vec<(String, ChartPoint)> {
    let skip = ordered.len().saturating_sub(last);
    ordered.drain(..skip);
    ordered
}

pub fn chart_table(points: &[(String, ChartPoint)]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        ["Time (UTC)", "Price", "Volume", "Market Cap"]
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    let missing = || "-".to_string();
    for (ts, point) in points {
        table.add_row(vec![
            format_ts(ts),
            point.price().map(|p| usd(p, 5)).unwrap_or_else(missing),
            point.volume().map(usd_grouped).unwrap_or_else(missing),
            point.market_cap().map(usd_grouped).unwrap_or_else(missing),
        ]);
    }
    table
}
