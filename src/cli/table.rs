//! Listing table.

use cmc_cli::client::SymbolRecord;
use cmc_cli::Result;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use crate::utils::{group_thousands, percent, usd, usd_grouped};

pub const HEADERS: [&str; 8] = [
    "Name",
    "Price",
    "1h%",
    "24h%",
    "7d%",
    "Market Cap",
    "Volume(24h)",
    "Circulating Supply",
];

/// Cells of one listing row, formatted from the record's first quote.
pub fn symbol_row(symbol: &SymbolRecord) -> Result<Vec<String>> {
    let quote = symbol.primary_quote()?;
    Ok(vec![
        format!("{} ({})", symbol.name, symbol.symbol),
        usd(quote.price, 5),
        percent(quote.percent_change_1h),
        percent(quote.percent_change_24h),
        percent(quote.percent_change_7d),
        usd_grouped(quote.market_cap),
        usd_grouped(quote.volume_24h),
        format!("{} ({})", group_thousands(symbol.circulating_supply), symbol.symbol),
    ])
}

pub fn symbols_table(symbols: &[SymbolRecord]) -> Result<Table> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        HEADERS
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    for symbol in symbols {
        table.add_row(symbol_row(symbol)?);
    }
    Ok(table)
}
