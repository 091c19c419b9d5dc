//! Command-line commands.

pub mod chart;
pub mod table;

use std::io::{self, Write};

use clap::{value_parser, Args, Subcommand};
use cmc_cli::client::{CallContext, ChartRange, Client, SortBy, SortType};
use comfy_table::Table;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a table with info about cryptocurrencies
    Table(TableArgs),
    /// Print the CoinMarketCap ID of a symbol
    Id {
        /// Ticker symbol, e.g. BTC
        symbol: String,
    },
    /// Print historical price points of a symbol
    Chart(ChartArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Coins number in a table
    #[arg(long, default_value_t = 10, value_parser = value_parser!(u32).range(1..))]
    pub number: u32,
    /// Rank of the first coin in the table (1-based)
    #[arg(long, default_value_t = 1, value_parser = value_parser!(u32).range(1..))]
    pub offset: u32,
    /// Sort field (name, symbol, market_cap, price, total_supply, max_supply)
    #[arg(long, default_value_t = SortBy::MarketCap)]
    pub sort_by: SortBy,
    /// Sort direction (asc, desc)
    #[arg(long, default_value_t = SortType::Desc)]
    pub sort_type: SortType,
}

#[derive(Args, Debug, Clone)]
pub struct ChartArgs {
    /// Ticker symbol, e.g. BTC
    pub symbol: String,
    /// Time range (1D, 7D, 1M, 3M, 1Y, YTD, ALL)
    #[arg(short, long, default_value_t = ChartRange::Week)]
    pub range: ChartRange,
    /// Number of most recent points to print
    #[arg(long, default_value_t = 20, value_parser = value_parser!(u32).range(1..))]
    pub last: u32,
}

/// Write pretty JSON to stdout using a streaming writer.
fn write_json_output<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}

fn write_table(table: &Table) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{table}")?;
    Ok(())
}

pub async fn handle(
    command: &Commands,
    client: &Client,
    ctx: &CallContext,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        Commands::Table(args) => {
            let symbols = client
                .list_symbols(ctx, args.offset, args.number, args.sort_by, args.sort_type)
                .await?;
            if json {
                write_json_output(&symbols)?;
            } else if symbols.is_empty() {
                println!("No cryptocurrencies found.");
            } else {
                write_table(&table::symbols_table(&symbols)?)?;
            }
        }
        Commands::Id { symbol } => {
            let id = client.resolve_symbol_id(ctx, symbol).await?;
            if json {
                write_json_output(&serde_json::json!({ "symbol": symbol, "id": id }))?;
            } else {
                println!("{symbol}: {id}");
            }
        }
        Commands::Chart(args) => {
            let id = client.resolve_symbol_id(ctx, &args.symbol).await?;
            let points = client.chart_points(ctx, id, args.range).await?;
            let recent = chart::tail(chart::ordered_points(points), args.last as usize);
            if json {
                write_json_output(&recent)?;
            } else if recent.is_empty() {
                println!("No chart points for {} ({}).", args.symbol, args.range);
            } else {
                write_table(&chart::chart_table(&recent))?;
            }
        }
    }

    Ok(())
}
