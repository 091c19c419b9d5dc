mod cli;
mod utils;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use cmc_cli::client::{CallContext, CancelHandle, Client};
use cmc_cli::config::Settings;

use crate::cli::Commands;

/// Basic information about cryptocurrencies from the public CoinMarketCap API
#[derive(Debug, Parser)]
#[command(name = "cmc-cli", version, about, long_about = None)]
struct Cli {
    /// Give up when a command takes longer than this many seconds
    #[arg(long, global = true)]
    deadline_secs: Option<u64>,
    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Cancellable context for one invocation, with the optional deadline applied.
fn call_context(deadline_secs: Option<u64>) -> (CallContext, CancelHandle) {
    let (ctx, cancel) = CallContext::background().with_cancel();
    match deadline_secs {
        Some(secs) => (ctx.with_timeout(Duration::from_secs(secs)), cancel),
        None => (ctx, cancel),
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = Settings::load()?;

    log::info!(
        "app.start v1={} v3={} http_timeout_secs={} deadline_secs={:?}",
        settings.api_v1_base_url,
        settings.api_v3_base_url,
        settings.http_timeout_secs,
        cli.deadline_secs
    );

    let client = Client::from_settings(&settings)?;

    let (ctx, cancel) = call_context(cli.deadline_secs);

    // Ctrl-C aborts the in-flight request instead of killing the process mid-write.
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("app.interrupt cancelling in-flight request");
            cancel.cancel();
        }
    });

    cli::handle(&cli.command, &client, &ctx, cli.json).await?;
    Ok(())
}
