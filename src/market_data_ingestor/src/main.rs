use std::io;

use anyhow::Context;
use clap::Parser;
use market_data_ingestor::{
    aggregate::aggregate,
    cli::commands::{Cli, Commands},
    models::request_params::CandlesRequest,
    providers::{
        live_rest::params::LiveParams,
        registry::build_provider,
        synthetic::SyntheticParams,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let live = LiveParams {
        base_url: cli.base_url.clone(),
        ..Default::default()
    };
    let provider = build_provider(cli.source, SyntheticParams::default(), &live)
        .context("failed to create data provider")?;

    let json = match cli.command {
        Commands::Candles {
            symbol,
            points,
            interval,
            aggregate: merge,
        } => {
            let candles = provider
                .fetch_candles(CandlesRequest::new(symbol.clone(), points, interval))
                .await
                .with_context(|| format!("failed to fetch candles for {symbol}"))?;
            let candles = if merge { aggregate(&candles, interval) } else { candles };
            serde_json::to_string_pretty(&candles)?
        }
        Commands::News { symbol } => {
            let news = provider
                .fetch_news(&symbol)
                .await
                .with_context(|| format!("failed to fetch news for {symbol}"))?;
            serde_json::to_string_pretty(&news)?
        }
    };
    println!("{json}");
    Ok(())
}
