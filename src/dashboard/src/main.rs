use std::{io, sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use dashboard::{
    cli::{Cli, Command, OutputFormat, ShowArgs, ViewArgs},
    config::{DashboardConfig, load_config},
    logging::init_tracing,
    render::{JsonRenderer, Renderer, TerminalRenderer},
    state::{Dashboard, RefreshOutcome},
};
use tokio::{
    task::JoinSet,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Assets => list_assets(&config),
        Command::Show(args) => show(config, args).await,
        Command::Watch { view, every_secs } => watch(config, view, every_secs).await,
    }
}

fn list_assets(config: &DashboardConfig) -> anyhow::Result<()> {
    for asset in &config.assets {
        let marker = if asset.symbol == config.default_asset { "*" } else { " " };
        println!("{marker} {:<8} {}", asset.symbol, asset.label);
    }
    Ok(())
}

async fn show(config: DashboardConfig, args: ShowArgs) -> anyhow::Result<()> {
    let symbol = config.resolve_asset(args.view.asset.as_deref())?.symbol.clone();
    let dash = Dashboard::from_config(config)?;
    dash.refresh(&symbol).await?;

    let view = dash.view(args.view.tab.as_deref());
    let mut renderer: Box<dyn Renderer> = match args.format {
        OutputFormat::Text => Box::new(TerminalRenderer::new(io::stdout().lock())),
        OutputFormat::Json => Box::new(JsonRenderer::new(io::stdout().lock())),
    };
    renderer.render(&view)
}

async fn watch(config: DashboardConfig, args: ViewArgs, every_secs: u64) -> anyhow::Result<()> {
    let symbol = config.resolve_asset(args.asset.as_deref())?.symbol.clone();
    let dash = Arc::new(Dashboard::from_config(config)?);
    info!(%symbol, every_secs, provider = dash.provider_name(), "watching");

    let mut ticker = time::interval(Duration::from_secs(every_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut refreshes = JoinSet::new();
    let mut renderer = TerminalRenderer::new(io::stdout());
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                refreshes.spawn(dash.refresh_task(&symbol));
            }
            Some(done) = refreshes.join_next() => {
                match done.context("refresh task failed to complete")?? {
                    RefreshOutcome::Refreshed => {
                        println!();
                        renderer.render(&dash.view(args.tab.as_deref()))?;
                    }
                    RefreshOutcome::Skipped => debug!("previous refresh still running"),
                }
            }
            _ = &mut ctrl_c => {
                info!("interrupted, exiting");
                break;
            }
        }
    }
    Ok(())
}
