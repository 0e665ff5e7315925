// Main entry point - Dependency injection and command dispatch
mod application;
mod cli;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use chrono::{Local, TimeDelta};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::controller::DashboardController;
use crate::cli::{Args, Command, DashboardArgs, GenerateArgs, ServeArgs};
use crate::infrastructure::config::{load_config, AppConfig, ClientSettings};
use crate::infrastructure::csv_store::CsvStore;
use crate::infrastructure::generator::{generate_rows, write_csv};
use crate::infrastructure::http_source::HttpRecordSource;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;
use crate::presentation::terminal::{TerminalChartSurface, TerminalView};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout belongs to the terminal dashboard
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Serve(args) => serve(load_config()?, args).await,
        Command::Generate(args) => generate(args, load_config),
        Command::Dashboard(args) => dashboard(load_config()?, args).await,
    }
}

async fn serve(config: AppConfig, args: ServeArgs) -> anyhow::Result<()> {
    let csv_path = args.csv_path.unwrap_or(config.data.csv_path);
    let state = Arc::new(AppState {
        csv_store: CsvStore::new(csv_path),
        static_dir: config.server.static_dir.clone(),
    });
    let router = build_router(state.clone());

    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.server.address()))?;
    tracing::info!(
        "Starting energy-dashboard on {} serving {}",
        addr,
        state.csv_store.path().display()
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}

/// Configuration is only read when no `--output` is given.
fn generate<F>(args: GenerateArgs, config: F) -> anyhow::Result<()>
where
    F: FnOnce() -> anyhow::Result<AppConfig>,
{
    let output = match args.output {
        Some(output) => output,
        None => config()?.data.csv_path,
    };
    let start = Local::now().naive_local() - TimeDelta::hours(args.hours_back);

    let rows = generate_rows(args.rows, start, &mut rand::rng());
    write_csv(&output, &rows)?;

    tracing::info!("Wrote {} sample readings to {}", rows.len(), output.display());
    Ok(())
}

async fn dashboard(config: AppConfig, args: DashboardArgs) -> anyhow::Result<()> {
    let source = Arc::new(record_source(&config.client, args.api_base)?);
    tracing::info!("Reading records from {}", source.url());

    let view = TerminalView::default();
    let events = view.selection_input().events(tokio::io::BufReader::new(tokio::io::stdin()));
    let controller = DashboardController::new(source, view, TerminalChartSurface::new(args.chart_out));

    controller.run(events).await;
    Ok(())
}

fn record_source(client: &ClientSettings, api_base: Option<String>) -> anyhow::Result<HttpRecordSource> {
    let api_base = api_base.unwrap_or_else(|| client.api_base.clone());
    HttpRecordSource::new(&api_base, client.timeout())
}
