use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the CSV readings at `/api/data`.
    #[clap(name = "serve")]
    Serve(ServeArgs),

    /// Write a CSV file with sample readings.
    #[clap(name = "generate")]
    Generate(GenerateArgs),

    /// Interactive terminal dashboard: type an option number or equipment name per line.
    #[clap(name = "dashboard")]
    Dashboard(DashboardArgs),
}

#[derive(Parser)]
pub struct ServeArgs {
    /// Overrides `data.csv_path`.
    #[clap(long = "csv")]
    pub csv_path: Option<PathBuf>,
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Defaults to `data.csv_path`.
    #[clap(long = "output")]
    pub output: Option<PathBuf>,

    #[clap(long, default_value = "300")]
    pub rows: usize,

    /// How far back the first reading is.
    #[clap(long, default_value = "5")]
    pub hours_back: i64,
}

#[derive(Parser)]
pub struct DashboardArgs {
    /// Overrides `client.api_base`.
    #[clap(long = "api-base", env = "DASHBOARD_API_BASE")]
    pub api_base: Option<String>,

    /// Keep the latest chart as Chart.js JSON at this path.
    #[clap(long = "chart-out")]
    pub chart_out: Option<PathBuf>,
}
