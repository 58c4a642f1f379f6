mod app;
mod config;
mod effects;
mod logging;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use board_logging::board_info;
use clap::Parser;
use log::LevelFilter;

use crate::config::{AppConfig, API_URL_ENV};
use crate::logging::LogDestination;

/// Terminal client for the job board.
#[derive(Debug, Parser)]
#[command(name = "jobboard", version, about)]
struct Args {
    /// RON config file (defaults to ./jobboard.ron when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial location query, e.g. "search=rust&tags=remote".
    #[arg(long, default_value = "")]
    location: String,

    /// Country for the featured jobs carousel.
    #[arg(long)]
    country: Option<String>,

    /// Where log output goes; overrides the config file.
    #[arg(long, value_enum)]
    log: Option<LogDestination>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref()).context("failed to load config")?;
    config.apply_api_url_override(std::env::var(API_URL_ENV).ok());
    if args.country.is_some() {
        config.country = args.country;
    }

    logging::initialize(args.log.unwrap_or(config.log), LevelFilter::Debug);
    board_info!("Starting jobboard against {}", config.api_base_url);

    let location = args.location.trim_start_matches('?').to_string();
    app::run(&config, location)
}
