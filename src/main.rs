use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use clap_serde_derive::ClapSerde;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::analysis::completion::ChatCompletionClient;
use crate::analysis::Analyzer;
use crate::api::AppState;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::telemetry::{init_telemetry, shutdown_telemetry};

mod analysis;
mod api;
mod config;
mod error;
mod telemetry;

#[cfg(unix)]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env, default_value = DEFAULT_CONFIG_FILE)]
    config_file: String,

    /// OTLP endpoint to export traces and metrics to
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    otel_endpoint: Option<String>,

    /// Keep logging to the console while exporting to OTLP
    #[arg(long)]
    console: bool,

    /// Configuration options
    #[command(flatten)]
    pub opt_config: <Config as ClapSerde>::Opt,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Loaded before parsing so .env values can feed the env fallbacks of the arguments
    let dotenv = dotenvy::dotenv();

    let args = Args::parse();
    init_telemetry(&args.otel_endpoint, args.console)?;
    if let Some(err) = dotenv_problem(dotenv) {
        warn!("Failed to load .env file: {}", err);
    }

    let config = match Config::from_toml(&args.config_file) {
        Ok(conf) => conf.merge(args.opt_config),
        Err(err) => {
            if args.config_file == DEFAULT_CONFIG_FILE {
                Config::default().merge(args.opt_config)
            } else {
                exit_err!(
                    1,
                    "Failed to read configuration file {} with error: {}",
                    args.config_file,
                    err
                );
            }
        }
    };
    if let Err(err) = config.validate() {
        exit_err!(1, "Invalid configuration: {}", err);
    }

    let client = ChatCompletionClient::new(&config)?;
    let state = AppState {
        analyzer: Analyzer::new(Arc::new(client)),
    };

    let listener = TcpListener::bind(format!("{}:{}", config.address, config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    info!(
        "Forwarding to {} using model {}",
        config.completion_url, config.completion_model
    );

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    shutdown_telemetry();
    Ok(())
}

/// A missing .env file is expected, anything else is worth reporting.
fn dotenv_problem(result: dotenvy::Result<PathBuf>) -> Option<dotenvy::Error> {
    match result {
        Err(err) if !err.not_found() => Some(err),
        _ => None,
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down..."),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}

#[macro_export]
macro_rules! exit_err {
    ($code:expr, $fmt:expr $(, $arg:expr)*) => {
        {
            error!($fmt $(, $arg)*);
            std::process::exit($code);
        }
    };
}
