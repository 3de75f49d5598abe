//! WCS API service.
//!
//! HTTP server implementing OGC WCS 1.1.0 over a YAML service catalogue.

use anyhow::{Context, Result};
use axum::extract::Extension;
use clap::Parser;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use wcs_api::{catalogue_config::load_catalogue, router, state::AppState};

#[derive(Parser, Debug)]
#[command(name = "wcs-api")]
#[command(about = "OGC WCS 1.1 API server")]
struct Args {
    /// Listen address
    #[arg(short, long, env = "WCS_LISTEN", default_value = "0.0.0.0:8080")]
    listen: String,

    /// Service catalogue (YAML)
    #[arg(short, long, env = "WCS_CONFIG", default_value = "config/catalogue.yaml")]
    config: String,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Number of tokio worker threads (default: number of CPU cores)
    #[arg(long, env = "TOKIO_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<()> {
    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Initialize Prometheus metrics exporter
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Prometheus metrics exporter initialized");
    info!(config = %args.config, "Starting WCS API server");

    let catalogue = load_catalogue(&args.config)?;
    let state = Arc::new(AppState::new(catalogue));

    let app = router(state)
        .layer(Extension(prometheus_handle))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = args.listen.parse()?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
