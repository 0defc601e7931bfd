//! Crop recommendation dashboard service.
//!
//! Serves the introduction and results screens, the JSON mirror of the
//! recommendation pipeline, and health/metrics endpoints.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dashboard::{create_router, AppState, DashboardConfig};

#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(about = "Crop recommendation dashboard")]
struct Args {
    /// Listen address
    #[arg(short, long, env = "DASHBOARD_LISTEN_ADDR", default_value = "0.0.0.0:8501")]
    listen: String,

    /// Log level or filter directive
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Number of tokio worker threads (default: number of CPU cores)
    #[arg(long, env = "DASHBOARD_WORKER_THREADS")]
    worker_threads: Option<usize>,

    /// Dashboard configuration file
    #[arg(short, long, env = "DASHBOARD_CONFIG", default_value = "config/dashboard.yaml")]
    config: PathBuf,
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
    runtime.block_on(async_main(args))?;
    Ok(())
}

async fn async_main(args: Args) -> Result<()> {
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics exporter initialized");

    let config = DashboardConfig::load(&args.config)?;
    info!(
        dataset = %config.dataset_path.display(),
        assets = %config.assets.dir.display(),
        "Starting crop recommendation dashboard"
    );

    let missing = dashboard::assets::missing(&config.assets);
    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "Background images not found");
    }
    if !config.dataset_path.is_file() {
        tracing::warn!(
            path = %config.dataset_path.display(),
            "Crop dataset not found; pages will show an error until it exists"
        );
    }

    let state = Arc::new(AppState::new(config, Some(prometheus_handle)));
    let app = create_router(state);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
