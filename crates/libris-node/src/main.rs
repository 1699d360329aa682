//! Libris node entry point.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libris_node::api::{create_router, AppState};
use libris_node::config::Config;
use libris_store::FileStore;

/// Libris - bookstore REST API node
#[derive(Parser, Debug)]
#[command(name = "libris-node")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// HTTP listen port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Data directory (overrides DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("libris={}", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Libris node");
    tracing::info!(
        port = config.port,
        data_dir = %config.data_dir.display(),
        development = config.development,
        "Node configuration"
    );

    let store = Arc::new(FileStore::new(config.data_dir.clone()));
    let state = AppState::new(store, &config);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
