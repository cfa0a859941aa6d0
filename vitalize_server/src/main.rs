#![forbid(unsafe_code)]

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use vitalize_core::{Config, RecordStore, SystemClock};
use vitalize_server::build_router;

#[derive(Parser)]
#[command(name = "vitalize-server")]
#[command(about = "BMI record service with time-based expiry", long_about = None)]
struct Cli {
    /// Override the bind address from the config file
    #[arg(long)]
    bind: Option<String>,

    /// Use a specific config file instead of the default path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    vitalize_core::logging::init();

    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };
    let bind = cli.bind.unwrap_or_else(|| config.server.bind.clone());
    let addr: SocketAddr = bind.parse()?;

    let store = Arc::new(RecordStore::new(Arc::new(SystemClock)));
    spawn_sweeper(store.clone());

    let app = build_router(store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("vitalize-server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Run the expiry sweep on its fixed cadence until process shutdown
fn spawn_sweeper(store: Arc<RecordStore>) {
    let interval = store.policy().sweep_interval;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            store.sweep();
        }
    });
}
