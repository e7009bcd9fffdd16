use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use expense_tracker::config::{self, AppConfig};
use expense_tracker::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load()?;
    init_logging(&config);

    info!("Setting up expense tracker backend");
    let state = initialize_backend(config.clone())?;
    let app = create_router(state);

    // Start the server
    let addr: SocketAddr = config.bind_address.parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// RUST_LOG wins over the configured level
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
