use std::sync::Arc;

use anyhow::Context;
use memberbook_backend_lib::{
    config::Settings, directory::FlatFileDirectory, router, AppState,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize configuration
    let settings = Settings::load().context("failed to load settings")?;

    // Initialize tracing; RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    // Create the user directory
    let directory = FlatFileDirectory::new(&settings.data_dir)
        .context("failed to open user directory")?;

    // Create application state
    let bind_addr = settings.bind_addr;
    let state = Arc::new(AppState::new(directory, settings)?);

    // Create the router
    let app = router::create_router(state);

    // Start the server
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
