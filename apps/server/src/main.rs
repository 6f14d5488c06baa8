mod api;
mod config;
mod error;
mod main_lib;

use std::sync::Arc;

use api::app_router;
use config::Config;
use main_lib::{init_tracing, shutdown_signal, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let listen_addr = config.listen_addr;
    let state = Arc::new(AppState::new(config));
    let router = app_router(state);

    tracing::info!("Listening on {}", listen_addr);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
