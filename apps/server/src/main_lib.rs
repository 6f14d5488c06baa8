use std::time::Instant;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat};

pub struct AppState {
    pub config: Config,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config,
            started_at: Instant::now(),
        }
    }
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
