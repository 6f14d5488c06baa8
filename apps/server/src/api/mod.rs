mod health;
mod ledger;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::CorsOrigins;
use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>) -> Router {
    let cors = match &state.config.cors_origins {
        CorsOrigins::Any => CorsLayer::new().allow_origin(Any),
        CorsOrigins::List(origins) => {
            // Origins were validated when the config was loaded.
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok())
                .collect();
            CorsLayer::new().allow_origin(AllowOrigin::list(origins))
        }
    }
    .allow_methods(Any)
    .allow_headers(Any);

    let api = Router::new()
        .merge(health::router())
        .merge(ledger::router());

    Router::new()
        .nest("/api/v1", api)
        .layer(TimeoutLayer::new(state.config.request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
