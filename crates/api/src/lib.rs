//! HTTP risk prediction service with observability.
//!
//! Serves `/predict_risk` on top of the model gateway, plus liveness and
//! Prometheus endpoints, with structured logging (tracing).

pub mod config;
pub mod error;
pub mod notify;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use model_gateway::{ArtifactPaths, ModelGateway};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use notify::AlertNotifier;
use routes::risk::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/predict_risk", post(routes::risk::predict))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state with an unloaded gateway for `paths`.
pub fn create_state(paths: ArtifactPaths, notifier: Arc<dyn AlertNotifier>) -> Arc<AppState> {
    Arc::new(AppState {
        gateway: Arc::new(ModelGateway::new(paths)),
        notifier,
    })
}
