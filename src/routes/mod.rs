// HTTP routes: /probe and /metrics

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::self_metrics::ExporterMetrics;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<AppConfig>,
    pub(crate) metrics: Arc<ExporterMetrics>,
}

pub fn app(config: Arc<AppConfig>, metrics: Arc<ExporterMetrics>) -> Router {
    let state = AppState { config, metrics };
    Router::new()
        .route("/metrics", get(http::metrics_handler)) // GET /metrics
        .route("/probe", get(http::probe_handler)) // GET /probe?target=&credential=&skip_tls_verify=
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
