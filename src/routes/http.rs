// GET handlers: probe, self metrics

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tokio::time::Instant;

use super::AppState;
use crate::device::{DeviceConfig, RouterOsClient};
use crate::error::Error;
use crate::exposition;
use crate::snapshot::{self, ProbeReport, ProbeStage};
use crate::timeout;

#[derive(Debug, Deserialize)]
pub(super) struct ProbeParams {
    target: String,
    credential: String,
    skip_tls_verify: Option<String>,
}

impl ProbeParams {
    /// Verification is off only for the literal `true`; any other value keeps it on.
    fn skip_tls_verify(&self) -> bool {
        self.skip_tls_verify.as_deref() == Some("true")
    }
}

/// GET /probe — one probe cycle against `target`. A device failure is still a
/// 200 carrying `mikrotik_probe_success 0`.
pub(super) async fn probe_handler(
    State(state): State<AppState>,
    Query(params): Query<ProbeParams>,
    headers: HeaderMap,
) -> Result<Response, Error> {
    let credential = state
        .config
        .find_credential(&params.credential)
        .inspect_err(|e| {
            tracing::warn!(device = %params.target, credential = %params.credential, error = %e, "failed to find credential");
        })?;

    let timeout_secs = timeout::negotiate_from_headers(&headers, state.config.probe.timeout_ceiling())
        .inspect_err(|e| {
            tracing::warn!(device = %params.target, error = %e, "failed to negotiate probe timeout");
        })?;

    let started = Instant::now();
    let report = match RouterOsClient::new(DeviceConfig {
        address: params.target.clone(),
        username: credential.username.clone(),
        password: credential.password.clone(),
        timeout_secs,
        skip_tls_verify: params.skip_tls_verify(),
    }) {
        Ok(client) => snapshot::build(&client).await,
        Err(e) => ProbeReport::failed(ProbeStage::Connect, e),
    };
    state
        .metrics
        .observe_probe(report.snapshot.is_success(), started.elapsed());

    if let Some(failure) = &report.failure {
        tracing::warn!(
            device = %params.target,
            credential = %params.credential,
            stage = %failure.stage,
            error = %failure.error,
            "probe failed"
        );
    }

    Ok(render(exposition::render(&report.snapshot)))
}

/// GET /metrics — the exporter's own metrics.
pub(super) async fn metrics_handler(State(state): State<AppState>) -> Response {
    render(state.metrics.render())
}

fn render(body: prometheus::Result<String>) -> Response {
    match body {
        Ok(text) => ([(header::CONTENT_TYPE, exposition::CONTENT_TYPE)], text).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
