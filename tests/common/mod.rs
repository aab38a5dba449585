// Shared test helpers: stub device, fake RouterOS REST server, config

#![allow(dead_code)]

use axum::{Json, Router, http::StatusCode, routing::get};
use routeros_exporter::config::AppConfig;
use routeros_exporter::device::DeviceProbe;
use routeros_exporter::error::Error;
use routeros_exporter::models::{Health, Interface, Resource};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

pub const TEST_CONFIG: &str = r#"
[server]
port = 9436
host = "127.0.0.1"

[credentials.default]
username = "prometheus"
password = "secret"
"#;

pub fn test_config() -> AppConfig {
    AppConfig::load_from_str(TEST_CONFIG).unwrap()
}

pub fn interface(name: &str, kind: &str, running: bool, disabled: bool) -> Interface {
    Interface {
        name: name.into(),
        kind: kind.into(),
        running,
        disabled,
        rx_byte: 1000.0,
        rx_packet: 10.0,
        tx_byte: 2000.0,
        tx_packet: 20.0,
        ..Default::default()
    }
}

pub fn bad_status(path: &str) -> Error {
    Error::DeviceBadStatus {
        path: path.into(),
        status: 500,
    }
}

/// In-memory device. A `None` resource fails with a 500.
#[derive(Clone, Default)]
pub struct StubDevice {
    pub health: Option<Health>,
    pub interfaces: Option<Vec<Interface>>,
    pub resource: Option<Resource>,
    pub calls: Arc<Mutex<Vec<&'static str>>>,
}

impl StubDevice {
    pub fn healthy() -> Self {
        Self {
            health: Some(Health {
                temperature: 49.0,
                voltage: 24.1,
            }),
            interfaces: Some(vec![]),
            resource: Some(Resource {
                cpu_count: 4.0,
                cpu_load: 3.0,
                total_memory: 1_073_741_824.0,
                ..Default::default()
            }),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DeviceProbe for StubDevice {
    async fn fetch_health(&self) -> Result<Health, Error> {
        self.record("health");
        self.health.clone().ok_or_else(|| bad_status("/system/health"))
    }

    async fn fetch_interfaces(&self) -> Result<Vec<Interface>, Error> {
        self.record("interfaces");
        self.interfaces.clone().ok_or_else(|| bad_status("/interface"))
    }

    async fn fetch_resource(&self) -> Result<Resource, Error> {
        self.record("resource");
        self.resource.clone().ok_or_else(|| bad_status("/system/resource"))
    }
}

/// RouterOS-shaped payloads; every scalar is a string, as the REST API sends them.
pub fn health_body() -> Value {
    json!([
        { ".id": "*D", "name": "voltage", "type": "V", "value": "24.1" },
        { ".id": "*E", "name": "temperature", "type": "C", "value": "49" },
        { ".id": "*F", "name": "psu1-state", "type": "", "value": "ok" }
    ])
}

pub fn resource_body() -> Value {
    json!({
        "cpu-count": "4",
        "cpu-frequency": "880",
        "cpu-load": "3",
        "free-hdd-space": "100000000",
        "total-hdd-space": "134217728",
        "free-memory": "900000000",
        "total-memory": "1073741824",
        "write-sect-since-reboot": "1200",
        "write-sect-total": "560000",
        "uptime": "1w2d3h",
        "version": "7.14.2 (stable)"
    })
}

pub fn interfaces_body() -> Value {
    json!([
        {
            ".id": "*1", "name": "ether1", "type": "ether",
            "running": "true", "disabled": "false",
            "rx-byte": "123456", "tx-byte": "654321",
            "rx-packet": "1000", "tx-packet": "2000",
            "rx-drop": "0", "tx-drop": "0", "rx-error": "0", "tx-error": "0",
            "tx-queue-drop": "7"
        },
        {
            ".id": "*2", "name": "ether2", "type": "ether",
            "running": "false", "disabled": "false",
            "rx-byte": "0", "tx-byte": "0"
        },
        {
            ".id": "*3", "name": "wlan1", "type": "wlan",
            "running": "true", "disabled": "true",
            "rx-byte": "5", "tx-byte": "5"
        }
    ])
}

/// Fake device answering the three REST endpoints.
pub fn device_router(health: Value, interfaces: Value, resource: Value) -> Router {
    Router::new()
        .route("/rest/system/health", get(move || async move { Json(health) }))
        .route("/rest/interface", get(move || async move { Json(interfaces) }))
        .route("/rest/system/resource", get(move || async move { Json(resource) }))
}

/// Fake device whose resource endpoint fails after health succeeds.
pub fn device_router_failing_resource() -> Router {
    Router::new()
        .route("/rest/system/health", get(|| async { Json(health_body()) }))
        .route("/rest/interface", get(|| async { Json(interfaces_body()) }))
        .route(
            "/rest/system/resource",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
}

/// Serves `router` on an ephemeral local port; returns its base URL.
pub async fn spawn_device(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Serves `router` over TLS with a fresh self-signed certificate for
/// `localhost`; returns its `https://` base URL on 127.0.0.1.
pub async fn spawn_tls_device(router: Router) -> String {
    let rcgen::CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec!["localhost".to_string(), "127.0.0.1".to_string()])
            .unwrap();
    let tls = axum_server::tls_rustls::RustlsConfig::from_pem(
        cert.pem().into_bytes(),
        key_pair.serialize_pem().into_bytes(),
    )
    .await
    .unwrap();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum_server::from_tcp_rustls(listener, tls)
            .serve(router.into_make_service())
            .await
            .unwrap();
    });
    format!("https://127.0.0.1:{}", port)
}

/// Sample lines of a text exposition body (comments stripped).
pub fn sample_lines(body: &str) -> Vec<&str> {
    body.lines().filter(|l| !l.starts_with('#')).collect()
}
