// Device probe client: RouterOS REST API over reqwest

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::Error;
use crate::models::{Health, Interface, Resource};
use crate::version::USER_AGENT;

const HEALTH_PATH: &str = "/system/health";
const INTERFACES_PATH: &str = "/interface";
const RESOURCE_PATH: &str = "/system/resource";

/// What the snapshot builder needs from a device. Tests substitute a stub.
pub trait DeviceProbe {
    fn fetch_health(&self) -> impl Future<Output = Result<Health, Error>> + Send;
    fn fetch_interfaces(&self) -> impl Future<Output = Result<Vec<Interface>, Error>> + Send;
    fn fetch_resource(&self) -> impl Future<Output = Result<Resource, Error>> + Send;
}

/// Per-probe connection settings. Built fresh for every request.
#[derive(Clone)]
pub struct DeviceConfig {
    pub address: String,
    pub username: String,
    pub password: String,
    /// Effective timeout in seconds; non-positive means no budget.
    pub timeout_secs: f64,
    pub skip_tls_verify: bool,
}

pub struct RouterOsClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl RouterOsClient {
    pub fn new(config: DeviceConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(config.skip_tls_verify)
            .timeout(request_timeout(config.timeout_secs))
            .build()
            .map_err(Error::DeviceUnreachable)?;
        Ok(Self {
            http,
            base_url: base_url(&config.address),
            username: config.username,
            password: config.password,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/rest{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let response = self
            .http
            .get(self.url(path))
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(Error::DeviceUnreachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::DeviceBadStatus {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(Error::DeviceUnreachable)?;
        serde_json::from_slice(&body).map_err(|source| Error::DeviceDecodeError {
            path: path.to_string(),
            source,
        })
    }
}

impl DeviceProbe for RouterOsClient {
    #[instrument(skip(self), fields(device = %self.base_url, operation = "fetch_health"))]
    async fn fetch_health(&self) -> Result<Health, Error> {
        self.get(HEALTH_PATH).await
    }

    #[instrument(skip(self), fields(device = %self.base_url, operation = "fetch_interfaces"))]
    async fn fetch_interfaces(&self) -> Result<Vec<Interface>, Error> {
        self.get(INTERFACES_PATH).await
    }

    #[instrument(skip(self), fields(device = %self.base_url, operation = "fetch_resource"))]
    async fn fetch_resource(&self) -> Result<Resource, Error> {
        self.get(RESOURCE_PATH).await
    }
}

/// Zero for a non-positive or non-finite budget, so the request fails at once.
fn request_timeout(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

/// The REST API is HTTPS-only on RouterOS, so a bare host gets `https://`.
fn base_url(address: &str) -> String {
    let address = address.trim().trim_end_matches('/');
    if address.contains("://") {
        address.to_string()
    } else {
        format!("https://{address}")
    }
}
