use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    pub credentials: HashMap<String, Credential>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeConfig {
    /// Upper bound on a probe's device timeout, in seconds. Unset or 0 means no ceiling.
    #[serde(default)]
    pub timeout_secs: Option<f64>,
}

impl ProbeConfig {
    /// Ceiling as passed to the timeout negotiator (0 = unset).
    pub fn timeout_ceiling(&self) -> f64 {
        self.timeout_secs.unwrap_or(0.0)
    }
}

#[derive(Clone, Deserialize)]
pub struct Credential {
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AppConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path.display(), e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        if let Some(timeout) = self.probe.timeout_secs {
            anyhow::ensure!(
                timeout.is_finite() && timeout >= 0.0,
                "probe.timeout_secs must be a non-negative number, got {}",
                timeout
            );
        }
        anyhow::ensure!(
            !self.credentials.is_empty(),
            "credentials must define at least one entry"
        );
        for (name, credential) in &self.credentials {
            anyhow::ensure!(
                !credential.username.is_empty(),
                "credentials.{}.username must be non-empty",
                name
            );
        }
        Ok(())
    }

    pub fn find_credential(&self, name: &str) -> Result<&Credential, Error> {
        self.credentials
            .get(name)
            .ok_or_else(|| Error::CredentialNotFound(name.to_string()))
    }
}
