// Error taxonomy for a probe request

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// No credential with this name in the config file.
    #[error("credential not found: {0}")]
    CredentialNotFound(String),

    /// Scrape-timeout header present but not a finite number of seconds.
    #[error("invalid scrape timeout {0:?}: expected a number of seconds")]
    InvalidTimeoutFormat(String),

    /// Transport failure: connect, TLS, timeout, or body read.
    #[error("device unreachable: {0}")]
    DeviceUnreachable(#[source] reqwest::Error),

    #[error("received invalid status code {status} from {path}")]
    DeviceBadStatus { path: String, status: u16 },

    #[error("malformed payload from {path}: {source}")]
    DeviceDecodeError {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Errors raised by the device itself; these become a failed-probe snapshot, not an HTTP error.
    pub fn is_device_error(&self) -> bool {
        matches!(
            self,
            Error::DeviceUnreachable(_) | Error::DeviceBadStatus { .. } | Error::DeviceDecodeError { .. }
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::CredentialNotFound(_) => StatusCode::BAD_REQUEST,
            Error::InvalidTimeoutFormat(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
