// Scrape-deadline negotiation between the collector and the configured ceiling

use axum::http::HeaderMap;

use crate::error::Error;

/// Header Prometheus sets to advertise its scrape deadline.
pub const SCRAPE_TIMEOUT_HEADER: &str = "x-prometheus-scrape-timeout-seconds";

/// Deadline assumed when the collector does not send one.
pub const DEFAULT_SCRAPE_TIMEOUT_SECS: f64 = 120.0;

/// Subtracted from the collector deadline so the device call gives up first.
pub const TIMEOUT_OFFSET_SECS: f64 = 0.5;

/// Effective per-probe timeout in seconds.
///
/// `ceiling <= 0` means no ceiling is configured. A non-positive result means
/// "no time budget"; the device client turns it into an immediate failure.
pub fn negotiate(scrape_timeout: Option<&str>, ceiling: f64) -> Result<f64, Error> {
    let requested = match scrape_timeout.map(str::trim) {
        None | Some("") => DEFAULT_SCRAPE_TIMEOUT_SECS,
        Some(raw) => raw
            .parse::<f64>()
            .ok()
            .filter(|secs| secs.is_finite())
            .ok_or_else(|| Error::InvalidTimeoutFormat(raw.to_string()))?,
    };

    let adjusted = requested - TIMEOUT_OFFSET_SECS;
    if (ceiling > 0.0 && ceiling < adjusted) || adjusted < 0.0 {
        return Ok(ceiling);
    }
    Ok(adjusted)
}

/// Reads the scrape-timeout header (if any) and negotiates against `ceiling`.
pub fn negotiate_from_headers(headers: &HeaderMap, ceiling: f64) -> Result<f64, Error> {
    let raw = headers
        .get(SCRAPE_TIMEOUT_HEADER)
        .map(|value| {
            value.to_str().map_err(|_| {
                Error::InvalidTimeoutFormat(String::from_utf8_lossy(value.as_bytes()).into_owned())
            })
        })
        .transpose()?;
    negotiate(raw, ceiling)
}
