// Build-time identity from Cargo.toml

/// Package version, exported as `routeros_exporter_build_info{version}`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sent to devices on every REST request.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
