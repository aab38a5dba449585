// Config loading and validation tests

use routeros_exporter::config::AppConfig;
use routeros_exporter::error::Error;
use std::io::Write;

const VALID_CONFIG: &str = r#"
[server]
port = 9436
host = "0.0.0.0"

[probe]
timeout_secs = 10.0

[credentials.default]
username = "prometheus"
password = "secret"

[credentials.core]
username = "monitor"
password = "hunter2"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 9436);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.probe.timeout_secs, Some(10.0));
    assert_eq!(config.probe.timeout_ceiling(), 10.0);
    assert_eq!(config.credentials.len(), 2);
}

#[test]
fn test_config_defaults_server_and_probe() {
    let config = AppConfig::load_from_str(
        r#"
[credentials.default]
username = "prometheus"
"#,
    )
    .unwrap();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.probe.timeout_secs, None);
    assert_eq!(config.probe.timeout_ceiling(), 0.0);
    assert_eq!(config.credentials["default"].password, "");
}

#[test]
fn test_find_credential() {
    let config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    let credential = config.find_credential("core").unwrap();
    assert_eq!(credential.username, "monitor");
    assert_eq!(credential.password, "hunter2");
}

#[test]
fn test_find_credential_unknown_name() {
    let config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    let err = config.find_credential("missing").unwrap_err();
    assert!(matches!(err, Error::CredentialNotFound(ref name) if name == "missing"));
    assert!(err.to_string().contains("credential not found"));
}

#[test]
fn test_credential_debug_hides_password() {
    let config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    let debug = format!("{:?}", config.find_credential("default").unwrap());
    assert!(debug.contains("prometheus"));
    assert!(!debug.contains("secret"));
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 9436", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_host() {
    let bad = VALID_CONFIG.replace("host = \"0.0.0.0\"", "host = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.host"));
}

#[test]
fn test_config_validation_rejects_negative_timeout() {
    let bad = VALID_CONFIG.replace("timeout_secs = 10.0", "timeout_secs = -1.0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("probe.timeout_secs"));
}

#[test]
fn test_config_validation_rejects_empty_username() {
    let bad = VALID_CONFIG.replace("username = \"monitor\"", "username = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("credentials.core.username"));
}

#[test]
fn test_config_validation_rejects_no_credentials() {
    let err = AppConfig::load_from_str("[credentials]\n").unwrap_err();
    assert!(err.to_string().contains("credentials"));
}

#[test]
fn test_config_rejects_malformed_toml() {
    assert!(AppConfig::load_from_str("[server\nport = 1").is_err());
}

#[test]
fn test_config_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(VALID_CONFIG.as_bytes()).unwrap();
    let config = AppConfig::load_from_path(file.path()).unwrap();
    assert_eq!(config.server.port, 9436);
}

#[test]
fn test_config_missing_file_names_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = AppConfig::load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}
