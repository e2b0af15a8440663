// crates/jira-bridge-config/tests/config.rs
// ============================================================================
// Module: Configuration Tests
// Description: Tests for config layering, validation, and redaction.
// ============================================================================
//! ## Overview
//! Validates that file, environment, and command-line layers merge in order
//! and that invalid or incomplete configuration fails closed.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use jira_bridge_config::AuditSinkKind;
use jira_bridge_config::BridgeConfig;
use jira_bridge_config::ConfigError;
use jira_bridge_config::ConfigOverrides;
use jira_bridge_config::ServerTransport;
use tempfile::TempDir;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
        pairs.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect();
    move |name| map.get(name).cloned()
}

// ============================================================================
// SECTION: File Loading
// ============================================================================

#[test]
fn load_parses_all_sections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bridge.toml");
    fs::write(
        &path,
        r#"
[jira]
host = "example.atlassian.net"
email = "bot@example.com"
api_token = "file-token"
timeout_ms = 5000

[server]
transport = "http"
bind = "127.0.0.1:9000"
max_body_bytes = 1024

[audit]
sink = "file"
path = "audit.jsonl"

[attachments]
root = "/tmp"
"#,
    )
    .unwrap();

    let mut config = BridgeConfig::load(Some(&path)).unwrap();
    config.validate().unwrap();
    assert_eq!(config.jira.host.as_deref(), Some("https://example.atlassian.net"));
    assert_eq!(config.server.transport, ServerTransport::Http);
    assert_eq!(config.server.bind_addr().unwrap().port(), 9000);
    assert_eq!(config.audit.sink, AuditSinkKind::File);
    assert!(config.attachments.root_path().is_some());

    let credentials = config.credentials().unwrap();
    assert_eq!(credentials.timeout, Duration::from_millis(5000));
}

#[test]
fn explicit_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let error = BridgeConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(error, ConfigError::Io(_)));
}

#[test]
fn unknown_keys_are_rejected() {
    let error = BridgeConfig::from_toml_str("[jira]\nhots = \"typo\"\n").unwrap_err();
    assert!(matches!(error, ConfigError::Parse(_)));
}

#[test]
fn oversize_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.toml");
    fs::write(&path, format!("# {}\n", "x".repeat(1024 * 1024))).unwrap();
    let error = BridgeConfig::load(Some(&path)).unwrap_err();
    assert!(matches!(error, ConfigError::Invalid(_)));
}

// ============================================================================
// SECTION: Layering
// ============================================================================

#[test]
fn environment_overrides_file_and_flags_override_environment() {
    let mut config = BridgeConfig::from_toml_str(
        "[jira]\nhost = \"file.example\"\nemail = \"file@example.com\"\napi_token = \"file\"\n",
    )
    .unwrap();
    config.apply_env(env_of(&[
        ("JIRA_HOST", "env.example"),
        ("JIRA_EMAIL", "env@example.com"),
        ("JIRA_API_TOKEN", "env-token"),
    ]));
    config.apply_overrides(&ConfigOverrides {
        jira_token: Some("flag-token".to_string()),
        ..ConfigOverrides::default()
    });
    config.validate().unwrap();

    let credentials = config.credentials().unwrap();
    assert_eq!(credentials.base_url, "https://env.example");
    assert_eq!(credentials.email, "env@example.com");
    assert_eq!(credentials.api_token, "flag-token");
}

#[test]
fn blank_environment_values_are_ignored() {
    let mut config = BridgeConfig::from_toml_str("[jira]\nemail = \"file@example.com\"\n").unwrap();
    config.apply_env(env_of(&[("JIRA_EMAIL", "  ")]));
    assert_eq!(config.jira.email.as_deref(), Some("file@example.com"));
}

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn missing_credentials_name_the_setting() {
    let mut config = BridgeConfig::default();
    config.apply_env(env_of(&[("JIRA_HOST", "jira.example"), ("JIRA_EMAIL", "a@example.com")]));
    config.validate().unwrap();
    let error = config.credentials().unwrap_err();
    match error {
        ConfigError::Missing(message) => {
            assert!(message.contains("JIRA_API_TOKEN"));
            assert!(message.contains("--jira-token"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn explicit_scheme_is_preserved_and_bad_schemes_fail() {
    let mut config = BridgeConfig::from_toml_str("[jira]\nhost = \"http://localhost:8080/\"\n").unwrap();
    config.validate().unwrap();
    assert_eq!(config.jira.host.as_deref(), Some("http://localhost:8080"));

    let mut config = BridgeConfig::from_toml_str("[jira]\nhost = \"ftp://jira\"\n").unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn file_audit_sink_requires_path() {
    let mut config = BridgeConfig::from_toml_str("[audit]\nsink = \"file\"\n").unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn http_transport_requires_parseable_bind() {
    let mut config = BridgeConfig::from_toml_str("[server]\ntransport = \"http\"\nbind = \"nowhere\"\n").unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn zero_timeout_is_rejected() {
    let mut config = BridgeConfig::from_toml_str("[jira]\ntimeout_ms = 0\n").unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn debug_output_redacts_secrets() {
    let mut config = BridgeConfig::from_toml_str(
        "[jira]\napi_token = \"jira-secret\"\n[server]\nbearer_token = \"http-secret\"\n",
    )
    .unwrap();
    config.validate().unwrap();
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("jira-secret"));
    assert!(!rendered.contains("http-secret"));

    let overrides = ConfigOverrides {
        jira_token: Some("flag-secret".to_string()),
        ..ConfigOverrides::default()
    };
    assert!(!format!("{overrides:?}").contains("flag-secret"));
}
