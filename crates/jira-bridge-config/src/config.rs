// crates/jira-bridge-config/src/config.rs
// ============================================================================
// Module: Jira Bridge Configuration
// Description: Configuration loading, layering, and validation.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! [`BridgeConfig::resolve`] builds the effective configuration:
//! 1. a TOML file from `--config`, else `JIRA_BRIDGE_CONFIG`, else
//!    `jira-bridge.toml` when it exists;
//! 2. `JIRA_HOST`, `JIRA_EMAIL`, and `JIRA_API_TOKEN`;
//! 3. command-line overrides.
//!
//! Config inputs are untrusted: files are size-capped and paths are
//! length-checked. Secrets never appear in `Debug` output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "jira-bridge.toml";
/// Environment variable naming the configuration file.
pub(crate) const CONFIG_ENV_VAR: &str = "JIRA_BRIDGE_CONFIG";
/// Environment variable for the Jira host.
pub(crate) const HOST_ENV_VAR: &str = "JIRA_HOST";
/// Environment variable for the account email.
pub(crate) const EMAIL_ENV_VAR: &str = "JIRA_EMAIL";
/// Environment variable for the API token.
pub(crate) const TOKEN_ENV_VAR: &str = "JIRA_API_TOKEN";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default backend request timeout.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Upper bound for the backend request timeout.
const MAX_TIMEOUT_MS: u64 = 300_000;
/// Default HTTP bind address.
const DEFAULT_BIND: &str = "127.0.0.1:8080";
/// Default maximum HTTP request body size.
const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;
/// Upper bound for the HTTP request body size.
const MAX_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Effective Jira Bridge configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub jira: JiraConfig,
    /// Protocol server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Audit sink settings.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Local attachment file access settings.
    #[serde(default)]
    pub attachments: AttachmentConfig,
}

/// Backend connection settings.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JiraConfig {
    /// Jira host or base URL.
    #[serde(default)]
    pub host: Option<String>,
    /// Account email for basic authentication.
    #[serde(default)]
    pub email: Option<String>,
    /// API token for basic authentication.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Backend request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            host: None,
            email: None,
            api_token: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("host", &self.host)
            .field("email", &self.email)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Supported protocol server transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServerTransport {
    /// JSON-RPC over stdin/stdout.
    #[default]
    Stdio,
    /// JSON-RPC over HTTP.
    Http,
}

impl ServerTransport {
    /// Returns a stable label for logs and audit events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Http => "http",
        }
    }
}

/// Protocol server settings.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Transport served by `serve`.
    #[serde(default)]
    pub transport: ServerTransport,
    /// Bind address for the HTTP transport.
    #[serde(default)]
    pub bind: Option<String>,
    /// Maximum HTTP request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Optional bearer token required on HTTP requests.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: ServerTransport::Stdio,
            bind: None,
            max_body_bytes: default_max_body_bytes(),
            bearer_token: None,
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("transport", &self.transport)
            .field("bind", &self.bind)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ServerConfig {
    /// Returns the effective HTTP bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let bind = self.bind.as_deref().unwrap_or(DEFAULT_BIND);
        bind.parse()
            .map_err(|_| ConfigError::Invalid(format!("server.bind is not a socket address: {bind}")))
    }

    /// Validates server settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 || self.max_body_bytes > MAX_MAX_BODY_BYTES {
            return Err(ConfigError::Invalid(format!(
                "server.max_body_bytes must be between 1 and {MAX_MAX_BODY_BYTES}"
            )));
        }
        if self.transport == ServerTransport::Http {
            self.bind_addr()?;
        }
        if let Some(token) = &self.bearer_token
            && token.trim().is_empty()
        {
            return Err(ConfigError::Invalid("server.bearer_token must be non-empty".to_string()));
        }
        Ok(())
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard audit events.
    #[default]
    None,
    /// Write JSON lines to stderr.
    Stderr,
    /// Append JSON lines to a file.
    File,
}

/// Audit sink settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Selected sink.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Log file path for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (&self.sink, &self.path) {
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for the file sink".to_string()))
            }
            (_, Some(path)) => validate_path_string("audit.path", path),
            _ => Ok(()),
        }
    }
}

/// Local attachment file access settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttachmentConfig {
    /// Optional directory confining attachment reads and writes.
    #[serde(default)]
    pub root: Option<String>,
}

impl AttachmentConfig {
    /// Returns the root directory when configured.
    #[must_use]
    pub fn root_path(&self) -> Option<PathBuf> {
        self.root.as_deref().map(PathBuf::from)
    }
}

/// Command-line overrides applied after file and environment layers.
#[derive(Clone, Default)]
pub struct ConfigOverrides {
    /// Explicit config file path.
    pub config_path: Option<PathBuf>,
    /// Jira host override.
    pub jira_host: Option<String>,
    /// Account email override.
    pub jira_email: Option<String>,
    /// API token override.
    pub jira_token: Option<String>,
    /// Transport override for `serve`.
    pub transport: Option<ServerTransport>,
    /// Bind address override for `serve`.
    pub bind: Option<String>,
}

impl fmt::Debug for ConfigOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOverrides")
            .field("config_path", &self.config_path)
            .field("jira_host", &self.jira_host)
            .field("jira_email", &self.jira_email)
            .field("jira_token", &self.jira_token.as_ref().map(|_| "<redacted>"))
            .field("transport", &self.transport)
            .field("bind", &self.bind)
            .finish()
    }
}

/// Validated backend credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct JiraCredentials {
    /// Base URL with scheme.
    pub base_url: String,
    /// Account email.
    pub email: String,
    /// API token.
    pub api_token: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl fmt::Debug for JiraCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraCredentials")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl BridgeConfig {
    /// Resolves the effective configuration from all layers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = Self::load(overrides.config_path.as_deref())?;
        config.apply_env(|name| env::var(name).ok());
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Loads the config file using the default resolution rules.
    ///
    /// An explicitly named file must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(resolved) = resolve_path(path)? else {
            return Ok(Self::default());
        };
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", resolved.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the TOML is malformed.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Applies environment variables through `lookup`; blank values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(host) = read(HOST_ENV_VAR) {
            self.jira.host = Some(host);
        }
        if let Some(email) = read(EMAIL_ENV_VAR) {
            self.jira.email = Some(email);
        }
        if let Some(token) = read(TOKEN_ENV_VAR) {
            self.jira.api_token = Some(token);
        }
    }

    /// Applies command-line overrides.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(host) = &overrides.jira_host {
            self.jira.host = Some(host.clone());
        }
        if let Some(email) = &overrides.jira_email {
            self.jira.email = Some(email.clone());
        }
        if let Some(token) = &overrides.jira_token {
            self.jira.api_token = Some(token.clone());
        }
        if let Some(transport) = overrides.transport {
            self.server.transport = transport;
        }
        if let Some(bind) = &overrides.bind {
            self.server.bind = Some(bind.clone());
        }
    }

    /// Validates the configuration and normalizes the host.
    ///
    /// Credentials are not required here; see [`BridgeConfig::credentials`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if let Some(host) = &self.jira.host {
            self.jira.host = Some(normalize_host(host)?);
        }
        if self.jira.timeout_ms == 0 || self.jira.timeout_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::Invalid(format!(
                "jira.timeout_ms must be between 1 and {MAX_TIMEOUT_MS}"
            )));
        }
        self.server.validate()?;
        self.audit.validate()?;
        if let Some(root) = &self.attachments.root {
            validate_path_string("attachments.root", root)?;
        }
        Ok(())
    }

    /// Returns the backend credentials, failing when any is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first absent setting.
    pub fn credentials(&self) -> Result<JiraCredentials, ConfigError> {
        let base_url = required(self.jira.host.as_deref(), "Jira host", HOST_ENV_VAR, "--jira-host")?;
        let email = required(self.jira.email.as_deref(), "Jira email", EMAIL_ENV_VAR, "--jira-email")?;
        let api_token =
            required(self.jira.api_token.as_deref(), "Jira API token", TOKEN_ENV_VAR, "--jira-token")?;
        Ok(JiraCredentials {
            base_url: normalize_host(base_url)?,
            email: email.to_string(),
            api_token: api_token.to_string(),
            timeout: Duration::from_millis(self.jira.timeout_ms),
        })
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// A required setting is absent.
    #[error("missing {0}")]
    Missing(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default backend timeout.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Default HTTP body limit.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Resolves the config path from CLI, environment, or the optional default.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR)
        && !env_path.trim().is_empty()
    {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(Some(PathBuf::from(env_path)));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_NAME);
    Ok(default.is_file().then_some(default))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Returns a required non-blank setting.
fn required<'a>(
    value: Option<&'a str>,
    label: &str,
    env_var: &str,
    flag: &str,
) -> Result<&'a str, ConfigError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ConfigError::Missing(format!("{label}: set {env_var} or pass {flag}")))
}

/// Adds `https://` to bare hosts and strips trailing slashes.
fn normalize_host(host: &str) -> Result<String, ConfigError> {
    let trimmed = host.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid("jira.host must be non-empty".to_string()));
    }
    let candidate =
        if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };
    let url = Url::parse(&candidate)
        .map_err(|err| ConfigError::Invalid(format!("jira.host is not a valid url: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid(format!("jira.host scheme must be http or https: {}", url.scheme())));
    }
    Ok(candidate)
}
