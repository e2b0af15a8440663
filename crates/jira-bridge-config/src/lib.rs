// crates/jira-bridge-config/src/lib.rs
// ============================================================================
// Module: Jira Bridge Config
// Description: Startup configuration for Jira Bridge.
// Purpose: Load, merge, and validate configuration once per process.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! Configuration is merged from an optional TOML file, the `JIRA_*`
//! environment variables, and command-line overrides, in that order, then
//! validated once. Missing credentials are a startup failure, never a
//! per-call error.

pub mod config;

pub use config::AttachmentConfig;
pub use config::AuditConfig;
pub use config::AuditSinkKind;
pub use config::BridgeConfig;
pub use config::ConfigError;
pub use config::ConfigOverrides;
pub use config::JiraConfig;
pub use config::JiraCredentials;
pub use config::ServerConfig;
pub use config::ServerTransport;
