// crates/jira-bridge-client/src/lib.rs
// ============================================================================
// Module: Jira Bridge Client
// Description: Issue-tracker backend interface and its Jira REST implementation.
// Purpose: Isolate every backend-native type and failure behind one trait.
// Dependencies: async-trait, reqwest, serde, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! [`IssueTracker`] is the capability set the dispatch core depends on.
//! [`JiraClient`] implements it over Jira REST v2 with basic authentication.
//! Backend responses are decoded into the `Remote*` types in [`types`]; every
//! failure surfaces as a tagged [`BackendError`].
//!
//! Security posture: backend responses are untrusted; bodies are size-limited
//! and credentials are never logged or sent to foreign hosts.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod jira;
pub mod tracker;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::BackendError;
pub use error::BackendErrorKind;
pub use jira::JiraClient;
pub use jira::JiraClientConfig;
pub use jira::MAX_RESPONSE_BYTES;
pub use tracker::IssueTracker;
pub use types::RemoteAttachment;
pub use types::RemoteComment;
pub use types::RemoteCommentPage;
pub use types::RemoteCreated;
pub use types::RemoteField;
pub use types::RemoteIssue;
pub use types::RemoteIssueFields;
pub use types::RemoteIssueType;
pub use types::RemoteLinkType;
pub use types::RemoteNamed;
pub use types::RemoteUser;
