// crates/jira-bridge-client/src/tracker.rs
// ============================================================================
// Module: Issue Tracker Interface
// Description: Capability set the dispatch core requires from a backend.
// Purpose: Decouple operation handling from any concrete client library.
// Dependencies: async-trait, serde_json
// ============================================================================

//! ## Overview
//! [`IssueTracker`] lists the backend capabilities the operations need.
//! Implementations must be safe for concurrent use: a single handle is shared
//! by every in-flight call.

use async_trait::async_trait;
use serde_json::Map;
use serde_json::Value;

use crate::error::BackendError;
use crate::types::RemoteAttachment;
use crate::types::RemoteComment;
use crate::types::RemoteCreated;
use crate::types::RemoteField;
use crate::types::RemoteIssue;
use crate::types::RemoteIssueType;
use crate::types::RemoteLinkType;
use crate::types::RemoteUser;

/// Issue-tracker backend capabilities.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Creates an issue from a backend field map.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend rejects the request.
    async fn create_issue(&self, fields: Map<String, Value>) -> Result<RemoteCreated, BackendError>;

    /// Fetches an issue with comments and attachments.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the issue cannot be fetched.
    async fn get_issue(&self, key: &str) -> Result<RemoteIssue, BackendError>;

    /// Updates only the supplied fields of an issue.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend rejects the update.
    async fn update_issue(&self, key: &str, fields: Map<String, Value>) -> Result<(), BackendError>;

    /// Deletes an issue.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the issue cannot be deleted.
    async fn delete_issue(&self, key: &str) -> Result<(), BackendError>;

    /// Runs a query and returns up to `max_results` issues.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the query fails.
    async fn search_issues(&self, jql: &str, max_results: u32) -> Result<Vec<RemoteIssue>, BackendError>;

    /// Adds a comment to an issue.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the comment cannot be created.
    async fn add_comment(&self, key: &str, body: &str) -> Result<RemoteComment, BackendError>;

    /// Uploads an attachment and returns the created attachment records.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the upload fails.
    async fn upload_attachment(
        &self,
        key: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<Vec<RemoteAttachment>, BackendError>;

    /// Downloads the bytes of an attachment.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the download fails.
    async fn download_attachment(&self, attachment: &RemoteAttachment) -> Result<Vec<u8>, BackendError>;

    /// Links two issues with the named link type.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the link cannot be created.
    async fn create_link(&self, link_type: &str, inward: &str, outward: &str) -> Result<(), BackendError>;

    /// Lists all fields.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the listing fails.
    async fn list_fields(&self) -> Result<Vec<RemoteField>, BackendError>;

    /// Lists all issue types.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the listing fails.
    async fn list_issue_types(&self) -> Result<Vec<RemoteIssueType>, BackendError>;

    /// Lists all issue link types.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the listing fails.
    async fn list_link_types(&self) -> Result<Vec<RemoteLinkType>, BackendError>;

    /// Searches users by email address or name fragment.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the search fails.
    async fn search_users(&self, query: &str) -> Result<Vec<RemoteUser>, BackendError>;
}
