// crates/jira-bridge-cli/src/tests/support.rs
// ============================================================================
// Module: CLI Test Support
// Description: Offline issue tracker for session tests.
// Purpose: Build a dispatcher whose backend answers only metadata lookups.
// Dependencies: jira-bridge-client, jira-bridge-mcp, async-trait
// ============================================================================

//! ## Overview
//! [`OfflineTracker`] answers `list_link_types` with one fixed entry and fails
//! every other backend call with a generic backend error.

use std::sync::Arc;

use async_trait::async_trait;
use jira_bridge_broker::AttachmentCodec;
use jira_bridge_client::BackendError;
use jira_bridge_client::IssueTracker;
use jira_bridge_client::RemoteAttachment;
use jira_bridge_client::RemoteComment;
use jira_bridge_client::RemoteCreated;
use jira_bridge_client::RemoteField;
use jira_bridge_client::RemoteIssue;
use jira_bridge_client::RemoteIssueType;
use jira_bridge_client::RemoteLinkType;
use jira_bridge_client::RemoteUser;
use jira_bridge_mcp::BackendAdapter;
use jira_bridge_mcp::Dispatcher;
use serde_json::Map;
use serde_json::Value;

/// Backend that is reachable for link types only.
pub struct OfflineTracker;

/// Fails a backend call the way an unreachable host would.
fn offline<T>() -> Result<T, BackendError> {
    Err(BackendError::other("backend offline"))
}

#[async_trait]
impl IssueTracker for OfflineTracker {
    async fn create_issue(&self, _fields: Map<String, Value>) -> Result<RemoteCreated, BackendError> {
        offline()
    }

    async fn get_issue(&self, _key: &str) -> Result<RemoteIssue, BackendError> {
        offline()
    }

    async fn update_issue(&self, _key: &str, _fields: Map<String, Value>) -> Result<(), BackendError> {
        offline()
    }

    async fn delete_issue(&self, _key: &str) -> Result<(), BackendError> {
        offline()
    }

    async fn search_issues(&self, _jql: &str, _max_results: u32) -> Result<Vec<RemoteIssue>, BackendError> {
        offline()
    }

    async fn add_comment(&self, _key: &str, _body: &str) -> Result<RemoteComment, BackendError> {
        offline()
    }

    async fn upload_attachment(
        &self,
        _key: &str,
        _filename: &str,
        _bytes: Vec<u8>,
    ) -> Result<Vec<RemoteAttachment>, BackendError> {
        offline()
    }

    async fn download_attachment(&self, _attachment: &RemoteAttachment) -> Result<Vec<u8>, BackendError> {
        offline()
    }

    async fn create_link(&self, _link_type: &str, _inward: &str, _outward: &str) -> Result<(), BackendError> {
        offline()
    }

    async fn list_fields(&self) -> Result<Vec<RemoteField>, BackendError> {
        offline()
    }

    async fn list_issue_types(&self) -> Result<Vec<RemoteIssueType>, BackendError> {
        offline()
    }

    async fn list_link_types(&self) -> Result<Vec<RemoteLinkType>, BackendError> {
        Ok(vec![RemoteLinkType {
            id: "1".to_string(),
            name: "Blocks".to_string(),
            inward: "is blocked by".to_string(),
            outward: "blocks".to_string(),
        }])
    }

    async fn search_users(&self, _query: &str) -> Result<Vec<RemoteUser>, BackendError> {
        offline()
    }
}

/// Builds a dispatcher over [`OfflineTracker`].
pub fn dispatcher() -> Dispatcher {
    Dispatcher::new(BackendAdapter::new(Arc::new(OfflineTracker), AttachmentCodec::default()))
}
