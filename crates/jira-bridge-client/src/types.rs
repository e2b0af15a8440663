// crates/jira-bridge-client/src/types.rs
// ============================================================================
// Module: Remote Types
// Description: Backend-native entities decoded from Jira REST responses.
// Purpose: Give the adapter typed access to backend payloads.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Deserialization targets for Jira REST v2 payloads. Every optional field is
//! defaulted so that sparse responses still decode; projection into neutral
//! shapes happens in the adapter, not here.

use serde::Deserialize;
use serde::Serialize;

/// Entity reference carrying only a name (status, priority, issue type).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteNamed {
    /// Entity id.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

impl RemoteNamed {
    /// Creates a named reference without an id.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

/// Backend user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    /// Account id.
    #[serde(default)]
    pub account_id: String,
    /// Display name.
    #[serde(default)]
    pub display_name: String,
    /// Email address when visible to the caller.
    #[serde(default)]
    pub email_address: Option<String>,
    /// Whether the account is active.
    #[serde(default)]
    pub active: bool,
}

/// Issue comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteComment {
    /// Comment id.
    pub id: String,
    /// Comment author.
    #[serde(default)]
    pub author: Option<RemoteUser>,
    /// Comment body.
    #[serde(default)]
    pub body: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created: Option<String>,
}

/// Comment page embedded in issue fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCommentPage {
    /// Comments on the page.
    #[serde(default)]
    pub comments: Vec<RemoteComment>,
}

/// Issue attachment metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAttachment {
    /// Attachment id.
    pub id: String,
    /// File name.
    #[serde(default)]
    pub filename: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// MIME type.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created: Option<String>,
    /// Download URL for the attachment bytes.
    #[serde(default)]
    pub content: Option<String>,
}

/// Issue field map subset used by projections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteIssueFields {
    /// Summary line.
    #[serde(default)]
    pub summary: Option<String>,
    /// Description text.
    #[serde(default)]
    pub description: Option<String>,
    /// Workflow status.
    #[serde(default)]
    pub status: Option<RemoteNamed>,
    /// Priority.
    #[serde(default)]
    pub priority: Option<RemoteNamed>,
    /// Assignee.
    #[serde(default)]
    pub assignee: Option<RemoteUser>,
    /// Issue type.
    #[serde(default)]
    pub issuetype: Option<RemoteNamed>,
    /// Embedded comments.
    #[serde(default)]
    pub comment: Option<RemoteCommentPage>,
    /// Attachments.
    #[serde(default)]
    pub attachment: Option<Vec<RemoteAttachment>>,
}

/// Issue as returned by get and search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteIssue {
    /// Issue id.
    pub id: String,
    /// Issue key.
    pub key: String,
    /// Issue fields.
    #[serde(default)]
    pub fields: RemoteIssueFields,
}

/// Response to issue creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCreated {
    /// New issue id.
    pub id: String,
    /// New issue key.
    pub key: String,
    /// REST URL of the new issue.
    #[serde(rename = "self", default)]
    pub self_url: String,
}

/// Field metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteField {
    /// Field id.
    pub id: String,
    /// Field name.
    #[serde(default)]
    pub name: String,
    /// True for custom fields.
    #[serde(default)]
    pub custom: bool,
}

/// Issue type metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteIssueType {
    /// Issue type id.
    pub id: String,
    /// Issue type name.
    #[serde(default)]
    pub name: String,
    /// Description text.
    #[serde(default)]
    pub description: Option<String>,
}

/// Issue link type metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLinkType {
    /// Link type id.
    pub id: String,
    /// Link type name.
    #[serde(default)]
    pub name: String,
    /// Inward phrase.
    #[serde(default)]
    pub inward: String,
    /// Outward phrase.
    #[serde(default)]
    pub outward: String,
}

/// Link type listing wrapper.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RemoteLinkTypeList {
    /// Link types.
    #[serde(default)]
    pub issue_link_types: Vec<RemoteLinkType>,
}

/// Search response page.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RemoteSearchPage {
    /// Matching issues.
    #[serde(default)]
    pub issues: Vec<RemoteIssue>,
}
