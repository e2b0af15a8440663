// crates/jira-bridge-core/src/model.rs
// ============================================================================
// Module: Neutral Data Shapes
// Description: Backend-independent projections returned by operations.
// Purpose: Fix the JSON keys callers observe regardless of backend.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Projections of backend entities. Field renames pin the historical JSON
//! keys, which mix `camelCase` and `snake_case`; they are part of the
//! external contract and must not be normalized.

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Issues
// ============================================================================

/// Full issue projection returned by `get_issue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueView {
    /// Issue key.
    pub key: String,
    /// Backend issue id.
    pub id: String,
    /// Summary line.
    pub summary: String,
    /// Description text.
    pub description: Option<String>,
    /// Status name.
    pub status: Option<String>,
    /// Priority name.
    pub priority: Option<String>,
    /// Assignee display name.
    pub assignee: Option<String>,
    /// Issue type name.
    #[serde(rename = "type")]
    pub issue_type: Option<String>,
    /// Comments in backend order.
    pub comments: Vec<CommentView>,
    /// Attachments in backend order.
    pub attachments: Vec<AttachmentView>,
}

/// Reduced issue projection used by search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    /// Issue key.
    pub key: String,
    /// Backend issue id.
    pub id: String,
    /// Summary line.
    pub summary: String,
    /// Status name.
    pub status: Option<String>,
    /// Priority name.
    pub priority: Option<String>,
    /// Assignee display name.
    pub assignee: Option<String>,
    /// Issue type name.
    #[serde(rename = "type")]
    pub issue_type: Option<String>,
}

/// Comment projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    /// Comment id.
    pub id: String,
    /// Author display name.
    pub author: Option<String>,
    /// Comment body.
    pub body: String,
    /// Creation timestamp as reported by the backend.
    pub created: Option<String>,
}

/// Attachment metadata projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentView {
    /// Attachment id.
    pub id: String,
    /// File name.
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type.
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    /// Creation timestamp as reported by the backend.
    pub created: Option<String>,
}

// ============================================================================
// SECTION: Mutation Results
// ============================================================================

/// Result of `create_jira_issue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// New issue key.
    pub key: String,
    /// New issue id.
    pub id: String,
    /// REST URL of the new issue.
    #[serde(rename = "self")]
    pub self_url: String,
}

/// Result of `update_issue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedIssue {
    /// Issue key.
    pub key: String,
    /// Always true on success.
    pub updated: bool,
    /// Names of the parameters that were sent.
    pub fields: Vec<String>,
}

/// Result of `delete_issue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedIssue {
    /// Issue key.
    pub key: String,
    /// Always true on success.
    pub deleted: bool,
}

/// Result of `add_comment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAdded {
    /// Issue key.
    pub key: String,
    /// Always true on success.
    pub comment_added: bool,
    /// Created comment id.
    #[serde(rename = "commentId")]
    pub comment_id: String,
}

/// Result of `create_issue_link`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueLinked {
    /// Inward issue key.
    #[serde(rename = "inwardIssue")]
    pub inward_issue: String,
    /// Outward issue key.
    #[serde(rename = "outwardIssue")]
    pub outward_issue: String,
    /// Link type name as resolved against the backend.
    #[serde(rename = "linkType")]
    pub link_type: String,
    /// Always true on success.
    pub linked: bool,
}

/// Result of `attach_file` and `attach_content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentUploaded {
    /// Issue key.
    pub key: String,
    /// Uploaded file name.
    pub filename: String,
    /// Always true on success.
    pub attached: bool,
    /// Uploaded size in bytes.
    pub size: u64,
    /// Lowercase hex SHA-256 of the uploaded bytes.
    pub sha256: String,
    /// Attachment id assigned by the backend.
    #[serde(rename = "attachmentId")]
    pub attachment_id: Option<String>,
}

/// Result of `add_comment_with_attachment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentWithAttachment {
    /// Issue key.
    pub key: String,
    /// Always true on success.
    pub comment_added: bool,
    /// Created comment id.
    #[serde(rename = "commentId")]
    pub comment_id: String,
    /// Always true on success.
    pub attachment_added: bool,
    /// Uploaded file name.
    pub filename: String,
    /// Uploaded size in bytes.
    pub size: u64,
    /// Lowercase hex SHA-256 of the uploaded bytes.
    pub sha256: String,
    /// Attachment id assigned by the backend.
    #[serde(rename = "attachmentId")]
    pub attachment_id: Option<String>,
}

/// Result of `get_issue_attachment` with an output path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSaved {
    /// Attachment file name.
    pub filename: String,
    /// Bytes written.
    pub size: u64,
    /// Path the bytes were written to.
    pub saved_to: String,
}

/// Result of `get_issue_attachment` without an output path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentContent {
    /// Attachment file name.
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
    /// Standard base64 encoding of the bytes.
    pub content: String,
}

// ============================================================================
// SECTION: Metadata
// ============================================================================

/// User projection returned by `get_user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    /// Backend account id.
    #[serde(rename = "accountId")]
    pub account_id: String,
    /// Display name.
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Email address when visible.
    #[serde(rename = "emailAddress")]
    pub email_address: Option<String>,
    /// Whether the account is active.
    pub active: bool,
}

/// Field listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldView {
    /// Field id.
    pub id: String,
    /// Field name.
    pub name: String,
    /// True for custom fields.
    pub custom: bool,
}

/// Issue type listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTypeView {
    /// Issue type id.
    pub id: String,
    /// Issue type name.
    pub name: String,
    /// Description text.
    pub description: Option<String>,
}

/// Link type listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTypeView {
    /// Link type id.
    pub id: String,
    /// Link type name.
    pub name: String,
    /// Inward phrase.
    pub inward: String,
    /// Outward phrase.
    pub outward: String,
}
