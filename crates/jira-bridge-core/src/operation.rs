// crates/jira-bridge-core/src/operation.rs
// ============================================================================
// Module: Operation Identifiers
// Description: Canonical operation names exposed by Jira Bridge.
// Purpose: Shared operation naming across the registry, dispatcher, and front ends.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Canonical operation identifiers. These names are part of the external
//! contract surface: agent hosts and scripts call them verbatim.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Canonical operation names for Jira Bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationName {
    /// Create a new issue.
    #[serde(rename = "create_jira_issue")]
    CreateIssue,
    /// Fetch an issue with comments and attachments.
    GetIssue,
    /// Update fields on an existing issue.
    UpdateIssue,
    /// Delete an issue.
    DeleteIssue,
    /// Search issues with a query string.
    SearchIssues,
    /// Add a comment to an issue.
    AddComment,
    /// Link two issues.
    CreateIssueLink,
    /// Look up a user by email address.
    GetUser,
    /// List the fields known to the backend.
    ListFields,
    /// List issue types.
    ListIssueTypes,
    /// List issue link types.
    ListLinkTypes,
    /// Attach a local file to an issue.
    AttachFile,
    /// Attach inline content to an issue.
    AttachContent,
    /// Retrieve an attachment from an issue.
    GetIssueAttachment,
    /// Add a comment and attach a local file.
    AddCommentWithAttachment,
}

impl OperationName {
    /// Returns the canonical string name for the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateIssue => "create_jira_issue",
            Self::GetIssue => "get_issue",
            Self::UpdateIssue => "update_issue",
            Self::DeleteIssue => "delete_issue",
            Self::SearchIssues => "search_issues",
            Self::AddComment => "add_comment",
            Self::CreateIssueLink => "create_issue_link",
            Self::GetUser => "get_user",
            Self::ListFields => "list_fields",
            Self::ListIssueTypes => "list_issue_types",
            Self::ListLinkTypes => "list_link_types",
            Self::AttachFile => "attach_file",
            Self::AttachContent => "attach_content",
            Self::GetIssueAttachment => "get_issue_attachment",
            Self::AddCommentWithAttachment => "add_comment_with_attachment",
        }
    }

    /// Returns all operation names in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::CreateIssue,
            Self::GetIssue,
            Self::UpdateIssue,
            Self::DeleteIssue,
            Self::SearchIssues,
            Self::AddComment,
            Self::CreateIssueLink,
            Self::GetUser,
            Self::ListFields,
            Self::ListIssueTypes,
            Self::ListLinkTypes,
            Self::AttachFile,
            Self::AttachContent,
            Self::GetIssueAttachment,
            Self::AddCommentWithAttachment,
        ]
    }

    /// Parses an operation name from its string representation.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "create_jira_issue" => Some(Self::CreateIssue),
            "get_issue" => Some(Self::GetIssue),
            "update_issue" => Some(Self::UpdateIssue),
            "delete_issue" => Some(Self::DeleteIssue),
            "search_issues" => Some(Self::SearchIssues),
            "add_comment" => Some(Self::AddComment),
            "create_issue_link" => Some(Self::CreateIssueLink),
            "get_user" => Some(Self::GetUser),
            "list_fields" => Some(Self::ListFields),
            "list_issue_types" => Some(Self::ListIssueTypes),
            "list_link_types" => Some(Self::ListLinkTypes),
            "attach_file" => Some(Self::AttachFile),
            "attach_content" => Some(Self::AttachContent),
            "get_issue_attachment" => Some(Self::GetIssueAttachment),
            "add_comment_with_attachment" => Some(Self::AddCommentWithAttachment),
            _ => None,
        }
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
