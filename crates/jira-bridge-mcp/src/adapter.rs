// crates/jira-bridge-mcp/src/adapter.rs
// ============================================================================
// Module: Backend Adapter
// Description: One method per operation over the issue tracker collaborator.
// Purpose: Translate validated calls into backend requests and neutral shapes.
// Dependencies: jira-bridge-client, jira-bridge-broker, jira-bridge-core, tokio
// ============================================================================

//! ## Overview
//! [`BackendAdapter`] is the failure boundary between the dispatcher and the
//! backend. Every backend failure surfaces as a tagged [`AdapterError`]; every
//! success is projected into a [`jira_bridge_core::model`] shape.
//!
//! ## Invariants
//! - Attachments are fully resolved before any backend call that uses them.
//! - Optional parameters that were not supplied are never sent to the backend.
//! - A failed upload after a created comment is reported, never rolled back.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use jira_bridge_broker::AttachmentCodec;
use jira_bridge_broker::AttachmentPayload;
use jira_bridge_broker::CodecError;
use jira_bridge_broker::InlineEncoding;
use jira_bridge_broker::ResolvedAttachment;
use jira_bridge_client::BackendError;
use jira_bridge_client::IssueTracker;
use jira_bridge_client::RemoteAttachment;
use jira_bridge_client::RemoteComment;
use jira_bridge_client::RemoteIssue;
use jira_bridge_client::RemoteNamed;
use jira_bridge_client::RemoteUser;
use jira_bridge_core::ValidatedCall;
use jira_bridge_core::ValidationError;
use jira_bridge_core::json_type_name;
use jira_bridge_core::model::AttachmentContent;
use jira_bridge_core::model::AttachmentSaved;
use jira_bridge_core::model::AttachmentUploaded;
use jira_bridge_core::model::AttachmentView;
use jira_bridge_core::model::CommentAdded;
use jira_bridge_core::model::CommentView;
use jira_bridge_core::model::CommentWithAttachment;
use jira_bridge_core::model::CreatedIssue;
use jira_bridge_core::model::DeletedIssue;
use jira_bridge_core::model::FieldView;
use jira_bridge_core::model::IssueLinked;
use jira_bridge_core::model::IssueSummary;
use jira_bridge_core::model::IssueTypeView;
use jira_bridge_core::model::IssueView;
use jira_bridge_core::model::LinkTypeView;
use jira_bridge_core::model::UpdatedIssue;
use jira_bridge_core::model::UserView;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Upper bound applied to `maxResults`.
pub const MAX_SEARCH_RESULTS: u32 = 1000;

/// Step label of the upload in composite operations.
const ATTACHMENT_STEP: &str = "attachment";

/// Step label of the comment in composite operations.
const COMMENT_STEP: &str = "comment";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures raised while executing an operation.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// An argument was rejected after schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Attachment resolution or storage failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// The backend failed or rejected the request.
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// The requested link type is not known to the backend.
    #[error("unknown link type: {requested}; known link types: {}", .known.join(", "))]
    InvalidLinkType {
        /// Link type as supplied.
        requested: String,
        /// Link type names reported by the backend.
        known: Vec<String>,
    },
    /// A composite operation failed after earlier steps took effect.
    #[error("{step} step failed after {} succeeded: {source}", .completed.join(", "))]
    PartialFailure {
        /// Step that failed.
        step: &'static str,
        /// Steps that completed before the failure.
        completed: Vec<&'static str>,
        /// Id of the comment created before the failure.
        comment_id: String,
        /// Failure of the failing step.
        source: Box<AdapterError>,
    },
    /// Unanticipated failure inside the adapter.
    #[error("{0}")]
    Internal(String),
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Neutral projection produced by one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    /// `create_jira_issue`.
    Created(CreatedIssue),
    /// `get_issue`.
    Issue(Box<IssueView>),
    /// `update_issue`.
    Updated(UpdatedIssue),
    /// `delete_issue`.
    Deleted(DeletedIssue),
    /// `search_issues`.
    Issues(Vec<IssueSummary>),
    /// `add_comment`.
    CommentAdded(CommentAdded),
    /// `create_issue_link`.
    Linked(IssueLinked),
    /// `get_user`.
    User(UserView),
    /// `list_fields`.
    Fields(Vec<FieldView>),
    /// `list_issue_types`.
    IssueTypes(Vec<IssueTypeView>),
    /// `list_link_types`.
    LinkTypes(Vec<LinkTypeView>),
    /// `attach_file` and `attach_content`.
    Uploaded(AttachmentUploaded),
    /// `get_issue_attachment` with an output path.
    AttachmentSaved(AttachmentSaved),
    /// `get_issue_attachment` without an output path.
    AttachmentContent(AttachmentContent),
    /// `add_comment_with_attachment`.
    CommentWithAttachment(CommentWithAttachment),
}

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Executes validated calls against the issue tracker.
#[derive(Clone)]
pub struct BackendAdapter {
    /// Backend collaborator shared by all in-flight calls.
    tracker: Arc<dyn IssueTracker>,
    /// Attachment codec.
    codec: AttachmentCodec,
}

impl BackendAdapter {
    /// Creates an adapter over a backend and codec.
    #[must_use]
    pub fn new(tracker: Arc<dyn IssueTracker>, codec: AttachmentCodec) -> Self {
        Self {
            tracker,
            codec,
        }
    }

    /// Creates an issue.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the assignee or custom fields are invalid or the backend fails.
    pub async fn create_issue(&self, call: &ValidatedCall) -> Result<OperationOutput, AdapterError> {
        let mut fields = Map::new();
        fields.insert("project".to_string(), json!({"key": call.required_text("projectKey")?}));
        fields.insert("summary".to_string(), json!(call.required_text("summary")?));
        fields.insert("issuetype".to_string(), json!({"name": call.required_text("issueType")?}));
        self.insert_optional_fields(call, &mut fields).await?;
        let created = self.tracker.create_issue(fields).await?;
        Ok(OperationOutput::Created(CreatedIssue {
            key: created.key,
            id: created.id,
            self_url: created.self_url,
        }))
    }

    /// Fetches an issue with its comments and attachments.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Backend`] when the backend fails.
    pub async fn get_issue(&self, call: &ValidatedCall) -> Result<OperationOutput, AdapterError> {
        let issue = self.tracker.get_issue(call.required_text("issueKey")?).await?;
        Ok(OperationOutput::Issue(Box::new(project_issue(issue))))
    }

    /// Updates only the supplied fields of an issue.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when an argument is invalid or the backend fails.
    pub async fn update_issue(&self, call: &ValidatedCall) -> Result<OperationOutput, AdapterError> {
        let key = call.required_text("issueKey")?;
        let mut fields = Map::new();
        if let Some(summary) = call.text("summary") {
            fields.insert("summary".to_string(), json!(summary));
        }
        self.insert_optional_fields(call, &mut fields).await?;
        let names: Vec<String> = fields.keys().cloned().collect();
        if fields.is_empty() {
            self.tracker.get_issue(key).await?;
        } else {
            self.tracker.update_issue(key, fields).await?;
        }
        Ok(OperationOutput::Updated(UpdatedIssue {
            key: key.to_string(),
            updated: true,
            fields: names,
        }))
    }

    /// Deletes an issue.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Backend`] when the backend fails.
    pub async fn delete_issue(&self, call: &ValidatedCall) -> Result<OperationOutput, AdapterError> {
        let key = call.required_text("issueKey")?;
        self.tracker.delete_issue(key).await?;
        Ok(OperationOutput::Deleted(DeletedIssue {
            key: key.to_string(),
            deleted: true,
        }))
    }

    /// Runs a query, optionally scoped to a project.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when `maxResults` is not positive or the backend fails.
    pub async fn search_issues(&self, call: &ValidatedCall) -> Result<OperationOutput, AdapterError> {
        let filter = call.required_text("jql")?;
        let query = match call.text("projectKey") {
            Some(project) => scoped_query(project, filter),
            None => filter.to_string(),
        };
        let max_results = max_results(call.integer("maxResults"))?;
        let issues = self.tracker.search_issues(&query, max_results).await?;
        Ok(OperationOutput::Issues(issues.into_iter().map(project_summary).collect()))
    }

    /// Adds a comment to an issue.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Backend`] when the backend fails.
    pub async fn add_comment(&self, call: &ValidatedCall) -> Result<OperationOutput, AdapterError> {
        let key = call.required_text("issueKey")?;
        let comment = self.tracker.add_comment(key, call.required_text("comment")?).await?;
        Ok(OperationOutput::CommentAdded(CommentAdded {
            key: key.to_string(),
            comment_added: true,
            comment_id: comment.id,
        }))
    }

    /// Links two issues after checking the link type exists.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidLinkType`] for unknown link types and
    /// [`AdapterError::Backend`] when the backend fails.
    pub async fn create_issue_link(&self, call: &ValidatedCall) -> Result<OperationOutput, AdapterError> {
        let inward = call.required_text("inwardIssue")?;
        let outward = call.required_text("outwardIssue")?;
        let requested = call.required_text("linkType")?;
        let link_types = self.tracker.list_link_types().await?;
        let Some(link_type) = link_types.iter().find(|candidate| {
            candidate.name.eq_ignore_ascii_case(requested)
                || candidate.inward.eq_ignore_ascii_case(requested)
                || candidate.outward.eq_ignore_ascii_case(requested)
        }) else {
            return Err(AdapterError::InvalidLinkType {
                requested: requested.to_string(),
                known: link_types.iter().map(|candidate| candidate.name.clone()).collect(),
            });
        };
        self.tracker.create_link(&link_type.name, inward, outward).await?;
        Ok(OperationOutput::Linked(IssueLinked {
            inward_issue: inward.to_string(),
            outward_issue: outward.to_string(),
            link_type: link_type.name.clone(),
            linked: true,
        }))
    }

    /// Looks up a user by email address.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Backend`] with a not-found kind when no user matches.
    pub async fn get_user(&self, call: &ValidatedCall) -> Result<OperationOutput, AdapterError> {
        let user = self.find_user(call.required_text("email")?).await?;
        Ok(OperationOutput::User(UserView {
            account_id: user.account_id,
            display_name: user.display_name,
            email_address: user.email_address,
            active: user.active,
        }))
    }

    /// Lists field metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Backend`] when the backend fails.
    pub async fn list_fields(&self, _call: &ValidatedCall) -> Result<OperationOutput, AdapterError> {
        let fields = self.tracker.list_fields().await?;
        Ok(OperationOutput::Fields(
            fields
                .into_iter()
                .map(|field| FieldView {
                    id: field.id,
                    name: field.name,
                    custom: field.custom,
                })
                .collect(),
        ))
    }

    /// Lists issue types.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Backend`] when the backend fails.
    pub async fn list_issue_types(&self, _call: &ValidatedCall) -> Result<OperationOutput, AdapterError> {
        let issue_types = self.tracker.list_issue_types().await?;
        Ok(OperationOutput::IssueTypes(
            issue_types
                .into_iter()
                .map(|issue_type| IssueTypeView {
                    id: issue_type.id,
                    name: issue_type.name,
                    description: issue_type.description,
                })
                .collect(),
        ))
    }

    /// Lists issue link types.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Backend`] when the backend fails.
    pub async fn list_link_types(&self, _call: &ValidatedCall) -> Result<OperationOutput, AdapterError> {
        let link_types = self.tracker.list_link_types().await?;
        Ok(OperationOutput::LinkTypes(
            link_types
                .into_iter()
                .map(|link_type| LinkTypeView {
                    id: link_type.id,
                    name: link_type.name,
                    inward: link_type.inward,
                    outward: link_type.outward,
                })
                .collect(),
        ))
    }

    /// Uploads a local file as an attachment.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Codec`] when the file cannot be read and
    /// [`AdapterError::Backend`] when the upload fails.
    pub async fn attach_file(&self, call: &ValidatedCall) -> Result<OperationOutput, AdapterError> {
        let key = call.required_text("issueKey")?;
        let payload = AttachmentPayload::path(call.required_text("filePath")?);
        let resolved = self.resolve(payload).await?;
        self.upload(key, resolved).await.map(OperationOutput::Uploaded)
    }

    /// Uploads inline content as an attachment.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Codec`] when the content cannot be decoded and
    /// [`AdapterError::Backend`] when the upload fails.
    pub async fn attach_content(&self, call: &ValidatedCall) -> Result<OperationOutput, AdapterError> {
        let key = call.required_text("issueKey")?;
        let encoding = match call.text("encoding") {
            Some(label) => InlineEncoding::parse(label)?,
            None => InlineEncoding::default(),
        };
        let payload = AttachmentPayload::inline(
            call.required_text("filename")?,
            call.required_text("content")?,
            encoding,
        );
        let resolved = self.resolve(payload).await?;
        self.upload(key, resolved).await.map(OperationOutput::Uploaded)
    }

    /// Retrieves an attachment by id or file name.
    ///
    /// With `outputPath` the bytes are written there; otherwise they are
    /// returned as base64 content.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Backend`] when the attachment is not found or
    /// the download fails, and [`AdapterError::Codec`] when writing fails.
    pub async fn get_issue_attachment(&self, call: &ValidatedCall) -> Result<OperationOutput, AdapterError> {
        let key = call.required_text("issueKey")?;
        let wanted = call.required_text("attachmentId")?;
        let issue = self.tracker.get_issue(key).await?;
        let attachment = issue
            .fields
            .attachment
            .unwrap_or_default()
            .into_iter()
            .find(|candidate| candidate.id == wanted || candidate.filename == wanted)
            .ok_or_else(|| BackendError::not_found(format!("attachment {wanted} not found on {key}")))?;
        let bytes = self.tracker.download_attachment(&attachment).await?;

        if let Some(output_path) = call.text("outputPath") {
            let size = self.write(PathBuf::from(output_path), bytes).await?;
            return Ok(OperationOutput::AttachmentSaved(AttachmentSaved {
                filename: attachment.filename,
                size,
                saved_to: output_path.to_string(),
            }));
        }
        Ok(OperationOutput::AttachmentContent(AttachmentContent {
            filename: attachment.filename,
            size: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            content: AttachmentCodec::encode_inline(&bytes),
        }))
    }

    /// Adds a comment, then uploads a local file.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Codec`] when the file cannot be read (before any
    /// backend call), and [`AdapterError::PartialFailure`] when the upload
    /// fails after the comment was created.
    pub async fn add_comment_with_attachment(
        &self,
        call: &ValidatedCall,
    ) -> Result<OperationOutput, AdapterError> {
        let key = call.required_text("issueKey")?;
        let body = call.required_text("comment")?;
        let resolved = self.resolve(AttachmentPayload::path(call.required_text("filePath")?)).await?;
        let comment = self.tracker.add_comment(key, body).await?;
        let uploaded = self.upload(key, resolved).await.map_err(|err| AdapterError::PartialFailure {
            step: ATTACHMENT_STEP,
            completed: vec![COMMENT_STEP],
            comment_id: comment.id.clone(),
            source: Box::new(err),
        })?;
        Ok(OperationOutput::CommentWithAttachment(CommentWithAttachment {
            key: uploaded.key,
            comment_added: true,
            comment_id: comment.id,
            attachment_added: true,
            filename: uploaded.filename,
            size: uploaded.size,
            sha256: uploaded.sha256,
            attachment_id: uploaded.attachment_id,
        }))
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    /// Inserts the optional fields shared by create and update.
    async fn insert_optional_fields(
        &self,
        call: &ValidatedCall,
        fields: &mut Map<String, Value>,
    ) -> Result<(), AdapterError> {
        if let Some(description) = call.text("description") {
            fields.insert("description".to_string(), json!(description));
        }
        if let Some(priority) = call.text("priority") {
            fields.insert("priority".to_string(), json!({"name": priority}));
        }
        if let Some(assignee) = call.text("assignee") {
            let account_id = self.resolve_assignee(assignee).await?;
            fields.insert("assignee".to_string(), json!({"accountId": account_id}));
        }
        if let Some(custom) = call.json("customFields") {
            let Value::Object(custom) = custom else {
                return Err(AdapterError::Validation(ValidationError::InvalidParameterType {
                    parameter: "customFields".to_string(),
                    expected: "object",
                    found: json_type_name(custom),
                }));
            };
            for (name, value) in custom {
                fields.insert(name.clone(), value.clone());
            }
        }
        Ok(())
    }

    /// Resolves an email address to an account id; other values pass through.
    async fn resolve_assignee(&self, assignee: &str) -> Result<String, AdapterError> {
        if assignee.contains('@') {
            return Ok(self.find_user(assignee).await?.account_id);
        }
        Ok(assignee.to_string())
    }

    /// Finds a user, preferring an exact email match.
    async fn find_user(&self, email: &str) -> Result<RemoteUser, AdapterError> {
        let users = self.tracker.search_users(email).await?;
        let exact = users.iter().position(|user| {
            user.email_address.as_deref().is_some_and(|address| address.eq_ignore_ascii_case(email))
        });
        users
            .into_iter()
            .nth(exact.unwrap_or(0))
            .ok_or_else(|| AdapterError::Backend(BackendError::not_found(format!("user with email {email} not found"))))
    }

    /// Resolves an attachment payload off the async runtime.
    async fn resolve(&self, payload: AttachmentPayload) -> Result<ResolvedAttachment, AdapterError> {
        let codec = self.codec.clone();
        let resolved = tokio::task::spawn_blocking(move || codec.resolve(&payload))
            .await
            .map_err(|err| AdapterError::Internal(format!("attachment task failed: {err}")))??;
        Ok(resolved)
    }

    /// Writes retrieved bytes off the async runtime.
    async fn write(&self, path: PathBuf, bytes: Vec<u8>) -> Result<u64, AdapterError> {
        let codec = self.codec.clone();
        let written = tokio::task::spawn_blocking(move || codec.write_to_path(&path, &bytes))
            .await
            .map_err(|err| AdapterError::Internal(format!("attachment task failed: {err}")))??;
        Ok(written)
    }

    /// Uploads a resolved attachment and reports its digest.
    async fn upload(&self, key: &str, resolved: ResolvedAttachment) -> Result<AttachmentUploaded, AdapterError> {
        let size = resolved.size();
        let ResolvedAttachment {
            filename,
            bytes,
            sha256,
        } = resolved;
        let created = self.tracker.upload_attachment(key, &filename, bytes).await?;
        Ok(AttachmentUploaded {
            key: key.to_string(),
            filename,
            attached: true,
            size,
            sha256,
            attachment_id: created.into_iter().next().map(|attachment| attachment.id),
        })
    }
}

// ============================================================================
// SECTION: Query Composition
// ============================================================================

/// Scopes a query to a project, keeping any trailing `ORDER BY` clause last.
#[must_use]
pub fn scoped_query(project: &str, filter: &str) -> String {
    let quoted = format!("\"{}\"", project.replace('\\', "\\\\").replace('"', "\\\""));
    let (condition, ordering) = split_order_by(filter);
    let condition = condition.trim();
    let mut query = if condition.is_empty() {
        format!("project = {quoted}")
    } else {
        format!("project = {quoted} AND ({condition})")
    };
    if let Some(ordering) = ordering {
        query.push(' ');
        query.push_str(ordering.trim());
    }
    query
}

/// Splits a query at its last top-level `ORDER BY` clause.
///
/// `ORDER` and `BY` must be whole words separated only by whitespace, outside
/// quoted strings and parentheses. Matching is case-insensitive.
fn split_order_by(filter: &str) -> (&str, Option<&str>) {
    let mut split = None;
    let mut previous: Option<(usize, &str)> = None;
    let mut word_start: Option<usize> = None;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut depth = 0usize;
    for (index, ch) in filter.char_indices().chain(std::iter::once((filter.len(), ' '))) {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
            }
            continue;
        }
        if ch.is_alphanumeric() || ch == '_' {
            if word_start.is_none() {
                word_start = Some(index);
            }
            continue;
        }
        if let Some(start) = word_start.take()
            && depth == 0
        {
            let word = &filter[start .. index];
            if word.eq_ignore_ascii_case("by")
                && let Some((order_start, order)) = previous
                && order.eq_ignore_ascii_case("order")
            {
                split = Some(order_start);
            }
            previous = Some((start, word));
        }
        match ch {
            '"' | '\'' => {
                quote = Some(ch);
                previous = None;
            }
            '(' => {
                depth += 1;
                previous = None;
            }
            ')' => {
                depth = depth.saturating_sub(1);
                previous = None;
            }
            ch if ch.is_whitespace() => {}
            _ => previous = None,
        }
    }
    match split {
        Some(index) => (&filter[.. index], Some(&filter[index ..])),
        None => (filter, None),
    }
}

/// Converts `maxResults` into the backend page size.
fn max_results(requested: Option<i64>) -> Result<u32, AdapterError> {
    let requested = requested.unwrap_or(30);
    if requested < 1 {
        return Err(AdapterError::Validation(ValidationError::InvalidParameterType {
            parameter: "maxResults".to_string(),
            expected: "positive integer",
            found: "number",
        }));
    }
    Ok(u32::try_from(requested).unwrap_or(MAX_SEARCH_RESULTS).min(MAX_SEARCH_RESULTS))
}

// ============================================================================
// SECTION: Projections
// ============================================================================

/// Projects a backend issue into the full issue view.
fn project_issue(issue: RemoteIssue) -> IssueView {
    let fields = issue.fields;
    IssueView {
        key: issue.key,
        id: issue.id,
        summary: fields.summary.unwrap_or_default(),
        description: fields.description,
        status: fields.status.map(named),
        priority: fields.priority.map(named),
        assignee: fields.assignee.map(display_name),
        issue_type: fields.issuetype.map(named),
        comments: fields
            .comment
            .map(|page| page.comments)
            .unwrap_or_default()
            .into_iter()
            .map(project_comment)
            .collect(),
        attachments: fields.attachment.unwrap_or_default().into_iter().map(project_attachment).collect(),
    }
}

/// Projects a backend issue into the search summary view.
fn project_summary(issue: RemoteIssue) -> IssueSummary {
    let fields = issue.fields;
    IssueSummary {
        key: issue.key,
        id: issue.id,
        summary: fields.summary.unwrap_or_default(),
        status: fields.status.map(named),
        priority: fields.priority.map(named),
        assignee: fields.assignee.map(display_name),
        issue_type: fields.issuetype.map(named),
    }
}

/// Projects a backend comment to its neutral view.
fn project_comment(comment: RemoteComment) -> CommentView {
    CommentView {
        id: comment.id,
        author: comment.author.map(display_name),
        body: comment.body,
        created: comment.created,
    }
}

/// Projects attachment metadata to its neutral view.
fn project_attachment(attachment: RemoteAttachment) -> AttachmentView {
    AttachmentView {
        id: attachment.id,
        filename: attachment.filename,
        size: attachment.size,
        mime_type: attachment.mime_type,
        created: attachment.created,
    }
}

/// Returns the display name of a named backend value.
fn named(named: RemoteNamed) -> String {
    named.name
}

/// Display name, falling back to the account id.
fn display_name(user: RemoteUser) -> String {
    if user.display_name.is_empty() { user.account_id } else { user.display_name }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
