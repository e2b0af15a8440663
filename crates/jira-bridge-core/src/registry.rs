// crates/jira-bridge-core/src/registry.rs
// ============================================================================
// Module: Operation Registry
// Description: Static table of operations and their parameter schemas.
// Purpose: Provide the contract boundary front ends reflect when advertising tools.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The registry is a `static` table holding one [`Operation`] per
//! [`OperationName`]. Each entry declares an ordered parameter list with type
//! and presence policy. The table is read-only process-wide state: it is
//! built at compile time and never mutated.
//!
//! ## Invariants
//! - Every [`OperationName`] has exactly one entry, in canonical order.
//! - Parameter names are unique within an operation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::operation::OperationName;

// ============================================================================
// SECTION: Parameter Schema
// ============================================================================

/// Declared type of an operation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Plain string value.
    String,
    /// Integral number.
    Integer,
    /// Opaque JSON value passed through to the backend.
    Json,
}

impl ParameterKind {
    /// Returns a stable label for the parameter type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Json => "json",
        }
    }
}

/// Default applied to an optional parameter when the caller omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    /// String default.
    Text(&'static str),
    /// Integer default.
    Integer(i64),
}

impl DefaultValue {
    /// Returns the default as a JSON value.
    #[must_use]
    pub fn to_json(self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.to_string()),
            Self::Integer(number) => Value::from(number),
        }
    }
}

/// Presence policy for a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Caller must supply the parameter.
    Required,
    /// Omitted from the validated call when absent.
    Optional,
    /// Filled with the default when absent.
    Defaulted(DefaultValue),
}

impl Presence {
    /// Returns true when the parameter is required.
    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Required)
    }
}

/// Declared parameter of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Parameter name as it appears in argument bags.
    pub name: &'static str,
    /// Declared type.
    pub kind: ParameterKind,
    /// Presence policy.
    pub presence: Presence,
    /// Human-readable description for tool listings.
    pub description: &'static str,
}

/// Builds a required string parameter.
const fn required(name: &'static str, description: &'static str) -> ParameterSpec {
    ParameterSpec {
        name,
        kind: ParameterKind::String,
        presence: Presence::Required,
        description,
    }
}

/// Builds an optional string parameter.
const fn optional(name: &'static str, description: &'static str) -> ParameterSpec {
    ParameterSpec {
        name,
        kind: ParameterKind::String,
        presence: Presence::Optional,
        description,
    }
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Registered operation with its parameter schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Canonical operation name.
    pub name: OperationName,
    /// Description advertised to clients.
    pub description: &'static str,
    /// Ordered parameter declarations.
    pub parameters: &'static [ParameterSpec],
}

impl Operation {
    /// Returns the declared parameter with the given name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&'static ParameterSpec> {
        self.parameters.iter().find(|parameter| parameter.name == name)
    }

    /// Returns the names of the required parameters in declaration order.
    #[must_use]
    pub fn required_parameters(&self) -> Vec<&'static str> {
        self.parameters
            .iter()
            .filter(|parameter| parameter.presence.is_required())
            .map(|parameter| parameter.name)
            .collect()
    }

    /// Builds the JSON Schema for the operation's argument bag.
    #[must_use]
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for parameter in self.parameters {
            let mut schema = Map::new();
            match parameter.kind {
                ParameterKind::String => {
                    schema.insert("type".to_string(), json!("string"));
                }
                ParameterKind::Integer => {
                    schema.insert("type".to_string(), json!("integer"));
                }
                ParameterKind::Json => {}
            }
            schema.insert("description".to_string(), json!(parameter.description));
            if let Presence::Defaulted(default) = parameter.presence {
                schema.insert("default".to_string(), default.to_json());
            }
            properties.insert(parameter.name.to_string(), Value::Object(schema));
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": self.required_parameters(),
            "additionalProperties": true,
        })
    }

    /// Renders the operation as a protocol tool definition.
    #[must_use]
    pub fn tool_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name,
            description: self.description.to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Tool definition advertised by protocol front ends.
///
/// # Invariants
/// - `input_schema` is a JSON Schema object for the argument bag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    /// Operation name.
    pub name: OperationName,
    /// Description for clients.
    pub description: String,
    /// JSON Schema for the argument bag.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Parameters shared by create and update.
const CREATE_ISSUE_PARAMS: &[ParameterSpec] = &[
    required("projectKey", "Project key, e.g. TEST."),
    required("summary", "Issue summary."),
    required("issueType", "Issue type name, e.g. Bug or Task."),
    optional("description", "Issue description."),
    optional("priority", "Priority name, e.g. High."),
    optional("assignee", "Assignee email address or account id."),
    ParameterSpec {
        name: "customFields",
        kind: ParameterKind::Json,
        presence: Presence::Optional,
        description: "Object of additional backend field ids to values.",
    },
];

/// Parameters for `update_issue`.
const UPDATE_ISSUE_PARAMS: &[ParameterSpec] = &[
    required("issueKey", "Issue key, e.g. TEST-123."),
    optional("summary", "New summary."),
    optional("description", "New description."),
    optional("priority", "New priority name."),
    optional("assignee", "New assignee email address or account id."),
    ParameterSpec {
        name: "customFields",
        kind: ParameterKind::Json,
        presence: Presence::Optional,
        description: "Object of additional backend field ids to values.",
    },
];

/// Parameters for operations addressing a single issue.
const ISSUE_KEY_PARAMS: &[ParameterSpec] = &[required("issueKey", "Issue key, e.g. TEST-123.")];

/// Parameters for `search_issues`.
const SEARCH_PARAMS: &[ParameterSpec] = &[
    required("jql", "Query in the backend query language."),
    optional("projectKey", "Restrict results to this project."),
    ParameterSpec {
        name: "maxResults",
        kind: ParameterKind::Integer,
        presence: Presence::Defaulted(DefaultValue::Integer(30)),
        description: "Maximum number of issues to return.",
    },
];

/// Parameters for `add_comment`.
const ADD_COMMENT_PARAMS: &[ParameterSpec] = &[
    required("issueKey", "Issue key, e.g. TEST-123."),
    required("comment", "Comment body."),
];

/// Parameters for `create_issue_link`.
const LINK_PARAMS: &[ParameterSpec] = &[
    required("inwardIssue", "Issue key on the inward side of the link."),
    required("outwardIssue", "Issue key on the outward side of the link."),
    required("linkType", "Link type name, see list_link_types."),
];

/// Parameters for `get_user`.
const GET_USER_PARAMS: &[ParameterSpec] = &[required("email", "User email address.")];

/// Parameters for `attach_file`.
const ATTACH_FILE_PARAMS: &[ParameterSpec] = &[
    required("issueKey", "Issue key, e.g. TEST-123."),
    required("filePath", "Local path of the file to attach."),
];

/// Parameters for `attach_content`.
const ATTACH_CONTENT_PARAMS: &[ParameterSpec] = &[
    required("issueKey", "Issue key, e.g. TEST-123."),
    required("filename", "Attachment file name."),
    required("content", "Attachment content in the given encoding."),
    ParameterSpec {
        name: "encoding",
        kind: ParameterKind::String,
        presence: Presence::Defaulted(DefaultValue::Text("utf8")),
        description: "Content encoding: utf8 or base64.",
    },
];

/// Parameters for `get_issue_attachment`.
const GET_ATTACHMENT_PARAMS: &[ParameterSpec] = &[
    required("issueKey", "Issue key, e.g. TEST-123."),
    required("attachmentId", "Attachment id or file name."),
    optional("outputPath", "Write the bytes here instead of returning base64 content."),
];

/// Parameters for `add_comment_with_attachment`.
const COMMENT_WITH_ATTACHMENT_PARAMS: &[ParameterSpec] = &[
    required("issueKey", "Issue key, e.g. TEST-123."),
    required("comment", "Comment body."),
    required("filePath", "Local path of the file to attach."),
];

/// Static operation table in canonical order.
static OPERATIONS: [Operation; 15] = [
    Operation {
        name: OperationName::CreateIssue,
        description: "Create a new issue and return its key and id.",
        parameters: CREATE_ISSUE_PARAMS,
    },
    Operation {
        name: OperationName::GetIssue,
        description: "Fetch an issue including comments and attachments.",
        parameters: ISSUE_KEY_PARAMS,
    },
    Operation {
        name: OperationName::UpdateIssue,
        description: "Update supplied fields on an issue; omitted fields are left untouched.",
        parameters: UPDATE_ISSUE_PARAMS,
    },
    Operation {
        name: OperationName::DeleteIssue,
        description: "Delete an issue.",
        parameters: ISSUE_KEY_PARAMS,
    },
    Operation {
        name: OperationName::SearchIssues,
        description: "Search issues with a query, optionally scoped to a project.",
        parameters: SEARCH_PARAMS,
    },
    Operation {
        name: OperationName::AddComment,
        description: "Add a comment to an issue.",
        parameters: ADD_COMMENT_PARAMS,
    },
    Operation {
        name: OperationName::CreateIssueLink,
        description: "Link two issues with a named link type.",
        parameters: LINK_PARAMS,
    },
    Operation {
        name: OperationName::GetUser,
        description: "Look up a user by email address.",
        parameters: GET_USER_PARAMS,
    },
    Operation {
        name: OperationName::ListFields,
        description: "List all fields known to the tracker.",
        parameters: &[],
    },
    Operation {
        name: OperationName::ListIssueTypes,
        description: "List all issue types.",
        parameters: &[],
    },
    Operation {
        name: OperationName::ListLinkTypes,
        description: "List all issue link types.",
        parameters: &[],
    },
    Operation {
        name: OperationName::AttachFile,
        description: "Attach a local file to an issue.",
        parameters: ATTACH_FILE_PARAMS,
    },
    Operation {
        name: OperationName::AttachContent,
        description: "Attach inline content to an issue as a named file.",
        parameters: ATTACH_CONTENT_PARAMS,
    },
    Operation {
        name: OperationName::GetIssueAttachment,
        description: "Retrieve an attachment; saved to outputPath when given, otherwise \
                      returned base64-encoded.",
        parameters: GET_ATTACHMENT_PARAMS,
    },
    Operation {
        name: OperationName::AddCommentWithAttachment,
        description: "Add a comment and attach a local file to an issue.",
        parameters: COMMENT_WITH_ATTACHMENT_PARAMS,
    },
];

// ============================================================================
// SECTION: Lookup
// ============================================================================

/// Registry lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No operation is registered under the name.
    #[error("unknown operation: {0}")]
    NotFound(String),
}

/// Returns all registered operations in canonical order.
#[must_use]
pub fn operations() -> &'static [Operation] {
    &OPERATIONS
}

/// Looks up an operation by its canonical name.
///
/// # Errors
///
/// Returns [`RegistryError::NotFound`] when the name is not registered.
pub fn lookup(name: &str) -> Result<&'static Operation, RegistryError> {
    OperationName::parse(name)
        .and_then(|parsed| OPERATIONS.iter().find(|operation| operation.name == parsed))
        .ok_or_else(|| RegistryError::NotFound(name.to_string()))
}

/// Returns protocol tool definitions for every registered operation.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    OPERATIONS.iter().map(Operation::tool_definition).collect()
}
