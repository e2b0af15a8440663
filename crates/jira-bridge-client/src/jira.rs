// crates/jira-bridge-client/src/jira.rs
// ============================================================================
// Module: Jira REST Client
// Description: IssueTracker implementation over Jira REST v2.
// Purpose: Translate tracker capabilities into authenticated HTTP calls.
// Dependencies: async-trait, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! [`JiraClient`] talks to a Jira instance with basic authentication (account
//! email plus API token). The underlying `reqwest::Client` pools connections
//! and is safe to share across concurrent calls.
//!
//! ## Invariants
//! - Redirects are never followed.
//! - Response bodies larger than [`MAX_RESPONSE_BYTES`] are rejected.
//! - Credentials are only sent to the configured origin.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Method;
use reqwest::RequestBuilder;
use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use url::Url;

use crate::error::BackendError;
use crate::tracker::IssueTracker;
use crate::types::RemoteAttachment;
use crate::types::RemoteComment;
use crate::types::RemoteCreated;
use crate::types::RemoteField;
use crate::types::RemoteIssue;
use crate::types::RemoteIssueType;
use crate::types::RemoteLinkType;
use crate::types::RemoteLinkTypeList;
use crate::types::RemoteSearchPage;
use crate::types::RemoteUser;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum backend response body accepted, attachments included.
pub const MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// REST API path prefix segments.
const API_SEGMENTS: [&str; 3] = ["rest", "api", "2"];

/// Cloud search endpoint.
const SEARCH_JQL_SEGMENTS: [&str; 2] = ["search", "jql"];

/// Server and Data Center search endpoint, used when the cloud one is absent.
const LEGACY_SEARCH_SEGMENTS: [&str; 1] = ["search"];

/// Fields requested for search results.
const SEARCH_FIELDS: &str = "summary,status,priority,assignee,issuetype";

/// Header required by Jira to accept multipart uploads.
const ATLASSIAN_TOKEN_HEADER: &str = "X-Atlassian-Token";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Connection settings for [`JiraClient`].
#[derive(Clone)]
pub struct JiraClientConfig {
    /// Base URL of the Jira instance, including scheme.
    pub base_url: String,
    /// Account email used for basic authentication.
    pub email: String,
    /// API token used for basic authentication.
    pub api_token: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl fmt::Debug for JiraClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraClientConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Jira REST v2 client.
pub struct JiraClient {
    /// Pooled HTTP client.
    client: Client,
    /// Base URL of the instance.
    base_url: Url,
    /// Basic-auth user.
    email: String,
    /// Basic-auth secret.
    api_token: String,
}

impl fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraClient").field("base_url", &self.base_url.as_str()).finish_non_exhaustive()
    }
}

impl JiraClient {
    /// Builds a client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the base URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(config: JiraClientConfig) -> Result<Self, BackendError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| BackendError::other(format!("invalid jira base url: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::other("invalid jira base url: not a base url"));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|err| BackendError::other(err.to_string()))?;
        Ok(Self {
            client,
            base_url,
            email: config.email,
            api_token: config.api_token,
        })
    }

    /// Returns the configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an API URL from path segments, escaping each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::other("invalid jira base url: not a base url"))?
            .pop_if_empty()
            .extend(API_SEGMENTS)
            .extend(segments);
        Ok(url)
    }

    /// Starts an authenticated request.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url).basic_auth(&self.email, Some(&self.api_token))
    }

    /// Sends a request and returns the body of a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure, oversize bodies, or a
    /// non-success status.
    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, BackendError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = read_response_body_with_limit(response, MAX_RESPONSE_BYTES).await?;
        if !status.is_success() {
            return Err(BackendError::from_response(status.as_u16(), &body));
        }
        Ok(body)
    }

    /// Sends a GET and decodes the JSON response.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, BackendError> {
        let request = self.request(Method::GET, url).header(ACCEPT, "application/json");
        let body = self.execute(request).await?;
        decode(&body)
    }

    /// Runs one search request against the given endpoint.
    async fn search_page(
        &self,
        segments: &[&str],
        jql: &str,
        max_results: u32,
    ) -> Result<RemoteSearchPage, BackendError> {
        let mut url = self.endpoint(segments)?;
        url.query_pairs_mut()
            .append_pair("jql", jql)
            .append_pair("maxResults", &max_results.to_string())
            .append_pair("fields", SEARCH_FIELDS);
        self.get_json(url).await
    }

    /// Sends a JSON body and returns the raw response body.
    async fn send_json(&self, method: Method, url: Url, payload: &Value) -> Result<Vec<u8>, BackendError> {
        let request = self.request(method, url).header(ACCEPT, "application/json").json(payload);
        self.execute(request).await
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn create_issue(&self, fields: Map<String, Value>) -> Result<RemoteCreated, BackendError> {
        let url = self.endpoint(&["issue"])?;
        let body = self.send_json(Method::POST, url, &json!({"fields": fields})).await?;
        decode(&body)
    }

    async fn get_issue(&self, key: &str) -> Result<RemoteIssue, BackendError> {
        let url = self.endpoint(&["issue", key])?;
        self.get_json(url).await
    }

    async fn update_issue(&self, key: &str, fields: Map<String, Value>) -> Result<(), BackendError> {
        let url = self.endpoint(&["issue", key])?;
        self.send_json(Method::PUT, url, &json!({"fields": fields})).await?;
        Ok(())
    }

    async fn delete_issue(&self, key: &str) -> Result<(), BackendError> {
        let url = self.endpoint(&["issue", key])?;
        self.execute(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn search_issues(&self, jql: &str, max_results: u32) -> Result<Vec<RemoteIssue>, BackendError> {
        let page = match self.search_page(&SEARCH_JQL_SEGMENTS, jql, max_results).await {
            Err(err) if err.status == Some(404) => {
                self.search_page(&LEGACY_SEARCH_SEGMENTS, jql, max_results).await?
            }
            result => result?,
        };
        Ok(page.issues)
    }

    async fn add_comment(&self, key: &str, body: &str) -> Result<RemoteComment, BackendError> {
        let url = self.endpoint(&["issue", key, "comment"])?;
        let response = self.send_json(Method::POST, url, &json!({"body": body})).await?;
        decode(&response)
    }

    async fn upload_attachment(
        &self,
        key: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<Vec<RemoteAttachment>, BackendError> {
        let url = self.endpoint(&["issue", key, "attachments"])?;
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);
        let request = self
            .request(Method::POST, url)
            .header(ACCEPT, "application/json")
            .header(ATLASSIAN_TOKEN_HEADER, "no-check")
            .multipart(form);
        let body = self.execute(request).await?;
        decode(&body)
    }

    async fn download_attachment(&self, attachment: &RemoteAttachment) -> Result<Vec<u8>, BackendError> {
        let url = match attachment.content.as_deref() {
            Some(content) => {
                let url = Url::parse(content)
                    .map_err(|err| BackendError::other(format!("invalid attachment url: {err}")))?;
                if url.origin() != self.base_url.origin() {
                    return Err(BackendError::other(format!(
                        "attachment {} is served from a foreign origin",
                        attachment.id
                    )));
                }
                url
            }
            None => self.endpoint(&["attachment", "content", attachment.id.as_str()])?,
        };
        self.execute(self.request(Method::GET, url)).await
    }

    async fn create_link(&self, link_type: &str, inward: &str, outward: &str) -> Result<(), BackendError> {
        let url = self.endpoint(&["issueLink"])?;
        let payload = json!({
            "type": {"name": link_type},
            "inwardIssue": {"key": inward},
            "outwardIssue": {"key": outward},
        });
        self.send_json(Method::POST, url, &payload).await?;
        Ok(())
    }

    async fn list_fields(&self) -> Result<Vec<RemoteField>, BackendError> {
        let url = self.endpoint(&["field"])?;
        self.get_json(url).await
    }

    async fn list_issue_types(&self) -> Result<Vec<RemoteIssueType>, BackendError> {
        let url = self.endpoint(&["issuetype"])?;
        self.get_json(url).await
    }

    async fn list_link_types(&self) -> Result<Vec<RemoteLinkType>, BackendError> {
        let url = self.endpoint(&["issueLinkType"])?;
        let list: RemoteLinkTypeList = self.get_json(url).await?;
        Ok(list.issue_link_types)
    }

    async fn search_users(&self, query: &str) -> Result<Vec<RemoteUser>, BackendError> {
        let mut url = self.endpoint(&["user", "search"])?;
        url.query_pairs_mut().append_pair("query", query);
        self.get_json(url).await
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Decodes a JSON response body.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, BackendError> {
    serde_json::from_slice(body).map_err(|err| BackendError::other(format!("invalid backend response: {err}")))
}

/// Maps a transport failure to a backend error.
fn transport_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::other("backend request timed out");
    }
    BackendError::other(format!("backend transport error: {err}"))
}

/// Reads a response body while enforcing a hard byte limit.
async fn read_response_body_with_limit(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, BackendError> {
    let mut body = Vec::new();
    let mut total: usize = 0;
    while let Some(chunk) = response.chunk().await.map_err(transport_error)? {
        let next_total = total.checked_add(chunk.len()).unwrap_or(usize::MAX);
        if next_total > limit {
            return Err(BackendError::other(format!(
                "backend response exceeds size limit ({next_total} > {limit})"
            )));
        }
        body.extend_from_slice(&chunk);
        total = next_total;
    }
    Ok(body)
}
