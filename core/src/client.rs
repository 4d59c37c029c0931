//! Per-user client for the Todoist API.
//!
//! # Design
//! `TodoistClient` holds the user's token, the endpoint and a shared
//! `Transport`; it carries no mutable state between calls. Every operation
//! assembles its `Params`, goes through `request`, and returns the decoded
//! JSON untouched. `request` is itself split into `build_request` and
//! `parse_response` so each half can be checked without I/O.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, AuthError, Result};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::params::Params;
use crate::protocol::{classify, Reply, WRITE_SENTINELS};
use crate::types::{ItemFields, Offset};

pub const DEFAULT_BASE_URL: &str = "https://todoist.com/API/";

/// Ensure the endpoint ends with exactly one `/` so method names append cleanly.
pub(crate) fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

/// `<base><method>?<query>` as a GET request.
pub(crate) fn build_get(base_url: &str, method: &str, params: &Params) -> HttpRequest {
    let mut url = format!("{base_url}{method}");
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.encode());
    }
    HttpRequest {
        method: method.to_string(),
        url,
        headers: vec![("accept".to_string(), "application/json".to_string())],
    }
}

pub(crate) fn decode(method: &str, body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        method: method.to_string(),
        source,
    })
}

/// Authenticated client bound to a single API token.
#[derive(Clone)]
pub struct TodoistClient {
    token: String,
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for TodoistClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoistClient")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl TodoistClient {
    /// Fails with `AuthError::MissingToken` when `token` is empty or blank.
    pub fn new(token: &str, transport: Arc<dyn Transport>) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingToken.into());
        }
        Ok(Self {
            token: token.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            transport,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the GET request for `method`, with the token appended to `params`.
    pub fn build_request(&self, method: &str, params: Params) -> HttpRequest {
        let params = params.with("token", &self.token);
        build_get(&self.base_url, method, &params)
    }

    /// Decode a response to `method`. Non-2xx statuses are transport errors.
    pub fn parse_response(&self, method: &str, response: HttpResponse) -> Result<Value> {
        if !response.is_success() {
            return Err(ApiError::Transport {
                method: method.to_string(),
                reason: format!("HTTP {}: {}", response.status, response.body),
            });
        }
        decode(method, &response.body)
    }

    /// Perform one call and return the decoded payload verbatim.
    pub fn request(&self, method: &str, params: Params) -> Result<Value> {
        let request = self.build_request(method, params);
        debug!(method, "dispatching Todoist API request");
        let response = self
            .transport
            .execute(&request)
            .map_err(|e| ApiError::Transport {
                method: method.to_string(),
                reason: e.0,
            })?;
        self.parse_response(method, response)
    }

    /// Like `request`, but known write sentinels become `ApiError::Service`.
    fn write(&self, method: &str, params: Params) -> Result<Value> {
        match classify(self.request(method, params)?, WRITE_SENTINELS) {
            Reply::Data(value) => Ok(value),
            Reply::Rejected(kind) => Err(ApiError::Service(kind)),
            Reply::Unrecognized(s) => Ok(Value::String(s)),
        }
    }

    pub fn get_labels(&self) -> Result<Value> {
        self.request("getLabels", Params::new())
    }

    pub fn get_projects(&self) -> Result<Value> {
        self.request("getProjects", Params::new())
    }

    pub fn get_project(&self, project_id: u64) -> Result<Value> {
        self.request("getProject", Params::new().with("project_id", project_id))
    }

    pub fn get_uncompleted_items(&self, project_id: u64) -> Result<Value> {
        self.request(
            "getUncompletedItems",
            Params::new().with("project_id", project_id),
        )
    }

    /// `offset` is sent only when it is a non-negative whole number; any other
    /// value is dropped rather than rejected.
    pub fn get_completed_items(&self, project_id: u64, offset: Option<Offset>) -> Result<Value> {
        let mut params = Params::new().with("project_id", project_id);
        params.push_opt("offset", offset.as_ref().and_then(Offset::normalized));
        self.request("getCompletedItems", params)
    }

    pub fn get_items_by_id(&self, ids: &[u64]) -> Result<Value> {
        self.request("getItemsById", Params::new().with_list("ids", ids))
    }

    /// Free-text search, e.g. `["today", "p1"]`.
    pub fn query<S: AsRef<str>>(&self, queries: &[S]) -> Result<Value> {
        let queries: Vec<&str> = queries.iter().map(AsRef::as_ref).collect();
        self.request("query", Params::new().with_list("queries", &queries))
    }

    pub fn add_item(&self, project_id: u64, item: &ItemFields) -> Result<Value> {
        self.write(
            "addItem",
            Params::new().with("project_id", project_id).with_item(item),
        )
    }

    /// `item` may be a bare string, which updates the content only.
    pub fn update_item(&self, id: u64, item: impl Into<ItemFields>) -> Result<Value> {
        let item = item.into();
        self.write("updateItem", Params::new().with("id", id).with_item(&item))
    }

    pub fn complete_items(&self, ids: &[u64]) -> Result<Value> {
        self.write("completeItems", Params::new().with_list("ids", ids))
    }

    pub fn delete_items(&self, project_id: u64, ids: &[u64]) -> Result<Value> {
        self.write(
            "deleteItems",
            Params::new()
                .with("project_id", project_id)
                .with_list("ids", ids),
        )
    }
}
