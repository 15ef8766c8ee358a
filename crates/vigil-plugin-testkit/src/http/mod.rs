//! Canned-response HTTP client for plugin unit tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use vigil_plugin_api::context::{HttpClient, HttpResponse, RequestInit};
use vigil_plugin_api::error::PluginError;

/// Status returned for URLs with no registered mock.
pub const DEFAULT_UNMATCHED_STATUS: u16 = 404;

/// One canned response in the mock client's route table.
///
/// A JSON body, when present, is serialized into the response with a
/// `content-type: application/json` header; extra headers are merged over
/// that default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    status: u16,
    body: Option<Value>,
    headers: BTreeMap<String, String>,
}

impl MockResponse {
    /// Creates a canned response with an empty body.
    #[must_use]
    pub const fn new(status: u16) -> Self {
        Self {
            status,
            body: None,
            headers: BTreeMap::new(),
        }
    }

    /// Creates a 200 response carrying a JSON body.
    #[must_use]
    pub fn ok(body: Value) -> Self {
        Self::new(200).with_body(body)
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a response header merged over the JSON content-type default.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }
}

/// One recorded `fetch` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    url: String,
    init: Option<RequestInit>,
}

impl RecordedCall {
    /// Returns the requested URL.
    #[must_use]
    pub const fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns the request options, if the caller supplied any.
    #[must_use]
    pub const fn init(&self) -> Option<&RequestInit> {
        self.init.as_ref()
    }
}

/// An [`HttpClient`] resolving every request from an in-memory route table.
///
/// Lookup is by exact URL string match only; there is no path or query
/// pattern matching. Every call, matched or not, is recorded in
/// invocation order. The mock never fails: unmatched URLs resolve with a
/// configurable default status.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use vigil_plugin_api::context::HttpClient;
/// use vigil_plugin_testkit::{MockHttpClient, MockResponse};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let http = MockHttpClient::new()
///     .with_route("https://api.example.com/usage", MockResponse::ok(json!({"x": 1})));
/// let hit = http.fetch("https://api.example.com/usage", None).await.unwrap();
/// assert_eq!(hit.status(), 200);
/// let miss = http.fetch("https://api.example.com/other", None).await.unwrap();
/// assert_eq!(miss.status(), 404);
/// assert_eq!(http.calls().len(), 2);
/// # });
/// ```
#[derive(Debug)]
pub struct MockHttpClient {
    routes: BTreeMap<String, MockResponse>,
    default_status: u16,
    calls: Mutex<Vec<RecordedCall>>,
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHttpClient {
    /// Creates a client with no routes and a 404 default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: BTreeMap::new(),
            default_status: DEFAULT_UNMATCHED_STATUS,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Registers a canned response for an exact URL.
    #[must_use]
    pub fn with_route(mut self, url: impl Into<String>, response: MockResponse) -> Self {
        self.routes.insert(url.into(), response);
        self
    }

    /// Registers a whole route table at once.
    #[must_use]
    pub fn with_routes(mut self, routes: BTreeMap<String, MockResponse>) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Overrides the status returned for unmatched URLs.
    #[must_use]
    pub const fn with_default_status(mut self, status: u16) -> Self {
        self.default_status = status;
        self
    }

    /// Returns a snapshot of every recorded call, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Discards the call record.
    pub fn clear_calls(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn respond(&self, url: &str) -> HttpResponse {
        let Some(mock) = self.routes.get(url) else {
            tracing::debug!(url, status = self.default_status, "no mock registered for url");
            return HttpResponse::new(self.default_status);
        };
        let mut response = HttpResponse::new(mock.status);
        if let Some(body) = &mock.body {
            response = response
                .with_header("content-type", "application/json")
                .with_body(body.to_string());
        }
        for (name, value) in &mock.headers {
            response = response.with_header(name.clone(), value.clone());
        }
        response
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn fetch(
        &self,
        url: &str,
        init: Option<RequestInit>,
    ) -> Result<HttpResponse, PluginError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                url: url.to_owned(),
                init,
            });
        Ok(self.respond(url))
    }
}
