//! Stateless HTTP request builder and response parser for the tutorials API.
//!
//! # Design
//! `TutorialClient` holds a `base_url` and the notification sink, and carries
//! no mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. The caller executes the actual HTTP round-trip.
//!
//! Every error a parse method returns has already been logged and sent to
//! the sink, so callers only reset their own flags.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::form_urlencoded;

use crate::config::ClientConfig;
use crate::error::{ApiError, Operation};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, TransportError};
use crate::notify::{Notice, NotificationSink, TracingSink};
use crate::types::{Tutorial, TutorialDraft};

/// Synchronous, stateless client for the tutorials API.
#[derive(Clone)]
pub struct TutorialClient {
    base_url: String,
    sink: Arc<dyn NotificationSink>,
}

impl fmt::Debug for TutorialClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TutorialClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl TutorialClient {
    /// Client reporting through [`TracingSink`].
    pub fn new(base_url: &str) -> Self {
        Self::with_sink(base_url, Arc::new(TracingSink))
    }

    pub fn with_sink(base_url: &str, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            sink,
        }
    }

    pub fn from_config(config: &ClientConfig, sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_sink(&config.base_url, sink)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forward a notice to the injected sink.
    pub fn notify(&self, notice: Notice) {
        self.sink.notify(notice);
    }

    // -----------------------------------------------------------------------
    // Build
    // -----------------------------------------------------------------------

    /// `GET /tutorials/`, with `?title=` when `title` is non-empty.
    pub fn build_list_tutorials(&self, title: Option<&str>) -> HttpRequest {
        let mut path = self.collection_url();
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            let encoded: String = form_urlencoded::byte_serialize(title.as_bytes()).collect();
            path.push_str("?title=");
            path.push_str(&encoded);
        }
        request(HttpMethod::Get, path, None)
    }

    pub fn build_list_published(&self) -> HttpRequest {
        request(
            HttpMethod::Get,
            format!("{}/tutorials/published/", self.base_url),
            None,
        )
    }

    pub fn build_get_tutorial(&self, id: i64) -> HttpRequest {
        request(HttpMethod::Get, self.item_url(id), None)
    }

    pub fn build_create_tutorial(&self, draft: &TutorialDraft) -> Result<HttpRequest, ApiError> {
        let body = self.encode(Operation::CreateTutorial, draft)?;
        Ok(request(HttpMethod::Post, self.collection_url(), Some(body)))
    }

    /// Full replacement; every field of `draft` is sent.
    pub fn build_update_tutorial(
        &self,
        id: i64,
        draft: &TutorialDraft,
    ) -> Result<HttpRequest, ApiError> {
        let body = self.encode(Operation::UpdateTutorial, draft)?;
        Ok(request(HttpMethod::Put, self.item_url(id), Some(body)))
    }

    /// An update of `tutorial` with `published` flipped. Parse the response
    /// with [`TutorialClient::parse_update_tutorial`].
    pub fn build_toggle_published(&self, tutorial: &Tutorial) -> Result<HttpRequest, ApiError> {
        self.build_update_tutorial(tutorial.id, &tutorial.toggled_draft())
    }

    pub fn build_delete_tutorial(&self, id: i64) -> HttpRequest {
        request(HttpMethod::Delete, self.item_url(id), None)
    }

    pub fn build_delete_all_tutorials(&self) -> HttpRequest {
        request(HttpMethod::Delete, self.collection_url(), None)
    }

    // -----------------------------------------------------------------------
    // Parse
    // -----------------------------------------------------------------------

    pub fn parse_list_tutorials(&self, response: HttpResponse) -> Result<Vec<Tutorial>, ApiError> {
        self.decode(Operation::ListTutorials, response)
    }

    pub fn parse_list_published(&self, response: HttpResponse) -> Result<Vec<Tutorial>, ApiError> {
        self.decode(Operation::ListPublished, response)
    }

    /// Any non-2xx status becomes [`ApiError::NotFound`].
    pub fn parse_get_tutorial(&self, id: i64, response: HttpResponse) -> Result<Tutorial, ApiError> {
        if !response.is_success() {
            return Err(self.fail(ApiError::NotFound {
                id,
                status: response.status,
            }));
        }
        self.decode(Operation::GetTutorial, response)
    }

    pub fn parse_create_tutorial(&self, response: HttpResponse) -> Result<Tutorial, ApiError> {
        self.decode(Operation::CreateTutorial, response)
    }

    pub fn parse_update_tutorial(&self, response: HttpResponse) -> Result<Tutorial, ApiError> {
        self.decode(Operation::UpdateTutorial, response)
    }

    pub fn parse_delete_tutorial(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.check_status(Operation::DeleteTutorial, &response)
    }

    pub fn parse_delete_all_tutorials(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.check_status(Operation::DeleteAllTutorials, &response)
    }

    /// Unwrap the host's round-trip result. A transport failure is reported
    /// as `RequestFailed` without a status.
    pub fn receive(
        &self,
        operation: Operation,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<HttpResponse, ApiError> {
        result.map_err(|e| {
            self.fail(ApiError::RequestFailed {
                operation,
                status: None,
                message: e.to_string(),
            })
        })
    }

    /// Log `err`, send it to the sink, and hand it back for propagation.
    pub fn fail(&self, err: ApiError) -> ApiError {
        tracing::error!(
            operation = %err.operation(),
            status = ?err.status(),
            "{err}"
        );
        self.sink.notify(Notice::error(err.to_string()));
        err
    }

    fn collection_url(&self) -> String {
        format!("{}/tutorials/", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/tutorials/{id}/", self.base_url)
    }

    fn encode<T: Serialize>(&self, operation: Operation, value: &T) -> Result<String, ApiError> {
        serde_json::to_string(value).map_err(|e| {
            self.fail(ApiError::Encode {
                operation,
                message: e.to_string(),
            })
        })
    }

    fn decode<T: DeserializeOwned>(
        &self,
        operation: Operation,
        response: HttpResponse,
    ) -> Result<T, ApiError> {
        self.check_status(operation, &response)?;
        serde_json::from_str(&response.body).map_err(|e| {
            self.fail(ApiError::Decode {
                operation,
                message: e.to_string(),
            })
        })
    }

    fn check_status(&self, operation: Operation, response: &HttpResponse) -> Result<(), ApiError> {
        if response.is_success() {
            return Ok(());
        }
        Err(self.fail(ApiError::RequestFailed {
            operation,
            status: Some(response.status),
            message: error_message(&response.body),
        }))
    }
}

fn request(method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
    tracing::debug!(%method, %path, "built request");
    let headers = if body.is_some() {
        vec![("content-type".to_string(), "application/json".to_string())]
    } else {
        Vec::new()
    };
    HttpRequest {
        method,
        path,
        headers,
        body,
    }
}

/// The backend's `{"message": ...}` when present, otherwise the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
