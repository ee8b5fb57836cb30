//! 传输层：HTTP 请求/响应抽象与可替换的发送实现。
//!
//! Transport layer.
//!
//! The client core turns typed requests into an [`HttpRequest`] and hands it to
//! a [`Transport`] (blocking) or [`AsyncTransport`] (async). Request bodies are
//! fully in memory, so a retry re-sends exactly the same bytes. Production code
//! uses the reqwest-backed [`HttpTransport`] / [`BlockingHttpTransport`]; tests
//! plug in their own implementations through the same traits.

pub mod http;

pub use http::{BlockingHttpTransport, HttpTransport};

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request could not be assembled locally; sending it again cannot help.
    #[error("invalid request: {0}")]
    Request(String),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Classify a reqwest failure.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_builder() {
            TransportError::Request(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Http(err)
        }
    }
}

/// In-memory file attached to a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub filename: String,
    pub mime_type: String,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
    Multipart {
        fields: Vec<(String, String)>,
        file: FilePart,
    },
}

impl RequestBody {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            RequestBody::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Value of a form or multipart text field.
    pub fn field(&self, name: &str) -> Option<&str> {
        let fields = match self {
            RequestBody::Form(fields) | RequestBody::Multipart { fields, .. } => fields,
            RequestBody::Json(_) => return None,
        };
        fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A fully prepared POST call.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn query(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Blocking request executor.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Async request executor.
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

#[async_trait]
impl<T: AsyncTransport + ?Sized> AsyncTransport for Arc<T> {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}
