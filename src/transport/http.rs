use super::{AsyncTransport, HttpRequest, HttpResponse, RequestBody, Transport, TransportError};
use async_trait::async_trait;
use std::time::Duration;

const POOL_MAX_IDLE_PER_HOST: usize = 32;
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Async transport over a shared reqwest connection pool.
///
/// Cloning is cheap and clones share the pool; the pool is released when the
/// last clone is dropped.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(Some(POOL_IDLE_TIMEOUT))
            // Conservative HTTP/2 keepalive defaults for long-lived connections.
            .http2_adaptive_window(true)
            .http2_keep_alive_interval(Some(Duration::from_secs(30)))
            .http2_keep_alive_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Use a preconfigured reqwest client (proxies, custom TLS roots).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn build(&self, request: &HttpRequest) -> Result<reqwest::RequestBuilder, TransportError> {
        let mut req = self.client.post(request.url.clone());
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        let req = match &request.body {
            RequestBody::Json(value) => req.json(value),
            RequestBody::Form(fields) => req.form(fields),
            RequestBody::Multipart { fields, file } => {
                let part = reqwest::multipart::Part::bytes(file.data.to_vec())
                    .file_name(file.filename.clone())
                    .mime_str(&file.mime_type)
                    .map_err(TransportError::from_reqwest)?;
                let mut form = reqwest::multipart::Form::new();
                for (name, value) in fields {
                    form = form.text(name.clone(), value.clone());
                }
                req.multipart(form.part(file.field.clone(), part))
            }
        };
        Ok(req)
    }
}

#[async_trait]
impl AsyncTransport for HttpTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self
            .build(request)?
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(TransportError::from_reqwest)?;
        Ok(HttpResponse { status, body })
    }
}

/// Blocking transport over `reqwest::blocking`.
///
/// Must not be created or dropped from inside an async runtime; use
/// [`HttpTransport`] there.
#[derive(Debug, Clone)]
pub struct BlockingHttpTransport {
    client: reqwest::blocking::Client,
}

impl BlockingHttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(Some(POOL_IDLE_TIMEOUT))
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    fn build(
        &self,
        request: &HttpRequest,
    ) -> Result<reqwest::blocking::RequestBuilder, TransportError> {
        let mut req = self.client.post(request.url.clone());
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        let req = match &request.body {
            RequestBody::Json(value) => req.json(value),
            RequestBody::Form(fields) => req.form(fields),
            RequestBody::Multipart { fields, file } => {
                let part = reqwest::blocking::multipart::Part::bytes(file.data.to_vec())
                    .file_name(file.filename.clone())
                    .mime_str(&file.mime_type)
                    .map_err(TransportError::from_reqwest)?;
                let mut form = reqwest::blocking::multipart::Form::new();
                for (name, value) in fields {
                    form = form.text(name.clone(), value.clone());
                }
                req.multipart(form.part(file.field.clone(), part))
            }
        };
        Ok(req)
    }
}

impl Transport for BlockingHttpTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self
            .build(request)?
            .send()
            .map_err(TransportError::from_reqwest)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(TransportError::from_reqwest)?;
        Ok(HttpResponse { status, body })
    }
}
