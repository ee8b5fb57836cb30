//! 客户端配置：凭据、服务地址、超时与重试策略。
//!
//! Client configuration.
//!
//! [`ClientConfig`] is an explicit value; the library never reads the
//! environment on its own. [`ClientConfigBuilder::from_env`] is the one place
//! that seeds credentials from `MINIMAX_API_KEY` / `MINIMAX_GROUP_ID`.

use crate::client::policy::RetryPolicy;
use crate::{Error, ErrorContext, Result};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.minimax.io/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_KEY_ENV: &str = "MINIMAX_API_KEY";
pub const GROUP_ID_ENV: &str = "MINIMAX_GROUP_ID";

/// Remote operations and their paths relative to the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    TextToAudio,
    VoiceList,
    FileUpload,
    VoiceClone,
    VoiceDelete,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::TextToAudio => "t2a_v2",
            Self::VoiceList => "get_voice",
            Self::FileUpload => "files/upload",
            Self::VoiceClone => "voice_clone",
            Self::VoiceDelete => "delete_voice",
        }
    }

    /// The voice listing endpoint is the only one addressed without `GroupId`.
    pub fn needs_group_id(&self) -> bool {
        !matches!(self, Self::VoiceList)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    group_id: String,
    base_url: Url,
    timeout: Duration,
    retry: RetryPolicy,
}

// Keep the credential out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("group_id", &self.group_id)
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Shorthand for a config with default base URL, timeout and retry policy.
    pub fn new(api_key: impl Into<String>, group_id: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).group_id(group_id).build()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Full URL of `endpoint`, with the `GroupId` query where the service expects it.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url> {
        let mut url = self.base_url.join(endpoint.path()).map_err(|e| {
            Error::configuration(format!("cannot build URL for {}: {}", endpoint, e))
        })?;
        if endpoint.needs_group_id() {
            url.query_pairs_mut().append_pair("GroupId", &self.group_id);
        }
        Ok(url)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    api_key: Option<String>,
    group_id: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    retry: Option<RetryPolicy>,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed credentials from `MINIMAX_API_KEY` / `MINIMAX_GROUP_ID`.
    ///
    /// Later builder calls override the seeded values.
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            api_key: non_empty(API_KEY_ENV),
            group_id: non_empty(GROUP_ID_ENV),
            ..Self::default()
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Override the service base URL (mock servers, regional hosts).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Convenience for `retry_policy(RetryPolicy::default().with_max_retries(n))`.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        let retry = self.retry.take().unwrap_or_default();
        self.retry = Some(retry.with_max_retries(max_retries));
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let api_key = required(self.api_key, "api_key", API_KEY_ENV)?;
        if reqwest::header::HeaderValue::from_str(&format!("Bearer {}", api_key)).is_err() {
            return Err(Error::configuration_with_context(
                "api_key is not a valid HTTP header value",
                ErrorContext::new()
                    .with_field_path("api_key")
                    .with_details("visible ASCII without control characters")
                    .with_source("client_config"),
            ));
        }
        let group_id = required(self.group_id, "group_id", GROUP_ID_ENV)?;

        let raw_base = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        // `Url::join` replaces the last segment unless the base ends with '/'.
        let normalized = format!("{}/", raw_base.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid base URL '{}': {}", raw_base, e),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_source("client_config"),
            )
        })?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(Error::configuration_with_context(
                "timeout must be greater than zero",
                ErrorContext::new()
                    .with_field_path("timeout")
                    .with_source("client_config"),
            ));
        }

        Ok(ClientConfig {
            api_key,
            group_id,
            base_url,
            timeout,
            retry: self.retry.unwrap_or_default(),
        })
    }
}

fn required(value: Option<String>, field: &str, env: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::configuration_with_context(
            format!("{} is required", field),
            ErrorContext::new()
                .with_field_path(field)
                .with_details(format!("pass it to the builder or set {}", env))
                .with_source("client_config"),
        )),
    }
}
