use crate::error_code::ServiceStatusCode;
use crate::transport::TransportError;
use std::time::Duration;
use thiserror::Error;

/// Structured error context for validation and configuration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path that caused the error (e.g., "voice_setting.speed", "voice_id")
    pub field_path: Option<String>,
    /// Accepted range or value set (e.g., "[0.5, 2.0]")
    pub details: Option<String>,
    /// Source of the error (e.g., "voice_setting", "client_config")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Coarse classification of [`Error`], convenient for `match`-free inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Api,
    Timeout,
    Transport,
    Configuration,
    Io,
    Decode,
    Runtime,
}

/// Unified error type for the MiniMax speech client.
///
/// The first four variants form the caller-facing taxonomy:
/// local input rejected, service rejected the call, call timed out,
/// service unreachable. The rest are ambient failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("API error {status_code}: {message}{}", format_attempts(*.attempts))]
    Api {
        /// Service status code from `base_resp`, or the HTTP status when the
        /// envelope was never reached.
        status_code: i64,
        message: String,
        http_status: Option<u16>,
        attempts: u32,
    },

    #[error("Request timed out after {timeout:?}{}", format_attempts(*.attempts))]
    Timeout { attempts: u32, timeout: Duration },

    #[error("Network transport error: {message}{}", format_attempts(*.attempts))]
    Transport { message: String, attempts: u32 },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid response body: {message}")]
    Decode { message: String },

    #[error("Runtime error: {message}")]
    Runtime { message: String },
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("accepted: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn format_attempts(attempts: u32) -> String {
    if attempts > 1 {
        format!(" (after {} attempts)", attempts)
    } else {
        String::new()
    }
}

impl Error {
    /// Validation failure for `field`, listing what the field accepts.
    pub fn validation(
        field: impl Into<String>,
        message: impl Into<String>,
        accepted: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let source = field.split('.').next().unwrap_or_default().to_string();
        Error::Validation {
            message: message.into(),
            context: ErrorContext::new()
                .with_field_path(field)
                .with_details(accepted)
                .with_source(source),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn runtime(msg: impl Into<String>) -> Self {
        Error::Runtime {
            message: msg.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Error::Decode {
            message: msg.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Api { .. } => ErrorKind::Api,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Transport { .. } => ErrorKind::Transport,
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::Io(_) => ErrorKind::Io,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Runtime { .. } => ErrorKind::Runtime,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Validation { context, .. } | Error::Configuration { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    /// Offending field of a validation error.
    pub fn field(&self) -> Option<&str> {
        self.context().and_then(|c| c.field_path.as_deref())
    }

    /// Number of network attempts made before this error surfaced (0 for local errors).
    pub fn attempts(&self) -> u32 {
        match self {
            Error::Api { attempts, .. }
            | Error::Timeout { attempts, .. }
            | Error::Transport { attempts, .. } => *attempts,
            _ => 0,
        }
    }

    /// True when a retryable failure (timeout, transport, HTTP 5xx) surfaced
    /// because the retry budget ran out. Rejections that end the call early are
    /// never exhausted, whatever attempt they arrived on.
    pub fn is_exhausted(&self) -> bool {
        match self {
            Error::Timeout { .. } | Error::Transport { .. } => true,
            Error::Api {
                http_status: Some(status),
                ..
            } => *status >= 500,
            _ => false,
        }
    }

    /// Vendor status code of a business-logic rejection.
    pub fn service_code(&self) -> Option<ServiceStatusCode> {
        match self {
            Error::Api {
                status_code,
                http_status: None,
                ..
            } => Some(ServiceStatusCode::from_code(*status_code)),
            _ => None,
        }
    }

    /// Build the surfaced error for a retryable failure once the attempt budget is spent.
    pub(crate) fn from_transport(err: TransportError, attempts: u32, timeout: Duration) -> Self {
        match err {
            TransportError::Timeout => Error::Timeout { attempts, timeout },
            other => Error::Transport {
                message: other.to_string(),
                attempts,
            },
        }
    }
}
