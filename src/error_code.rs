//! 服务状态码：MiniMax `base_resp.status_code` 的分类与描述。
//!
//! MiniMax service status codes.
//!
//! Every MiniMax response carries a `base_resp` envelope. A `status_code` of `0`
//! means success; any other value is a business-logic rejection. This module
//! gives the documented codes a name and a category so callers can react
//! without hard-coding numbers.
//!
//! | Code | Variant                 | Category       |
//! |------|-------------------------|----------------|
//! | 1000 | `Unknown`               | server         |
//! | 1001 | `Timeout`               | server         |
//! | 1002 | `RateLimited`           | rate           |
//! | 1004 | `AuthenticationFailed`  | authentication |
//! | 1008 | `InsufficientBalance`   | rate           |
//! | 1039 | `TokenRateLimited`      | rate           |
//! | 1042 | `IllegalCharacters`     | client         |
//! | 2013 | `InvalidInput`          | client         |
//! | 2039 | `VoiceIdExists`         | client         |
//!
//! ```rust
//! use minimax_speech::error_code::ServiceStatusCode;
//!
//! let code = ServiceStatusCode::from_code(1002);
//! assert_eq!(code, ServiceStatusCode::RateLimited);
//! assert_eq!(code.category(), "rate");
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceStatusCode {
    /// 0: request succeeded
    Success,
    /// 1000: unknown error
    Unknown,
    /// 1001: request timed out on the service side
    Timeout,
    /// 1002: request rate limit triggered
    RateLimited,
    /// 1004: authentication failed (bad or missing API key)
    AuthenticationFailed,
    /// 1008: account balance insufficient
    InsufficientBalance,
    /// 1039: tokens-per-minute limit triggered
    TokenRateLimited,
    /// 1042: illegal characters exceed 10% of the input
    IllegalCharacters,
    /// 2013: invalid input parameters
    InvalidInput,
    /// 2039: the requested voice id already exists
    VoiceIdExists,
    /// Any code not documented above
    Other(i64),
}

impl ServiceStatusCode {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Success,
            1000 => Self::Unknown,
            1001 => Self::Timeout,
            1002 => Self::RateLimited,
            1004 => Self::AuthenticationFailed,
            1008 => Self::InsufficientBalance,
            1039 => Self::TokenRateLimited,
            1042 => Self::IllegalCharacters,
            2013 => Self::InvalidInput,
            2039 => Self::VoiceIdExists,
            other => Self::Other(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Success => 0,
            Self::Unknown => 1000,
            Self::Timeout => 1001,
            Self::RateLimited => 1002,
            Self::AuthenticationFailed => 1004,
            Self::InsufficientBalance => 1008,
            Self::TokenRateLimited => 1039,
            Self::IllegalCharacters => 1042,
            Self::InvalidInput => 2013,
            Self::VoiceIdExists => 2039,
            Self::Other(code) => *code,
        }
    }

    /// Short human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Unknown | Self::Other(_) => "unknown error",
            Self::Timeout => "service timeout",
            Self::RateLimited => "rate limit triggered",
            Self::AuthenticationFailed => "authentication failed",
            Self::InsufficientBalance => "insufficient account balance",
            Self::TokenRateLimited => "TPM rate limit triggered",
            Self::IllegalCharacters => "illegal characters exceed 10% of the input",
            Self::InvalidInput => "invalid input format",
            Self::VoiceIdExists => "voice id already exists",
        }
    }

    /// Returns `"success"`, `"client"`, `"authentication"`, `"rate"` or `"server"`.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::IllegalCharacters | Self::InvalidInput | Self::VoiceIdExists => "client",
            Self::AuthenticationFailed => "authentication",
            Self::RateLimited | Self::TokenRateLimited | Self::InsufficientBalance => "rate",
            Self::Unknown | Self::Timeout | Self::Other(_) => "server",
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for ServiceStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}
