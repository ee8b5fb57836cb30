use crate::transport::TransportError;
use std::time::Duration;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Delay growth between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backoff {
    /// Same delay before every retry.
    #[default]
    Fixed,
    /// `delay * 2^attempt`, capped at `max_delay`.
    Exponential,
}

/// How many times, and how far apart, retryable failures are re-sent.
///
/// Only transport failures (timeout, connection) and HTTP 5xx are retryable.
/// HTTP 4xx and service-level rejections always fail on the first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    delay: Duration,
    max_delay: Duration,
    backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: DEFAULT_RETRY_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            backoff: Backoff::Fixed,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self::default().with_max_retries(0)
    }

    pub fn with_max_retries(self, max_retries: u32) -> Self {
        Self {
            max_retries,
            ..self
        }
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }

    pub fn with_max_delay(self, max_delay: Duration) -> Self {
        Self { max_delay, ..self }
    }

    pub fn with_backoff(self, backoff: Backoff) -> Self {
        Self { backoff, ..self }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Upper bound on network attempts for one call.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Delay before retry number `attempt + 1` (`attempt` is 0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base = match self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Exponential => {
                // exponential backoff: delay * 2^attempt
                let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
                self.delay.saturating_mul(factor)
            }
        };
        base.min(self.max_delay)
    }

    /// Decide what to do after attempt number `attempt` (0-based) failed.
    pub(crate) fn decide(&self, failure: &AttemptFailure, attempt: u32) -> Decision {
        if failure.is_retryable() && attempt < self.max_retries {
            Decision::Retry {
                delay: self.delay_for(attempt),
            }
        } else {
            Decision::Fail
        }
    }
}

/// Internal decision for how to proceed after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Retry { delay: Duration },
    Fail,
}

/// Why a single attempt failed, before it is turned into a caller-facing error.
#[derive(Debug)]
pub(crate) enum AttemptFailure {
    /// The service was not reached or did not answer in time.
    Transport(TransportError),
    /// HTTP 5xx.
    Server { http_status: u16, message: String },
    /// Anything that must not be re-sent (4xx, service rejection, bad body).
    Final(crate::Error),
}

impl AttemptFailure {
    pub(crate) fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Server { .. })
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Transport(e) => e.to_string(),
            Self::Server {
                http_status,
                message,
            } => format!("HTTP {}: {}", http_status, message),
            Self::Final(e) => e.to_string(),
        }
    }

    /// Caller-facing error once no more attempts will be made.
    pub(crate) fn into_error(self, attempts: u32, timeout: Duration) -> crate::Error {
        match self {
            Self::Transport(e) => crate::Error::from_transport(e, attempts, timeout),
            Self::Server {
                http_status,
                message,
            } => crate::Error::Api {
                status_code: i64::from(http_status),
                message,
                http_status: Some(http_status),
                attempts,
            },
            Self::Final(mut e) => {
                if let crate::Error::Api { attempts: a, .. } = &mut e {
                    *a = attempts;
                }
                e
            }
        }
    }
}
