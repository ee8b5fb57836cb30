//! # minimax-speech
//!
//! MiniMax 语音接口的类型化 Rust 客户端：文本转语音、音色查询、文件上传与音色复刻。
//!
//! Typed client for the MiniMax speech APIs: text-to-audio (T2A), voice listing,
//! file upload, voice cloning and voice deletion.
//!
//! ## Overview
//!
//! Requests are built from validated value types, so out-of-range parameters
//! are rejected before any network call. Calls go through a retry layer that
//! re-sends transport failures and HTTP 5xx, and every failure surfaces as a
//! typed [`Error`] that separates local validation, service rejection, timeout
//! and unreachable-service cases.
//!
//! - **Blocking**: [`MiniMaxSpeech`] blocks the calling thread per call
//! - **Async**: [`AsyncMiniMaxSpeech`] suspends the task and shares a connection pool
//! - **Batching**: both clients offer order-preserving batch synthesis with a
//!   bounded number of requests in flight
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minimax_speech::prelude::*;
//!
//! fn main() -> minimax_speech::Result<()> {
//!     let config = ClientConfigBuilder::from_env().build()?;
//!     let client = MiniMaxSpeech::new(config)?;
//!
//!     let options = SpeechOptions::new().voice(SystemVoice::CalmWoman.id()).speed(1.1);
//!     let audio = client.text_to_speech_simple("Hello from MiniMax", &options)?;
//!     std::fs::write("hello.mp3", &audio.audio)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Request/response value types |
//! | [`config`] | Client configuration and endpoint URLs |
//! | [`transport`] | HTTP abstraction and reqwest-backed transports |
//! | [`client`] | Blocking and async clients, retry policy |
//! | [`facade`] | Flat-parameter convenience API |
//! | [`audio`] | PCM to WAV wrapping |
//! | [`error_code`] | Service status code table |

pub mod audio;
pub mod client;
pub mod config;
pub mod error_code;
pub mod facade;
pub mod transport;
pub mod types;

pub use client::{AsyncMiniMaxSpeech, Backoff, MiniMaxSpeech, RetryPolicy};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use facade::{prelude, CloneOptions, SpeechOptions, SynthesizedAudio};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, ErrorKind};
