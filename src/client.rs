//! MiniMax speech clients.
//!
//! Two independent clients expose the same operations: [`MiniMaxSpeech`]
//! blocks the calling thread, [`AsyncMiniMaxSpeech`] suspends the calling task
//! and multiplexes calls over a shared connection pool. Request preparation,
//! response mapping and retry decisions live in the shared `core` and
//! [`policy`] modules, which perform no I/O.

pub mod async_client;
pub mod blocking;
mod core;
pub mod policy;

pub use async_client::AsyncMiniMaxSpeech;
pub use blocking::MiniMaxSpeech;
pub use policy::{Backoff, RetryPolicy};
