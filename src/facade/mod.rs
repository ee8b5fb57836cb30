//! Developer-friendly facade layer (optional).
//!
//! Flat-parameter helpers for the common one-shot calls. Everything here is
//! built from the structured request types in [`crate::types`], so the facade
//! is never the only way to reach a behavior.

pub mod prelude;
pub mod speech;

pub use speech::{CloneOptions, SpeechOptions, SynthesizedAudio};
