//! Minimal prelude for application code.
//!
//! Goal: reduce import noise without hiding important concepts.

pub use crate::client::{AsyncMiniMaxSpeech, Backoff, MiniMaxSpeech, RetryPolicy};
pub use crate::config::{ClientConfig, ClientConfigBuilder};
pub use crate::facade::speech::{CloneOptions, SpeechOptions, SynthesizedAudio};
pub use crate::types::{
    AudioFormat, AudioSetting, Bitrate, Channel, DeleteVoiceType, Emotion, FileId, Language, Model,
    SampleRate, SystemVoice, T2ARequest, T2AResponse, VoiceCloneRequest, VoiceSetting, VoiceType,
};
pub use crate::{Error, ErrorKind, Result};
