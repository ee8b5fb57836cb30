//! 类型系统模块：MiniMax 语音接口的请求与响应类型。
//!
//! # Types Module
//!
//! Strongly-typed request and response values for every MiniMax speech endpoint.
//!
//! Every request type validates on construction and on deserialization, so an
//! out-of-range value can never reach the network. Wire encoding is plain serde;
//! optional fields are omitted when unset.
//!
//! ## Submodules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`common`] | Enumerated sets shared by several endpoints and the `base_resp` envelope |
//! | [`t2a`] | Text-to-audio request and response |
//! | [`voice`] | Voice listing |
//! | [`file`] | File upload |
//! | [`clone`] | Voice cloning and deletion |
//!
//! ## Example
//!
//! ```rust
//! use minimax_speech::types::{Model, SystemVoice, T2ARequest, VoiceSetting};
//!
//! let voice = VoiceSetting::builder(SystemVoice::CalmWoman).speed(1.2).build()?;
//! let request = T2ARequest::new(Model::Speech02Turbo, "Hello there", voice)?;
//! assert_eq!(request.voice_setting().voice_id(), "Calm_Woman");
//! # Ok::<(), minimax_speech::Error>(())
//! ```

pub mod clone;
pub mod common;
pub mod file;
pub mod t2a;
pub mod voice;

pub use clone::{
    validate_voice_id, DeleteVoiceType, VoiceCloneRequest, VoiceCloneRequestBuilder,
    VoiceCloneResponse, VoiceDeleteRequest, VoiceDeleteResponse,
};
pub use common::{AudioFormat, BaseResp, Bitrate, Channel, Model, SampleRate};
pub use file::{FileId, FileUploadResponse, FileUploadResult, DEFAULT_UPLOAD_PURPOSE};
pub use t2a::{
    AudioSetting, Emotion, Language, PronunciationDict, SystemVoice, T2AData, T2AExtra,
    T2ARequest, T2ARequestBuilder, T2AResponse, TimberWeight, VoiceSetting, VoiceSettingBuilder,
};
pub use voice::{
    ClonedVoice, GeneratedVoice, MusicVoice, SystemVoiceInfo, Voice, VoiceCategory,
    VoiceListResponse, VoiceSlot, VoiceType,
};
