//! Voice cloning and deletion types.

use super::common::{BaseResp, Model};
use super::file::FileId;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const VOICE_ID_MIN_LEN: usize = 8;
pub const PREVIEW_TEXT_MAX_CHARS: usize = 2000;
pub const DEFAULT_ACCURACY: f64 = 0.7;

static VOICE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").expect("static regex"));

/// Check a custom voice id: at least 8 ASCII alphanumerics, starting with a
/// letter, containing at least one digit.
pub fn validate_voice_id(voice_id: &str) -> Result<()> {
    const ACCEPTED: &str =
        ">= 8 ASCII letters/digits, starting with a letter, with at least one digit";
    if voice_id.chars().count() < VOICE_ID_MIN_LEN {
        return Err(Error::validation(
            "voice_id",
            format!("voice_id must be at least {} characters long", VOICE_ID_MIN_LEN),
            ACCEPTED,
        ));
    }
    if !VOICE_ID_PATTERN.is_match(voice_id) {
        return Err(Error::validation(
            "voice_id",
            "voice_id must start with a letter and contain only letters and digits",
            ACCEPTED,
        ));
    }
    if !voice_id.chars().any(|c| c.is_ascii_digit()) {
        return Err(Error::validation(
            "voice_id",
            "voice_id must contain both letters and digits",
            ACCEPTED,
        ));
    }
    Ok(())
}

/// A validated voice clone job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VoiceCloneWire")]
pub struct VoiceCloneRequest {
    file_id: FileId,
    voice_id: String,
    need_noise_reduction: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<Model>,
    accuracy: f64,
    need_volume_normalization: bool,
}

#[derive(Deserialize)]
struct VoiceCloneWire {
    file_id: FileId,
    voice_id: String,
    #[serde(default)]
    need_noise_reduction: bool,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    model: Option<Model>,
    #[serde(default = "default_accuracy")]
    accuracy: f64,
    #[serde(default)]
    need_volume_normalization: bool,
}

fn default_accuracy() -> f64 {
    DEFAULT_ACCURACY
}

impl TryFrom<VoiceCloneWire> for VoiceCloneRequest {
    type Error = Error;

    fn try_from(w: VoiceCloneWire) -> Result<Self> {
        VoiceCloneRequest {
            file_id: w.file_id,
            voice_id: w.voice_id,
            need_noise_reduction: w.need_noise_reduction,
            text: w.text,
            model: w.model,
            accuracy: w.accuracy,
            need_volume_normalization: w.need_volume_normalization,
        }
        .validated()
    }
}

impl VoiceCloneRequest {
    pub fn builder(file_id: FileId, voice_id: impl Into<String>) -> VoiceCloneRequestBuilder {
        VoiceCloneRequestBuilder::new(file_id, voice_id)
    }

    pub fn new(file_id: FileId, voice_id: impl Into<String>) -> Result<Self> {
        Self::builder(file_id, voice_id).build()
    }

    fn validated(self) -> Result<Self> {
        validate_voice_id(&self.voice_id)?;
        if let Some(text) = &self.text {
            if text.chars().count() > PREVIEW_TEXT_MAX_CHARS {
                return Err(Error::validation(
                    "text",
                    "preview text too long",
                    format!("at most {} characters", PREVIEW_TEXT_MAX_CHARS),
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.accuracy) {
            return Err(Error::validation(
                "accuracy",
                format!("accuracy {} out of range", self.accuracy),
                "[0, 1]",
            ));
        }
        Ok(self)
    }

    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn model(&self) -> Option<Model> {
        self.model
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn need_noise_reduction(&self) -> bool {
        self.need_noise_reduction
    }

    pub fn need_volume_normalization(&self) -> bool {
        self.need_volume_normalization
    }
}

pub struct VoiceCloneRequestBuilder {
    inner: VoiceCloneRequest,
}

impl VoiceCloneRequestBuilder {
    pub fn new(file_id: FileId, voice_id: impl Into<String>) -> Self {
        Self {
            inner: VoiceCloneRequest {
                file_id,
                voice_id: voice_id.into(),
                need_noise_reduction: false,
                text: None,
                model: None,
                accuracy: DEFAULT_ACCURACY,
                need_volume_normalization: false,
            },
        }
    }

    /// Preview text; the service synthesizes it with the new voice.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.inner.text = Some(text.into());
        self
    }

    pub fn model(mut self, model: Model) -> Self {
        self.inner.model = Some(model);
        self
    }

    pub fn accuracy(mut self, accuracy: f64) -> Self {
        self.inner.accuracy = accuracy;
        self
    }

    pub fn noise_reduction(mut self, enable: bool) -> Self {
        self.inner.need_noise_reduction = enable;
        self
    }

    pub fn volume_normalization(mut self, enable: bool) -> Self {
        self.inner.need_volume_normalization = enable;
        self
    }

    pub fn build(self) -> Result<VoiceCloneRequest> {
        self.inner.validated()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCloneResponse {
    /// Whether the input audio triggered a content check.
    #[serde(default)]
    pub input_sensitive: bool,
    /// Preview audio URL, present when a preview text was supplied.
    #[serde(default)]
    pub demo_audio: Option<String>,
    pub base_resp: BaseResp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteVoiceType {
    VoiceGeneration,
    #[default]
    VoiceCloning,
}

impl std::str::FromStr for DeleteVoiceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "voice_generation" => Ok(Self::VoiceGeneration),
            "voice_cloning" => Ok(Self::VoiceCloning),
            other => Err(Error::validation(
                "voice_type",
                format!("unsupported delete voice type '{}'", other),
                "voice_generation, voice_cloning",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDeleteRequest {
    pub voice_id: String,
    pub voice_type: DeleteVoiceType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDeleteResponse {
    #[serde(default)]
    pub voice_id: String,
    #[serde(default)]
    pub created_time: String,
    pub base_resp: BaseResp,
}
