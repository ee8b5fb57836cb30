//! Enumerated value sets shared by several endpoints.

use crate::error_code::ServiceStatusCode;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Speech models accepted by the T2A and voice clone endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Model {
    #[default]
    #[serde(rename = "speech-02-hd")]
    Speech02Hd,
    #[serde(rename = "speech-02-turbo")]
    Speech02Turbo,
    #[serde(rename = "speech-01-hd")]
    Speech01Hd,
    #[serde(rename = "speech-01-turbo")]
    Speech01Turbo,
}

impl Model {
    pub const ALL: [Model; 4] = [
        Model::Speech02Hd,
        Model::Speech02Turbo,
        Model::Speech01Hd,
        Model::Speech01Turbo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Speech02Hd => "speech-02-hd",
            Self::Speech02Turbo => "speech-02-turbo",
            Self::Speech01Hd => "speech-01-hd",
            Self::Speech01Turbo => "speech-01-turbo",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Model {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Model::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                Error::validation(
                    "model",
                    format!("unsupported model '{}'", s),
                    accepted_list(Model::ALL.iter().map(|m| m.as_str())),
                )
            })
    }
}

/// Output sample rate in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SampleRate {
    Hz8000,
    Hz16000,
    Hz22050,
    Hz24000,
    #[default]
    Hz32000,
    Hz44100,
}

impl SampleRate {
    pub const ALL: [SampleRate; 6] = [
        SampleRate::Hz8000,
        SampleRate::Hz16000,
        SampleRate::Hz22050,
        SampleRate::Hz24000,
        SampleRate::Hz32000,
        SampleRate::Hz44100,
    ];

    pub fn hz(&self) -> u32 {
        match self {
            Self::Hz8000 => 8000,
            Self::Hz16000 => 16000,
            Self::Hz22050 => 22050,
            Self::Hz24000 => 24000,
            Self::Hz32000 => 32000,
            Self::Hz44100 => 44100,
        }
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        SampleRate::ALL
            .into_iter()
            .find(|r| r.hz() == value)
            .ok_or_else(|| {
                Error::validation(
                    "audio_setting.sample_rate",
                    format!("unsupported sample rate {}", value),
                    accepted_list(SampleRate::ALL.iter().map(|r| r.hz())),
                )
            })
    }
}

impl From<SampleRate> for u32 {
    fn from(value: SampleRate) -> Self {
        value.hz()
    }
}

/// Output bitrate in bits per second (meaningful for mp3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Bitrate {
    Bps32000,
    Bps64000,
    #[default]
    Bps128000,
    Bps256000,
}

impl Bitrate {
    pub const ALL: [Bitrate; 4] = [
        Bitrate::Bps32000,
        Bitrate::Bps64000,
        Bitrate::Bps128000,
        Bitrate::Bps256000,
    ];

    pub fn bps(&self) -> u32 {
        match self {
            Self::Bps32000 => 32000,
            Self::Bps64000 => 64000,
            Self::Bps128000 => 128000,
            Self::Bps256000 => 256000,
        }
    }
}

impl TryFrom<u32> for Bitrate {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Bitrate::ALL
            .into_iter()
            .find(|b| b.bps() == value)
            .ok_or_else(|| {
                Error::validation(
                    "audio_setting.bitrate",
                    format!("unsupported bitrate {}", value),
                    accepted_list(Bitrate::ALL.iter().map(|b| b.bps())),
                )
            })
    }
}

impl From<Bitrate> for u32 {
    fn from(value: Bitrate) -> Self {
        value.bps()
    }
}

/// Audio container returned by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Pcm,
    Flac,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 3] = [AudioFormat::Mp3, AudioFormat::Pcm, AudioFormat::Flac];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Pcm => "pcm",
            Self::Flac => "flac",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Pcm => "audio/pcm",
            Self::Flac => "audio/flac",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mp3" => Ok(Self::Mp3),
            "pcm" => Ok(Self::Pcm),
            "flac" => Ok(Self::Flac),
            other => Err(Error::validation(
                "audio_setting.format",
                format!("unsupported audio format '{}'", other),
                "mp3, pcm, flac",
            )),
        }
    }
}

/// Number of output channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Channel {
    #[default]
    Mono,
    Stereo,
}

impl Channel {
    pub fn count(&self) -> u8 {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }
}

impl TryFrom<u8> for Channel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Mono),
            2 => Ok(Self::Stereo),
            other => Err(Error::validation(
                "audio_setting.channel",
                format!("unsupported channel count {}", other),
                "1, 2",
            )),
        }
    }
}

impl From<Channel> for u8 {
    fn from(value: Channel) -> Self {
        value.count()
    }
}

/// Status envelope present in every response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseResp {
    pub status_code: i64,
    #[serde(default)]
    pub status_msg: Option<String>,
}

impl BaseResp {
    pub fn is_success(&self) -> bool {
        self.status_code == 0
    }

    pub fn code(&self) -> ServiceStatusCode {
        ServiceStatusCode::from_code(self.status_code)
    }

    pub fn message(&self) -> &str {
        self.status_msg.as_deref().unwrap_or_default()
    }

    /// "<description>: <status_msg>" for error messages.
    pub fn describe(&self) -> String {
        let code = self.code();
        match self.status_msg.as_deref() {
            Some(msg) if !msg.is_empty() => format!("{}: {}", code.description(), msg),
            _ => code.description().to_string(),
        }
    }
}

pub(crate) fn accepted_list<T: ToString>(values: impl Iterator<Item = T>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}
