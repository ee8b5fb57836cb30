//! Text-to-audio request and response types.

use super::common::{accepted_list, AudioFormat, BaseResp, Bitrate, Channel, Model, SampleRate};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const SPEED_RANGE: (f64, f64) = (0.5, 2.0);
pub const VOLUME_MAX: f64 = 10.0;
pub const PITCH_RANGE: (i32, i32) = (-12, 12);
pub const TIMBER_WEIGHT_RANGE: (u8, u8) = (1, 100);

/// Emotion hint for the synthesized voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Fearful,
    Disgusted,
    Surprised,
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Fearful,
        Emotion::Disgusted,
        Emotion::Surprised,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Fearful => "fearful",
            Self::Disgusted => "disgusted",
            Self::Surprised => "surprised",
            Self::Neutral => "neutral",
        }
    }
}

impl FromStr for Emotion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == s.to_lowercase())
            .ok_or_else(|| {
                Error::validation(
                    "voice_setting.emotion",
                    format!("unsupported emotion '{}'", s),
                    accepted_list(Emotion::ALL.iter().map(|e| e.as_str())),
                )
            })
    }
}

/// Language boost values accepted by the T2A endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Chinese,
    #[serde(rename = "Chinese,Yue")]
    ChineseYue,
    English,
    Arabic,
    Russian,
    Spanish,
    French,
    Portuguese,
    German,
    Turkish,
    Dutch,
    Ukrainian,
    Vietnamese,
    Indonesian,
    Japanese,
    Italian,
    Korean,
    Thai,
    Polish,
    Romanian,
    Greek,
    Czech,
    Finnish,
    Hindi,
    #[serde(rename = "auto")]
    Auto,
}

impl Language {
    pub const ALL: [Language; 25] = [
        Language::Chinese,
        Language::ChineseYue,
        Language::English,
        Language::Arabic,
        Language::Russian,
        Language::Spanish,
        Language::French,
        Language::Portuguese,
        Language::German,
        Language::Turkish,
        Language::Dutch,
        Language::Ukrainian,
        Language::Vietnamese,
        Language::Indonesian,
        Language::Japanese,
        Language::Italian,
        Language::Korean,
        Language::Thai,
        Language::Polish,
        Language::Romanian,
        Language::Greek,
        Language::Czech,
        Language::Finnish,
        Language::Hindi,
        Language::Auto,
    ];

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chinese => "Chinese",
            Self::ChineseYue => "Chinese,Yue",
            Self::English => "English",
            Self::Arabic => "Arabic",
            Self::Russian => "Russian",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::Portuguese => "Portuguese",
            Self::German => "German",
            Self::Turkish => "Turkish",
            Self::Dutch => "Dutch",
            Self::Ukrainian => "Ukrainian",
            Self::Vietnamese => "Vietnamese",
            Self::Indonesian => "Indonesian",
            Self::Japanese => "Japanese",
            Self::Italian => "Italian",
            Self::Korean => "Korean",
            Self::Thai => "Thai",
            Self::Polish => "Polish",
            Self::Romanian => "Romanian",
            Self::Greek => "Greek",
            Self::Czech => "Czech",
            Self::Finnish => "Finnish",
            Self::Hindi => "Hindi",
            Self::Auto => "auto",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ChineseYue => "Cantonese",
            Self::Auto => "Automatic detection",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Language::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::validation(
                    "language_boost",
                    format!("unsupported language '{}'", s),
                    accepted_list(Language::ALL.iter().map(|l| l.as_str())),
                )
            })
    }
}

/// Well-known system voices. Any other voice id string is accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemVoice {
    WiseWoman,
    FriendlyPerson,
    InspirationalGirl,
    DeepVoiceMan,
    CalmWoman,
    CasualGuy,
    LivelyGirl,
    PatientMan,
    YoungKnight,
    DeterminedMan,
    LovelyGirl,
    DecentBoy,
    ImposingManner,
    ElegantMan,
    Abbess,
    SweetGirl2,
    ExuberantGirl,
}

impl SystemVoice {
    pub const ALL: [SystemVoice; 17] = [
        SystemVoice::WiseWoman,
        SystemVoice::FriendlyPerson,
        SystemVoice::InspirationalGirl,
        SystemVoice::DeepVoiceMan,
        SystemVoice::CalmWoman,
        SystemVoice::CasualGuy,
        SystemVoice::LivelyGirl,
        SystemVoice::PatientMan,
        SystemVoice::YoungKnight,
        SystemVoice::DeterminedMan,
        SystemVoice::LovelyGirl,
        SystemVoice::DecentBoy,
        SystemVoice::ImposingManner,
        SystemVoice::ElegantMan,
        SystemVoice::Abbess,
        SystemVoice::SweetGirl2,
        SystemVoice::ExuberantGirl,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::WiseWoman => "Wise_Woman",
            Self::FriendlyPerson => "Friendly_Person",
            Self::InspirationalGirl => "Inspirational_girl",
            Self::DeepVoiceMan => "Deep_Voice_Man",
            Self::CalmWoman => "Calm_Woman",
            Self::CasualGuy => "Casual_Guy",
            Self::LivelyGirl => "Lively_Girl",
            Self::PatientMan => "Patient_Man",
            Self::YoungKnight => "Young_Knight",
            Self::DeterminedMan => "Determined_Man",
            Self::LovelyGirl => "Lovely_Girl",
            Self::DecentBoy => "Decent_Boy",
            Self::ImposingManner => "Imposing_Manner",
            Self::ElegantMan => "Elegant_Man",
            Self::Abbess => "Abbess",
            Self::SweetGirl2 => "Sweet_Girl_2",
            Self::ExuberantGirl => "Exuberant_Girl",
        }
    }
}

impl From<SystemVoice> for String {
    fn from(value: SystemVoice) -> Self {
        value.id().to_string()
    }
}

/// Voice parameters. Construct with [`VoiceSetting::builder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VoiceSettingWire")]
pub struct VoiceSetting {
    voice_id: String,
    speed: f64,
    vol: f64,
    pitch: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    emotion: Option<Emotion>,
    english_normalization: bool,
}

#[derive(Deserialize)]
struct VoiceSettingWire {
    voice_id: String,
    #[serde(default = "default_unit")]
    speed: f64,
    #[serde(default = "default_unit")]
    vol: f64,
    #[serde(default)]
    pitch: i32,
    #[serde(default)]
    emotion: Option<Emotion>,
    #[serde(default)]
    english_normalization: bool,
}

fn default_unit() -> f64 {
    1.0
}

impl TryFrom<VoiceSettingWire> for VoiceSetting {
    type Error = Error;

    fn try_from(w: VoiceSettingWire) -> Result<Self> {
        VoiceSetting {
            voice_id: w.voice_id,
            speed: w.speed,
            vol: w.vol,
            pitch: w.pitch,
            emotion: w.emotion,
            english_normalization: w.english_normalization,
        }
        .validated()
    }
}

impl VoiceSetting {
    pub fn builder(voice_id: impl Into<String>) -> VoiceSettingBuilder {
        VoiceSettingBuilder::new(voice_id)
    }

    /// Voice with default speed, volume and pitch.
    pub fn new(voice_id: impl Into<String>) -> Result<Self> {
        Self::builder(voice_id).build()
    }

    fn validated(self) -> Result<Self> {
        if self.voice_id.trim().is_empty() {
            return Err(Error::validation(
                "voice_setting.voice_id",
                "voice_id must not be empty",
                "non-empty string",
            ));
        }
        if !(SPEED_RANGE.0..=SPEED_RANGE.1).contains(&self.speed) {
            return Err(Error::validation(
                "voice_setting.speed",
                format!("speed {} out of range", self.speed),
                format!("[{}, {}]", SPEED_RANGE.0, SPEED_RANGE.1),
            ));
        }
        if !(self.vol > 0.0 && self.vol <= VOLUME_MAX) {
            return Err(Error::validation(
                "voice_setting.vol",
                format!("volume {} out of range", self.vol),
                format!("(0, {}]", VOLUME_MAX),
            ));
        }
        if !(PITCH_RANGE.0..=PITCH_RANGE.1).contains(&self.pitch) {
            return Err(Error::validation(
                "voice_setting.pitch",
                format!("pitch {} out of range", self.pitch),
                format!("[{}, {}]", PITCH_RANGE.0, PITCH_RANGE.1),
            ));
        }
        Ok(self)
    }

    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn volume(&self) -> f64 {
        self.vol
    }

    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    pub fn emotion(&self) -> Option<Emotion> {
        self.emotion
    }

    pub fn english_normalization(&self) -> bool {
        self.english_normalization
    }
}

#[derive(Debug, Clone)]
pub struct VoiceSettingBuilder {
    inner: VoiceSetting,
}

impl VoiceSettingBuilder {
    pub fn new(voice_id: impl Into<String>) -> Self {
        Self {
            inner: VoiceSetting {
                voice_id: voice_id.into(),
                speed: 1.0,
                vol: 1.0,
                pitch: 0,
                emotion: None,
                english_normalization: false,
            },
        }
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.inner.speed = speed;
        self
    }

    pub fn volume(mut self, vol: f64) -> Self {
        self.inner.vol = vol;
        self
    }

    pub fn pitch(mut self, pitch: i32) -> Self {
        self.inner.pitch = pitch;
        self
    }

    pub fn emotion(mut self, emotion: Emotion) -> Self {
        self.inner.emotion = Some(emotion);
        self
    }

    pub fn english_normalization(mut self, enable: bool) -> Self {
        self.inner.english_normalization = enable;
        self
    }

    pub fn build(self) -> Result<VoiceSetting> {
        self.inner.validated()
    }
}

/// Output audio parameters. Every combination of the enumerated values is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AudioSetting {
    #[serde(default)]
    sample_rate: SampleRate,
    #[serde(default)]
    bitrate: Bitrate,
    #[serde(default)]
    format: AudioFormat,
    #[serde(default)]
    channel: Channel,
}

impl AudioSetting {
    pub fn new(
        sample_rate: SampleRate,
        bitrate: Bitrate,
        format: AudioFormat,
        channel: Channel,
    ) -> Self {
        Self {
            sample_rate,
            bitrate,
            format,
            channel,
        }
    }

    /// Build from raw numbers, rejecting values outside the accepted sets.
    pub fn from_raw(sample_rate: u32, bitrate: u32, format: &str, channel: u8) -> Result<Self> {
        Ok(Self {
            sample_rate: SampleRate::try_from(sample_rate)?,
            bitrate: Bitrate::try_from(bitrate)?,
            format: format.parse()?,
            channel: Channel::try_from(channel)?,
        })
    }

    pub fn with_format(self, format: AudioFormat) -> Self {
        Self { format, ..self }
    }

    pub fn with_sample_rate(self, sample_rate: SampleRate) -> Self {
        Self {
            sample_rate,
            ..self
        }
    }

    pub fn with_bitrate(self, bitrate: Bitrate) -> Self {
        Self { bitrate, ..self }
    }

    pub fn with_channel(self, channel: Channel) -> Self {
        Self { channel, ..self }
    }

    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    pub fn bitrate(&self) -> Bitrate {
        self.bitrate
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }
}

/// Pronunciation overrides, e.g. `"处理/(chu3)(li3)"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PronunciationDict {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tone: Vec<String>,
}

impl PronunciationDict {
    pub fn new(tone: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            tone: tone.into_iter().map(Into::into).collect(),
        }
    }
}

/// One component of a mixed voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimberWeightWire")]
pub struct TimberWeight {
    voice_id: String,
    weight: u8,
}

#[derive(Deserialize)]
struct TimberWeightWire {
    voice_id: String,
    weight: u8,
}

impl TryFrom<TimberWeightWire> for TimberWeight {
    type Error = Error;

    fn try_from(w: TimberWeightWire) -> Result<Self> {
        TimberWeight::new(w.voice_id, w.weight)
    }
}

impl TimberWeight {
    pub fn new(voice_id: impl Into<String>, weight: u8) -> Result<Self> {
        let voice_id = voice_id.into();
        if voice_id.trim().is_empty() {
            return Err(Error::validation(
                "timber_weights.voice_id",
                "voice_id must not be empty",
                "non-empty string",
            ));
        }
        if !(TIMBER_WEIGHT_RANGE.0..=TIMBER_WEIGHT_RANGE.1).contains(&weight) {
            return Err(Error::validation(
                "timber_weights.weight",
                format!("weight {} out of range", weight),
                format!("[{}, {}]", TIMBER_WEIGHT_RANGE.0, TIMBER_WEIGHT_RANGE.1),
            ));
        }
        Ok(Self { voice_id, weight })
    }

    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }

    pub fn weight(&self) -> u8 {
        self.weight
    }
}

/// A validated text-to-audio request.
///
/// The wire body always carries `"stream": false` and `"output_format": "hex"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "T2ARequestWire")]
pub struct T2ARequest {
    model: Model,
    text: String,
    voice_setting: VoiceSetting,
    audio_setting: AudioSetting,
    pronunciation_dict: Option<PronunciationDict>,
    timber_weights: Option<Vec<TimberWeight>>,
    language_boost: Option<Language>,
    subtitle_enable: bool,
}

const OUTPUT_FORMAT_HEX: &str = "hex";

#[derive(Serialize)]
struct T2ARequestWireRef<'a> {
    model: Model,
    text: &'a str,
    stream: bool,
    voice_setting: &'a VoiceSetting,
    audio_setting: &'a AudioSetting,
    #[serde(skip_serializing_if = "Option::is_none")]
    pronunciation_dict: Option<&'a PronunciationDict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timber_weights: Option<&'a [TimberWeight]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language_boost: Option<Language>,
    subtitle_enable: bool,
    output_format: &'static str,
}

#[derive(Deserialize)]
struct T2ARequestWire {
    model: Model,
    text: String,
    #[serde(default)]
    stream: bool,
    voice_setting: VoiceSetting,
    #[serde(default)]
    audio_setting: AudioSetting,
    #[serde(default)]
    pronunciation_dict: Option<PronunciationDict>,
    #[serde(default)]
    timber_weights: Option<Vec<TimberWeight>>,
    #[serde(default)]
    language_boost: Option<Language>,
    #[serde(default)]
    subtitle_enable: bool,
    #[serde(default)]
    output_format: Option<String>,
}

impl TryFrom<T2ARequestWire> for T2ARequest {
    type Error = Error;

    fn try_from(w: T2ARequestWire) -> Result<Self> {
        if w.stream {
            return Err(Error::validation(
                "stream",
                "streaming synthesis is not supported",
                "false",
            ));
        }
        if let Some(fmt) = w.output_format.as_deref() {
            if fmt != OUTPUT_FORMAT_HEX {
                return Err(Error::validation(
                    "output_format",
                    format!("unsupported output format '{}'", fmt),
                    OUTPUT_FORMAT_HEX,
                ));
            }
        }
        T2ARequest {
            model: w.model,
            text: w.text,
            voice_setting: w.voice_setting,
            audio_setting: w.audio_setting,
            pronunciation_dict: w.pronunciation_dict,
            timber_weights: w.timber_weights,
            language_boost: w.language_boost,
            subtitle_enable: w.subtitle_enable,
        }
        .validated()
    }
}

impl Serialize for T2ARequest {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        T2ARequestWireRef {
            model: self.model,
            text: &self.text,
            stream: false,
            voice_setting: &self.voice_setting,
            audio_setting: &self.audio_setting,
            pronunciation_dict: self.pronunciation_dict.as_ref(),
            timber_weights: self.timber_weights.as_deref(),
            language_boost: self.language_boost,
            subtitle_enable: self.subtitle_enable,
            output_format: OUTPUT_FORMAT_HEX,
        }
        .serialize(serializer)
    }
}

impl T2ARequest {
    pub fn builder(text: impl Into<String>, voice_setting: VoiceSetting) -> T2ARequestBuilder {
        T2ARequestBuilder::new(text, voice_setting)
    }

    /// Request with default audio settings.
    pub fn new(model: Model, text: impl Into<String>, voice_setting: VoiceSetting) -> Result<Self> {
        Self::builder(text, voice_setting).model(model).build()
    }

    // Text length is capped by the service, not here.
    fn validated(self) -> Result<Self> {
        if self.text.trim().is_empty() {
            return Err(Error::validation("text", "text must not be empty", "non-blank string"));
        }
        if matches!(&self.timber_weights, Some(w) if w.is_empty()) {
            return Err(Error::validation(
                "timber_weights",
                "timber_weights must not be an empty list",
                "at least one entry, or omitted",
            ));
        }
        Ok(self)
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice_setting(&self) -> &VoiceSetting {
        &self.voice_setting
    }

    pub fn audio_setting(&self) -> &AudioSetting {
        &self.audio_setting
    }

    pub fn pronunciation_dict(&self) -> Option<&PronunciationDict> {
        self.pronunciation_dict.as_ref()
    }

    pub fn timber_weights(&self) -> Option<&[TimberWeight]> {
        self.timber_weights.as_deref()
    }

    pub fn language_boost(&self) -> Option<Language> {
        self.language_boost
    }

    pub fn subtitle_enable(&self) -> bool {
        self.subtitle_enable
    }
}

pub struct T2ARequestBuilder {
    inner: T2ARequest,
}

impl T2ARequestBuilder {
    pub fn new(text: impl Into<String>, voice_setting: VoiceSetting) -> Self {
        Self {
            inner: T2ARequest {
                model: Model::default(),
                text: text.into(),
                voice_setting,
                audio_setting: AudioSetting::default(),
                pronunciation_dict: None,
                timber_weights: None,
                language_boost: None,
                subtitle_enable: false,
            },
        }
    }

    pub fn model(mut self, model: Model) -> Self {
        self.inner.model = model;
        self
    }

    pub fn audio_setting(mut self, audio_setting: AudioSetting) -> Self {
        self.inner.audio_setting = audio_setting;
        self
    }

    pub fn pronunciation_dict(mut self, dict: PronunciationDict) -> Self {
        self.inner.pronunciation_dict = Some(dict);
        self
    }

    pub fn timber_weights(mut self, weights: Vec<TimberWeight>) -> Self {
        self.inner.timber_weights = Some(weights);
        self
    }

    pub fn language_boost(mut self, language: Language) -> Self {
        self.inner.language_boost = Some(language);
        self
    }

    pub fn subtitle_enable(mut self, enable: bool) -> Self {
        self.inner.subtitle_enable = enable;
        self
    }

    pub fn build(self) -> Result<T2ARequest> {
        self.inner.validated()
    }
}

/// Audio payload of a T2A response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct T2AData {
    /// Hex-encoded audio bytes.
    #[serde(default)]
    pub audio: String,
    /// 1 while generating, 2 when complete.
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub ced: Option<String>,
}

/// Generation metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct T2AExtra {
    /// Audio length in milliseconds.
    pub audio_length: Option<u64>,
    pub audio_sample_rate: Option<u32>,
    /// Audio size in bytes.
    pub audio_size: Option<u64>,
    pub audio_bitrate: Option<u32>,
    pub audio_format: Option<String>,
    pub audio_channel: Option<u8>,
    pub invisible_character_ratio: Option<f64>,
    /// Billed characters for this request.
    pub usage_characters: Option<u64>,
    pub word_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct T2AResponse {
    #[serde(default)]
    pub data: Option<T2AData>,
    #[serde(default)]
    pub extra_info: Option<T2AExtra>,
    #[serde(default)]
    pub trace_id: Option<String>,
    pub base_resp: BaseResp,
}

impl T2AResponse {
    pub fn audio_hex(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.audio.as_str()).filter(|a| !a.is_empty())
    }

    /// Decode the hex payload into raw audio bytes.
    pub fn audio_bytes(&self) -> Result<Vec<u8>> {
        let hex_audio = self
            .audio_hex()
            .ok_or_else(|| Error::decode("response carries no audio data"))?;
        hex::decode(hex_audio).map_err(|e| Error::decode(format!("invalid hex audio: {}", e)))
    }

    /// Audio duration reported by the service.
    pub fn duration(&self) -> Option<Duration> {
        self.extra_info
            .as_ref()
            .and_then(|e| e.audio_length)
            .map(Duration::from_millis)
    }
}
