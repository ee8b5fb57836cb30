use crate::audio::pcm_to_wav;
use crate::types::{
    AudioFormat, AudioSetting, Bitrate, Channel, Emotion, FileId, Language, Model, SampleRate,
    SystemVoice, T2ARequest, T2AResponse, VoiceCloneRequest, VoiceSetting,
};
use crate::{Error, Result};
use std::time::Duration;

/// Flat synthesis parameters.
///
/// Defaults: `Wise_Woman`, `speech-02-hd`, speed 1.0, volume 1.0, pitch 0,
/// mp3 at 32 kHz / 128 kbps, mono.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechOptions {
    pub voice_id: String,
    pub model: Model,
    pub speed: f64,
    pub volume: f64,
    pub pitch: i32,
    pub emotion: Option<Emotion>,
    pub format: AudioFormat,
    pub sample_rate: SampleRate,
    pub bitrate: Bitrate,
    pub channel: Channel,
    pub language_boost: Option<Language>,
    pub english_normalization: bool,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            voice_id: SystemVoice::WiseWoman.id().to_string(),
            model: Model::Speech02Hd,
            speed: 1.0,
            volume: 1.0,
            pitch: 0,
            emotion: None,
            format: AudioFormat::Mp3,
            sample_rate: SampleRate::Hz32000,
            bitrate: Bitrate::Bps128000,
            channel: Channel::Mono,
            language_boost: None,
            english_normalization: false,
        }
    }
}

impl SpeechOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
        self
    }

    pub fn model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    pub fn pitch(mut self, pitch: i32) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn emotion(mut self, emotion: Emotion) -> Self {
        self.emotion = Some(emotion);
        self
    }

    pub fn format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    pub fn sample_rate(mut self, sample_rate: SampleRate) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn bitrate(mut self, bitrate: Bitrate) -> Self {
        self.bitrate = bitrate;
        self
    }

    pub fn channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    pub fn language_boost(mut self, language: Language) -> Self {
        self.language_boost = Some(language);
        self
    }

    pub fn audio_setting(&self) -> AudioSetting {
        AudioSetting::new(self.sample_rate, self.bitrate, self.format, self.channel)
    }

    /// Build the validated structured request for `text`.
    pub fn to_request(&self, text: impl Into<String>) -> Result<T2ARequest> {
        let mut voice = VoiceSetting::builder(self.voice_id.clone())
            .speed(self.speed)
            .volume(self.volume)
            .pitch(self.pitch)
            .english_normalization(self.english_normalization);
        if let Some(emotion) = self.emotion {
            voice = voice.emotion(emotion);
        }
        let mut request = T2ARequest::builder(text, voice.build()?)
            .model(self.model)
            .audio_setting(self.audio_setting());
        if let Some(language) = self.language_boost {
            request = request.language_boost(language);
        }
        request.build()
    }
}

/// Decoded synthesis result.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedAudio {
    pub audio: Vec<u8>,
    pub format: AudioFormat,
    pub sample_rate: SampleRate,
    pub channel: Channel,
    pub duration: Option<Duration>,
    pub trace_id: Option<String>,
}

impl SynthesizedAudio {
    /// Decode `response`, which answered a request with `setting`.
    pub fn from_response(response: &T2AResponse, setting: &AudioSetting) -> Result<Self> {
        let audio = response.audio_bytes()?;
        let duration = response
            .duration()
            .or_else(|| pcm_duration(&audio, setting));
        Ok(Self {
            audio,
            format: setting.format(),
            sample_rate: setting.sample_rate(),
            channel: setting.channel(),
            duration,
            trace_id: response.trace_id.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.audio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.audio.is_empty()
    }

    /// PCM output as a 16-bit WAV file.
    pub fn to_wav(&self) -> Result<Vec<u8>> {
        if self.format != AudioFormat::Pcm {
            return Err(Error::validation(
                "format",
                format!("{} audio cannot be wrapped as WAV", self.format),
                "pcm",
            ));
        }
        pcm_to_wav(
            &self.audio,
            u16::from(self.channel.count()),
            self.sample_rate.hz(),
            16,
        )
    }
}

// 16-bit samples.
fn pcm_duration(audio: &[u8], setting: &AudioSetting) -> Option<Duration> {
    if setting.format() != AudioFormat::Pcm {
        return None;
    }
    let bytes_per_sec =
        u64::from(setting.sample_rate().hz()) * u64::from(setting.channel().count()) * 2;
    Some(Duration::from_secs_f64(audio.len() as f64 / bytes_per_sec as f64))
}

/// Flat voice clone parameters (file id and voice id are passed separately).
#[derive(Debug, Clone, PartialEq)]
pub struct CloneOptions {
    pub text: Option<String>,
    pub model: Option<Model>,
    pub accuracy: f64,
    pub need_noise_reduction: bool,
    pub need_volume_normalization: bool,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            text: None,
            model: None,
            accuracy: crate::types::clone::DEFAULT_ACCURACY,
            need_noise_reduction: false,
            need_volume_normalization: false,
        }
    }
}

impl CloneOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preview(mut self, text: impl Into<String>, model: Model) -> Self {
        self.text = Some(text.into());
        self.model = Some(model);
        self
    }

    pub fn accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn noise_reduction(mut self, enable: bool) -> Self {
        self.need_noise_reduction = enable;
        self
    }

    pub fn volume_normalization(mut self, enable: bool) -> Self {
        self.need_volume_normalization = enable;
        self
    }

    pub fn to_request(
        &self,
        file_id: FileId,
        voice_id: impl Into<String>,
    ) -> Result<VoiceCloneRequest> {
        let mut builder = VoiceCloneRequest::builder(file_id, voice_id)
            .accuracy(self.accuracy)
            .noise_reduction(self.need_noise_reduction)
            .volume_normalization(self.need_volume_normalization);
        if let Some(text) = &self.text {
            builder = builder.text(text.clone());
        }
        if let Some(model) = self.model {
            builder = builder.model(model);
        }
        builder.build()
    }
}
