//! 同步客户端：每次调用阻塞当前线程直至完成或超时。
//!
//! Blocking client.

use crate::config::{ClientConfig, ClientConfigBuilder, Endpoint};
use crate::facade::{CloneOptions, SpeechOptions, SynthesizedAudio};
use crate::transport::{BlockingHttpTransport, HttpRequest, Transport};
use crate::types::{
    ClonedVoice, DeleteVoiceType, FileId, FileUploadResponse, FileUploadResult, GeneratedVoice,
    MusicVoice, SystemVoiceInfo, T2ARequest, T2AResponse, VoiceCloneRequest, VoiceCloneResponse,
    VoiceDeleteResponse, VoiceListResponse, VoiceSlot, VoiceType,
};
use crate::{Error, Result};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::core;
use super::policy::Decision;

/// Blocking MiniMax speech client.
///
/// Each call blocks the calling thread for at most `timeout` per attempt.
/// The transport is a type parameter so tests can count or script calls.
pub struct MiniMaxSpeech<T: Transport = BlockingHttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl MiniMaxSpeech<BlockingHttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = BlockingHttpTransport::new(config.timeout())
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { config, transport })
    }

    /// Client configured from `MINIMAX_API_KEY` / `MINIMAX_GROUP_ID`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfigBuilder::from_env().build()?)
    }
}

impl<T: Transport> MiniMaxSpeech<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `request`, retrying transport failures and 5xx per the retry policy.
    fn call<R: DeserializeOwned>(&self, endpoint: Endpoint, request: &HttpRequest) -> Result<R> {
        let request_id = Uuid::new_v4().to_string();
        let policy = self.config.retry();
        let started = Instant::now();
        let mut attempt: u32 = 0;
        loop {
            debug!(
                request_id = %request_id,
                endpoint = %endpoint,
                attempt = attempt + 1,
                "sending request"
            );
            let attempt_started = Instant::now();
            let outcome = self.transport.execute(request);
            if let Ok(resp) = &outcome {
                debug!(
                    request_id = %request_id,
                    endpoint = %endpoint,
                    http_status = resp.status,
                    duration_ms = attempt_started.elapsed().as_millis() as u64,
                    "response received"
                );
            }
            let failure = match core::map_response::<R>(outcome) {
                Ok(value) => return Ok(value),
                Err(failure) => failure,
            };
            match policy.decide(&failure, attempt) {
                Decision::Retry { delay } => {
                    warn!(
                        request_id = %request_id,
                        endpoint = %endpoint,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %failure.describe(),
                        "attempt failed, retrying"
                    );
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                    attempt += 1;
                }
                Decision::Fail => {
                    let err = failure.into_error(attempt + 1, self.config.timeout());
                    info!(
                        request_id = %request_id,
                        endpoint = %endpoint,
                        attempts = attempt + 1,
                        duration_ms = started.elapsed().as_millis() as u64,
                        error = %err,
                        "request failed"
                    );
                    return Err(err);
                }
            }
        }
    }

    /// Synthesize speech for one request.
    pub fn text_to_speech(&self, request: &T2ARequest) -> Result<T2AResponse> {
        let http = core::json_request(&self.config, Endpoint::TextToAudio, request)?;
        self.call(Endpoint::TextToAudio, &http)
    }

    /// Synthesize several requests with at most `max_concurrent` in flight.
    ///
    /// Results keep input order; a failed request only fills its own slot.
    /// A `max_concurrent` of 0 is treated as 1.
    pub fn batch_text_to_speech(
        &self,
        requests: &[T2ARequest],
        max_concurrent: usize,
    ) -> Vec<Result<T2AResponse>> {
        let workers = max_concurrent.max(1).min(requests.len());
        let next = AtomicUsize::new(0);
        let slots: Mutex<Vec<Option<Result<T2AResponse>>>> =
            Mutex::new(requests.iter().map(|_| None).collect());

        std::thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    let idx = next.fetch_add(1, Ordering::SeqCst);
                    let Some(request) = requests.get(idx) else {
                        break;
                    };
                    let result = self.text_to_speech(request);
                    let mut guard = match slots.lock() {
                        Ok(guard) => guard,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                    guard[idx] = Some(result);
                });
            }
        });

        let slots = match slots.into_inner() {
            Ok(slots) => slots,
            Err(poisoned) => poisoned.into_inner(),
        };
        slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    Err(Error::runtime("batch worker stopped before the request ran"))
                })
            })
            .collect()
    }

    /// Synthesize `text` with flat options and return decoded audio.
    pub fn text_to_speech_simple(
        &self,
        text: &str,
        options: &SpeechOptions,
    ) -> Result<SynthesizedAudio> {
        let request = options.to_request(text)?;
        let response = self.text_to_speech(&request)?;
        SynthesizedAudio::from_response(&response, request.audio_setting())
    }

    pub fn get_voice(&self, voice_type: VoiceType) -> Result<VoiceListResponse> {
        let http = core::voice_list_request(&self.config, voice_type)?;
        self.call(Endpoint::VoiceList, &http)
    }

    pub fn voice_slots(&self) -> Result<Vec<VoiceSlot>> {
        Ok(self.get_voice(VoiceType::All)?.voice_slots.unwrap_or_default())
    }

    pub fn system_voices(&self) -> Result<Vec<SystemVoiceInfo>> {
        Ok(self.get_voice(VoiceType::System)?.system_voice.unwrap_or_default())
    }

    pub fn cloned_voices(&self) -> Result<Vec<ClonedVoice>> {
        Ok(self
            .get_voice(VoiceType::VoiceCloning)?
            .voice_cloning
            .unwrap_or_default())
    }

    pub fn generated_voices(&self) -> Result<Vec<GeneratedVoice>> {
        Ok(self
            .get_voice(VoiceType::VoiceGeneration)?
            .voice_generation
            .unwrap_or_default())
    }

    pub fn music_voices(&self) -> Result<Vec<MusicVoice>> {
        Ok(self
            .get_voice(VoiceType::MusicGeneration)?
            .music_generation
            .unwrap_or_default())
    }

    /// Upload a local audio file, e.g. as a voice clone source.
    pub fn file_upload(&self, path: impl AsRef<Path>, purpose: &str) -> Result<FileUploadResult> {
        let path = path.as_ref();
        let filename = core::upload_file_name(path)?;
        let data = std::fs::read(path)?;
        self.file_upload_bytes(data, &filename, purpose)
    }

    pub fn file_upload_bytes(
        &self,
        data: impl Into<Bytes>,
        filename: &str,
        purpose: &str,
    ) -> Result<FileUploadResult> {
        let http = core::upload_request(&self.config, data.into(), filename, purpose)?;
        let response: FileUploadResponse = self.call(Endpoint::FileUpload, &http)?;
        Ok(response.file)
    }

    pub fn voice_clone(&self, request: &VoiceCloneRequest) -> Result<VoiceCloneResponse> {
        let http = core::json_request(&self.config, Endpoint::VoiceClone, request)?;
        self.call(Endpoint::VoiceClone, &http)
    }

    pub fn voice_clone_simple(
        &self,
        file_id: FileId,
        voice_id: &str,
        options: &CloneOptions,
    ) -> Result<VoiceCloneResponse> {
        let request = options.to_request(file_id, voice_id)?;
        self.voice_clone(&request)
    }

    pub fn voice_delete(
        &self,
        voice_id: &str,
        voice_type: DeleteVoiceType,
    ) -> Result<VoiceDeleteResponse> {
        let http = core::delete_request(&self.config, voice_id, voice_type)?;
        self.call(Endpoint::VoiceDelete, &http)
    }
}
