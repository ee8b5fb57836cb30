//! 异步客户端：在共享连接池上并发执行请求。
//!
//! Async client.

use crate::config::{ClientConfig, ClientConfigBuilder, Endpoint};
use crate::facade::{CloneOptions, SpeechOptions, SynthesizedAudio};
use crate::transport::{AsyncTransport, HttpRequest, HttpTransport, TransportError};
use crate::types::{
    ClonedVoice, DeleteVoiceType, FileId, FileUploadResponse, FileUploadResult, GeneratedVoice,
    MusicVoice, SystemVoiceInfo, T2ARequest, T2AResponse, VoiceCloneRequest, VoiceCloneResponse,
    VoiceDeleteResponse, VoiceListResponse, VoiceSlot, VoiceType,
};
use crate::{Error, Result};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::core;
use super::policy::Decision;

/// Async MiniMax speech client.
///
/// The connection pool is created with the client and shared by its clones;
/// it is released when the last clone is dropped. Dropping a call's future
/// aborts the in-flight request.
pub struct AsyncMiniMaxSpeech<T: AsyncTransport = HttpTransport> {
    config: Arc<ClientConfig>,
    transport: Arc<T>,
}

impl<T: AsyncTransport> Clone for AsyncMiniMaxSpeech<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl AsyncMiniMaxSpeech<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout())
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_transport(config, transport))
    }

    /// Client configured from `MINIMAX_API_KEY` / `MINIMAX_GROUP_ID`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfigBuilder::from_env().build()?)
    }
}

impl<T: AsyncTransport> AsyncMiniMaxSpeech<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn call<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: &HttpRequest,
    ) -> Result<R> {
        let request_id = Uuid::new_v4().to_string();
        let policy = self.config.retry();
        let timeout = self.config.timeout();
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
            // Per-attempt guard on top of the transport's own timeout.
            let outcome = tokio::time::timeout(timeout, self.transport.execute(request))
                .await
                .unwrap_or(Err(TransportError::Timeout));
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
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
                Decision::Fail => {
                    let err = failure.into_error(attempt + 1, timeout);
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

    pub async fn text_to_speech(&self, request: &T2ARequest) -> Result<T2AResponse> {
        let http = core::json_request(&self.config, Endpoint::TextToAudio, request)?;
        self.call(Endpoint::TextToAudio, &http).await
    }

    /// Synthesize several requests with at most `max_concurrent` in flight.
    ///
    /// Admission is gated by a semaphore; results keep input order and a
    /// failed request only fills its own slot. A `max_concurrent` of 0 is
    /// treated as 1; values above the number of requests are capped.
    pub async fn batch_text_to_speech(
        &self,
        requests: &[T2ARequest],
        max_concurrent: usize,
    ) -> Vec<Result<T2AResponse>> {
        let permits = max_concurrent.clamp(1, requests.len().clamp(1, Semaphore::MAX_PERMITS));
        let gate = Semaphore::new(permits);
        let gate = &gate;
        let tasks = requests.iter().map(|request| async move {
            let _permit = gate
                .acquire()
                .await
                .map_err(|_| Error::runtime("batch admission gate closed"))?;
            self.text_to_speech(request).await
        });
        futures::future::join_all(tasks).await
    }

    pub async fn text_to_speech_simple(
        &self,
        text: &str,
        options: &SpeechOptions,
    ) -> Result<SynthesizedAudio> {
        let request = options.to_request(text)?;
        let response = self.text_to_speech(&request).await?;
        SynthesizedAudio::from_response(&response, request.audio_setting())
    }

    pub async fn get_voice(&self, voice_type: VoiceType) -> Result<VoiceListResponse> {
        let http = core::voice_list_request(&self.config, voice_type)?;
        self.call(Endpoint::VoiceList, &http).await
    }

    pub async fn voice_slots(&self) -> Result<Vec<VoiceSlot>> {
        Ok(self.get_voice(VoiceType::All).await?.voice_slots.unwrap_or_default())
    }

    pub async fn system_voices(&self) -> Result<Vec<SystemVoiceInfo>> {
        Ok(self
            .get_voice(VoiceType::System)
            .await?
            .system_voice
            .unwrap_or_default())
    }

    pub async fn cloned_voices(&self) -> Result<Vec<ClonedVoice>> {
        Ok(self
            .get_voice(VoiceType::VoiceCloning)
            .await?
            .voice_cloning
            .unwrap_or_default())
    }

    pub async fn generated_voices(&self) -> Result<Vec<GeneratedVoice>> {
        Ok(self
            .get_voice(VoiceType::VoiceGeneration)
            .await?
            .voice_generation
            .unwrap_or_default())
    }

    pub async fn music_voices(&self) -> Result<Vec<MusicVoice>> {
        Ok(self
            .get_voice(VoiceType::MusicGeneration)
            .await?
            .music_generation
            .unwrap_or_default())
    }

    pub async fn file_upload(
        &self,
        path: impl AsRef<Path>,
        purpose: &str,
    ) -> Result<FileUploadResult> {
        let path = path.as_ref();
        let filename = core::upload_file_name(path)?;
        let data = tokio::fs::read(path).await?;
        self.file_upload_bytes(data, &filename, purpose).await
    }

    pub async fn file_upload_bytes(
        &self,
        data: impl Into<Bytes>,
        filename: &str,
        purpose: &str,
    ) -> Result<FileUploadResult> {
        let http = core::upload_request(&self.config, data.into(), filename, purpose)?;
        let response: FileUploadResponse = self.call(Endpoint::FileUpload, &http).await?;
        Ok(response.file)
    }

    pub async fn voice_clone(&self, request: &VoiceCloneRequest) -> Result<VoiceCloneResponse> {
        let http = core::json_request(&self.config, Endpoint::VoiceClone, request)?;
        self.call(Endpoint::VoiceClone, &http).await
    }

    pub async fn voice_clone_simple(
        &self,
        file_id: FileId,
        voice_id: &str,
        options: &CloneOptions,
    ) -> Result<VoiceCloneResponse> {
        let request = options.to_request(file_id, voice_id)?;
        self.voice_clone(&request).await
    }

    pub async fn voice_delete(
        &self,
        voice_id: &str,
        voice_type: DeleteVoiceType,
    ) -> Result<VoiceDeleteResponse> {
        let http = core::delete_request(&self.config, voice_id, voice_type)?;
        self.call(Endpoint::VoiceDelete, &http).await
    }
}
