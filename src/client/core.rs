//! 客户端共享核心：请求构造与响应映射（无副作用）。
//!
//! Side-effect-free logic shared by the blocking and async clients: building
//! [`HttpRequest`]s from typed requests and mapping one attempt's outcome to a
//! typed value or an [`AttemptFailure`].

use crate::config::{ClientConfig, Endpoint};
use crate::transport::{FilePart, HttpRequest, HttpResponse, RequestBody, TransportError};
use crate::types::{BaseResp, DeleteVoiceType, VoiceDeleteRequest, VoiceType};
use crate::{Error, Result};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use super::policy::AttemptFailure;

const DEFAULT_AUTHORITY: &str = "api.minimax.io";
// Longest slice of an error body carried into error messages.
const MAX_ERROR_BODY: usize = 512;

fn headers(config: &ClientConfig) -> Vec<(String, String)> {
    let authority = config.base_url().host_str().unwrap_or(DEFAULT_AUTHORITY);
    vec![
        (
            "Authorization".to_string(),
            format!("Bearer {}", config.api_key()),
        ),
        ("authority".to_string(), authority.to_string()),
    ]
}

pub(crate) fn json_request<B: Serialize>(
    config: &ClientConfig,
    endpoint: Endpoint,
    body: &B,
) -> Result<HttpRequest> {
    let body = serde_json::to_value(body)
        .map_err(|e| Error::runtime(format!("failed to encode {} request: {}", endpoint, e)))?;
    Ok(HttpRequest {
        url: config.endpoint_url(endpoint)?,
        headers: headers(config),
        body: RequestBody::Json(body),
    })
}

pub(crate) fn voice_list_request(
    config: &ClientConfig,
    voice_type: VoiceType,
) -> Result<HttpRequest> {
    Ok(HttpRequest {
        url: config.endpoint_url(Endpoint::VoiceList)?,
        headers: headers(config),
        body: RequestBody::Form(vec![(
            "voice_type".to_string(),
            voice_type.as_str().to_string(),
        )]),
    })
}

pub(crate) fn upload_request(
    config: &ClientConfig,
    data: Bytes,
    filename: &str,
    purpose: &str,
) -> Result<HttpRequest> {
    if filename.trim().is_empty() {
        return Err(Error::validation("filename", "filename must not be empty", "non-empty string"));
    }
    if purpose.trim().is_empty() {
        return Err(Error::validation("purpose", "purpose must not be empty", "e.g. voice_clone"));
    }
    if data.is_empty() {
        return Err(Error::validation("file", "file is empty", "non-empty audio file"));
    }
    Ok(HttpRequest {
        url: config.endpoint_url(Endpoint::FileUpload)?,
        headers: headers(config),
        body: RequestBody::Multipart {
            fields: vec![("purpose".to_string(), purpose.to_string())],
            file: FilePart {
                field: "file".to_string(),
                filename: filename.to_string(),
                mime_type: mime_for(filename).to_string(),
                data,
            },
        },
    })
}

pub(crate) fn delete_request(
    config: &ClientConfig,
    voice_id: &str,
    voice_type: DeleteVoiceType,
) -> Result<HttpRequest> {
    if voice_id.trim().is_empty() {
        return Err(Error::validation("voice_id", "voice_id must not be empty", "non-empty string"));
    }
    json_request(
        config,
        Endpoint::VoiceDelete,
        &VoiceDeleteRequest {
            voice_id: voice_id.to_string(),
            voice_type,
        },
    )
}

/// File name component of `path`, used as the multipart file name.
pub(crate) fn upload_file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::validation(
                "file",
                format!("'{}' has no usable file name", path.display()),
                "path to an audio file",
            )
        })
}

fn mime_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "pcm" => "audio/pcm",
        _ => "application/octet-stream",
    }
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Map the outcome of one attempt.
///
/// The envelope is checked before the typed decode: rejection bodies often
/// lack the fields a success payload requires.
pub(crate) fn map_response<R: DeserializeOwned>(
    outcome: std::result::Result<HttpResponse, TransportError>,
) -> std::result::Result<R, AttemptFailure> {
    let response = outcome.map_err(|e| match e {
        TransportError::Request(message) => AttemptFailure::Final(Error::configuration(format!(
            "request could not be built: {}",
            message
        ))),
        other => AttemptFailure::Transport(other),
    })?;

    if response.is_server_error() {
        return Err(AttemptFailure::Server {
            http_status: response.status,
            message: truncate(&response.text()),
        });
    }
    if !response.is_success() {
        return Err(AttemptFailure::Final(Error::Api {
            status_code: i64::from(response.status),
            message: format!("HTTP {}: {}", response.status, truncate(&response.text())),
            http_status: Some(response.status),
            attempts: 1,
        }));
    }

    let value: serde_json::Value = serde_json::from_slice(&response.body)
        .map_err(|e| {
            AttemptFailure::Final(Error::decode(format!("invalid JSON response: {}", e)))
        })?;

    let base_resp = value
        .get("base_resp")
        .cloned()
        .ok_or_else(|| AttemptFailure::Final(Error::decode("response has no base_resp envelope")))
        .and_then(|v| {
            serde_json::from_value::<BaseResp>(v).map_err(|e| {
                AttemptFailure::Final(Error::decode(format!("invalid base_resp: {}", e)))
            })
        })?;
    if !base_resp.is_success() {
        return Err(AttemptFailure::Final(Error::Api {
            status_code: base_resp.status_code,
            message: base_resp.describe(),
            http_status: None,
            attempts: 1,
        }));
    }

    serde_json::from_value(value).map_err(|e| {
        AttemptFailure::Final(Error::decode(format!("unexpected response shape: {}", e)))
    })
}
