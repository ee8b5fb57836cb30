//! Client behaviour against a scripted in-process transport: validation,
//! retry counts, error mapping and batch semantics.

mod common;

use common::{config, envelope_error, t2a_ok, MockTransport, Step, UPLOAD_OK, VOICE_LIST};
use minimax_speech::error_code::ServiceStatusCode;
use minimax_speech::prelude::*;
use minimax_speech::transport::RequestBody;
use minimax_speech::types::VoiceCategory;
use std::time::Duration;

fn request(text: &str) -> T2ARequest {
    SpeechOptions::new().to_request(text).unwrap()
}

// ---------- blocking client ----------

#[test]
fn validation_errors_never_reach_the_transport() {
    let transport = MockTransport::always(Step::ok(t2a_ok("00")));
    let client = MiniMaxSpeech::with_transport(config(3), transport.clone());

    let err = client
        .text_to_speech_simple("hello", &SpeechOptions::new().speed(2.5))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.field(), Some("voice_setting.speed"));

    let err = client
        .text_to_speech_simple("hello", &SpeechOptions::new().pitch(-13))
        .unwrap_err();
    assert_eq!(err.field(), Some("voice_setting.pitch"));

    let err = client
        .voice_clone_simple(FileId::new(1), "ab1", &CloneOptions::new())
        .unwrap_err();
    assert_eq!(err.field(), Some("voice_id"));

    assert!(client.voice_delete("", DeleteVoiceType::VoiceCloning).is_err());
    assert!(client.file_upload_bytes(Vec::new(), "a.mp3", "voice_clone").is_err());

    let err = client
        .file_upload("/definitely/not/here.mp3", "voice_clone")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);

    assert_eq!(transport.calls(), 0);
}

#[test]
fn server_errors_are_retried_until_success() {
    let transport = MockTransport::scripted(vec![
        Step::Respond(500, "oops".into()),
        Step::Respond(502, "bad gateway".into()),
        Step::ok(t2a_ok("68656c6c6f")),
    ]);
    let client = MiniMaxSpeech::with_transport(config(3), transport.clone());

    let resp = client.text_to_speech(&request("hello")).unwrap();
    assert_eq!(resp.audio_bytes().unwrap(), b"hello");
    assert_eq!(transport.calls(), 3);
}

#[test]
fn timeouts_exhaust_all_attempts() {
    let transport = MockTransport::always(Step::Timeout);
    let client = MiniMaxSpeech::with_transport(config(3), transport.clone());

    let err = client.text_to_speech(&request("hello")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(err.attempts(), 4);
    assert!(err.is_exhausted());
    assert_eq!(transport.calls(), 4);
}

#[test]
fn connection_failures_surface_as_transport_errors() {
    let transport = MockTransport::always(Step::Connect);
    let client = MiniMaxSpeech::with_transport(config(2), transport.clone());

    let err = client.get_voice(VoiceType::All).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.attempts(), 3);
    assert_eq!(transport.calls(), 3);
}

#[test]
fn persistent_server_errors_surface_as_api_errors() {
    let transport = MockTransport::always(Step::Respond(503, "unavailable".into()));
    let client = MiniMaxSpeech::with_transport(config(3), transport.clone());

    match client.text_to_speech(&request("hello")).unwrap_err() {
        Error::Api {
            http_status,
            attempts,
            ..
        } => {
            assert_eq!(http_status, Some(503));
            assert_eq!(attempts, 4);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(transport.calls(), 4);
}

#[test]
fn client_errors_are_not_retried() {
    let transport = MockTransport::always(Step::Respond(400, "bad request".into()));
    let client = MiniMaxSpeech::with_transport(config(3), transport.clone());

    let err = client.text_to_speech(&request("hello")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.attempts(), 1);
    assert!(!err.is_exhausted());
    assert_eq!(transport.calls(), 1);
}

#[test]
fn service_rejections_are_not_retried() {
    let transport = MockTransport::always(Step::ok(envelope_error(1002, "rate limit")));
    let client = MiniMaxSpeech::with_transport(config(3), transport.clone());

    let err = client.text_to_speech(&request("hello")).unwrap_err();
    assert_eq!(err.service_code(), Some(ServiceStatusCode::RateLimited));
    assert!(err.to_string().contains("rate limit"));
    assert_eq!(transport.calls(), 1);
}

#[test]
fn retry_after_server_error_then_rejection_counts_attempts() {
    let transport = MockTransport::scripted(vec![
        Step::Respond(500, "oops".into()),
        Step::ok(envelope_error(2013, "invalid params")),
    ]);
    let client = MiniMaxSpeech::with_transport(config(3), transport.clone());

    let err = client.text_to_speech(&request("hello")).unwrap_err();
    assert_eq!(err.service_code(), Some(ServiceStatusCode::InvalidInput));
    assert_eq!(err.attempts(), 2);
    assert!(!err.is_exhausted());
    assert_eq!(transport.calls(), 2);
}

#[test]
fn unbuildable_request_is_attempted_once() {
    let transport = MockTransport::always(Step::Unbuildable);
    let client = MiniMaxSpeech::with_transport(config(3), transport.clone());

    let err = client.text_to_speech(&request("hello")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(!err.is_exhausted());
    assert_eq!(transport.calls(), 1);
}

#[test]
fn api_key_with_control_characters_is_rejected_up_front() {
    let err = ClientConfig::builder()
        .api_key("bad\nkey")
        .group_id("group-1")
        .max_retries(3)
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(err.field(), Some("api_key"));
}

#[test]
fn requests_carry_credentials_and_wire_shape() {
    let transport = MockTransport::always(Step::ok(t2a_ok("00")));
    let client = MiniMaxSpeech::with_transport(config(0), transport.clone());

    client.text_to_speech(&request("hello")).unwrap();
    let sent = transport.last_request().unwrap();
    assert_eq!(sent.header("Authorization"), Some("Bearer test-key"));
    assert_eq!(sent.query("GroupId").as_deref(), Some("group-1"));
    assert_eq!(sent.url.path(), "/v1/t2a_v2");

    let body = sent.body.as_json().unwrap();
    assert_eq!(body["text"], "hello");
    assert_eq!(body["stream"], false);
    assert_eq!(body["output_format"], "hex");
    assert_eq!(body["voice_setting"]["voice_id"], "Wise_Woman");
    assert_eq!(body["audio_setting"]["sample_rate"], 32000);
    assert!(body.get("language_boost").is_none());
}

#[test]
fn simple_call_decodes_hex_audio() {
    let transport = MockTransport::always(Step::ok(t2a_ok("68656c6c6f")));
    let client = MiniMaxSpeech::with_transport(config(0), transport);

    let audio = client
        .text_to_speech_simple("hello", &SpeechOptions::new())
        .unwrap();
    assert_eq!(audio.audio, b"hello");
    assert_eq!(audio.format, AudioFormat::Mp3);
    assert_eq!(audio.duration, Some(Duration::from_millis(1200)));
    assert_eq!(audio.trace_id.as_deref(), Some("trace-123"));
}

#[test]
fn missing_audio_is_a_decode_error() {
    let body = r#"{"data":null,"base_resp":{"status_code":0,"status_msg":"success"}}"#;
    let transport = MockTransport::always(Step::ok(body));
    let client = MiniMaxSpeech::with_transport(config(0), transport);

    let err = client
        .text_to_speech_simple("hello", &SpeechOptions::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn batch_isolates_failures_and_keeps_order() {
    let transport = MockTransport::from_fn(|_, req| {
        let text = req.body.as_json().unwrap()["text"].as_str().unwrap().to_string();
        if text == "second" {
            Step::Respond(400, "rejected".into())
        } else {
            Step::ok(t2a_ok(&hex::encode(&text)))
        }
    });
    let client = MiniMaxSpeech::with_transport(config(3), transport.clone());

    let requests = vec![request("first"), request("second"), request("third")];
    let results = client.batch_text_to_speech(&requests, 1);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().audio_bytes().unwrap(), b"first");
    assert_eq!(results[1].as_ref().unwrap_err().kind(), ErrorKind::Api);
    assert_eq!(results[2].as_ref().unwrap().audio_bytes().unwrap(), b"third");
    assert_eq!(transport.calls(), 3);
    assert_eq!(transport.max_in_flight(), 1);
}

#[test]
fn blocking_batch_respects_concurrency_limit() {
    let transport = MockTransport::slow(Duration::from_millis(20), |_, _| Step::ok(t2a_ok("00")));
    let client = MiniMaxSpeech::with_transport(config(0), transport.clone());

    let requests: Vec<_> = (0..8).map(|i| request(&format!("line {i}"))).collect();
    let results = client.batch_text_to_speech(&requests, 3);

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(transport.calls(), 8);
    assert!(transport.max_in_flight() <= 3);
}

#[test]
fn empty_batch_makes_no_calls() {
    let transport = MockTransport::always(Step::ok(t2a_ok("00")));
    let client = MiniMaxSpeech::with_transport(config(0), transport.clone());
    assert!(client.batch_text_to_speech(&[], 4).is_empty());
    assert_eq!(transport.calls(), 0);
}

#[test]
fn voice_listing_uses_form_body_without_group_id() {
    let transport = MockTransport::always(Step::ok(VOICE_LIST));
    let client = MiniMaxSpeech::with_transport(config(0), transport.clone());

    let listing = client.get_voice(VoiceType::System).unwrap();
    let sent = transport.last_request().unwrap();
    assert_eq!(sent.body.field("voice_type"), Some("system"));
    assert_eq!(sent.query("GroupId"), None);

    let voices = listing.voices();
    assert_eq!(voices.len(), 3);
    assert_eq!(voices[2].category, VoiceCategory::Cloned);

    let system = client.system_voices().unwrap();
    assert_eq!(system[0].voice_id, "Wise_Woman");
    assert!(client.music_voices().unwrap().is_empty());
}

#[test]
fn upload_sends_multipart_body() {
    let transport = MockTransport::always(Step::ok(UPLOAD_OK));
    let client = MiniMaxSpeech::with_transport(config(0), transport.clone());

    let uploaded = client
        .file_upload_bytes(b"ID3aa".to_vec(), "sample.mp3", "voice_clone")
        .unwrap();
    assert_eq!(uploaded.file_id, FileId::new(987654321));

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.url.path(), "/v1/files/upload");
    match sent.body {
        RequestBody::Multipart { fields, file } => {
            assert_eq!(fields, vec![("purpose".to_string(), "voice_clone".to_string())]);
            assert_eq!(file.filename, "sample.mp3");
            assert_eq!(&file.data[..], b"ID3aa");
        }
        other => panic!("unexpected body {other:?}"),
    }
}

#[test]
fn upload_retries_resend_the_same_file() {
    let transport = MockTransport::scripted(vec![Step::Connect, Step::ok(UPLOAD_OK)]);
    let client = MiniMaxSpeech::with_transport(config(3), transport.clone());

    client
        .file_upload_bytes(b"ID3aa".to_vec(), "sample.mp3", "voice_clone")
        .unwrap();
    assert_eq!(transport.calls(), 2);
    match transport.last_request().unwrap().body {
        RequestBody::Multipart { file, .. } => assert_eq!(&file.data[..], b"ID3aa"),
        other => panic!("unexpected body {other:?}"),
    }
}

#[test]
fn clone_and_delete_round_trip() {
    let transport = MockTransport::from_fn(|_, req| {
        if req.url.path().ends_with("voice_clone") {
            Step::ok(r#"{"input_sensitive":false,"demo_audio":"https://cdn/x.mp3","base_resp":{"status_code":0,"status_msg":"success"}}"#)
        } else {
            Step::ok(r#"{"voice_id":"MyVoice001","created_time":"2025-06-01","base_resp":{"status_code":0,"status_msg":"success"}}"#)
        }
    });
    let client = MiniMaxSpeech::with_transport(config(0), transport.clone());

    let options = CloneOptions::new().preview("hi there", Model::Speech02Hd);
    let cloned = client
        .voice_clone_simple(FileId::new(42), "MyVoice001", &options)
        .unwrap();
    assert_eq!(cloned.demo_audio.as_deref(), Some("https://cdn/x.mp3"));
    let body = transport.last_request().unwrap().body.as_json().cloned().unwrap();
    assert_eq!(body["file_id"], 42);
    assert_eq!(body["text"], "hi there");

    let deleted = client
        .voice_delete("MyVoice001", DeleteVoiceType::VoiceCloning)
        .unwrap();
    assert_eq!(deleted.voice_id, "MyVoice001");
    assert_eq!(transport.calls(), 2);
}

#[test]
fn existing_voice_id_is_reported() {
    let transport = MockTransport::always(Step::ok(envelope_error(2039, "voice id duplicate")));
    let client = MiniMaxSpeech::with_transport(config(3), transport.clone());

    let err = client
        .voice_clone_simple(FileId::new(42), "MyVoice001", &CloneOptions::new())
        .unwrap_err();
    assert_eq!(err.service_code(), Some(ServiceStatusCode::VoiceIdExists));
    assert_eq!(transport.calls(), 1);
}

// ---------- async client ----------

#[tokio::test]
async fn async_validation_errors_never_reach_the_transport() {
    let transport = MockTransport::always(Step::ok(t2a_ok("00")));
    let client = AsyncMiniMaxSpeech::with_transport(config(3), transport.clone());

    let err = client
        .text_to_speech_simple("hello", &SpeechOptions::new().volume(0.0))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn async_server_errors_are_retried_until_success() {
    let transport = MockTransport::scripted(vec![
        Step::Respond(500, "oops".into()),
        Step::ok(t2a_ok("68656c6c6f")),
    ]);
    let client = AsyncMiniMaxSpeech::with_transport(config(3), transport.clone());

    let resp = client.text_to_speech(&request("hello")).await.unwrap();
    assert_eq!(resp.audio_bytes().unwrap(), b"hello");
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn async_timeouts_exhaust_all_attempts() {
    let transport = MockTransport::always(Step::Timeout);
    let client = AsyncMiniMaxSpeech::with_transport(config(3), transport.clone());

    let err = client.text_to_speech(&request("hello")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(err.attempts(), 4);
    assert_eq!(transport.calls(), 4);
}

#[tokio::test]
async fn async_slow_transport_hits_client_timeout() {
    let transport = MockTransport::slow(Duration::from_millis(500), |_, _| Step::ok(t2a_ok("00")));
    let cfg = ClientConfig::builder()
        .api_key("test-key")
        .group_id("group-1")
        .timeout(Duration::from_millis(30))
        .retry_policy(RetryPolicy::default().with_max_retries(1).with_delay(Duration::ZERO))
        .build()
        .unwrap();
    let client = AsyncMiniMaxSpeech::with_transport(cfg, transport.clone());

    let err = client.text_to_speech(&request("hello")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(err.attempts(), 2);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn async_client_errors_are_not_retried() {
    let transport = MockTransport::always(Step::Respond(401, "unauthorized".into()));
    let client = AsyncMiniMaxSpeech::with_transport(config(3), transport.clone());

    let err = client.get_voice(VoiceType::All).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn async_batch_isolates_failures_and_keeps_order() {
    let transport = MockTransport::from_fn(|_, req| {
        let text = req.body.as_json().unwrap()["text"].as_str().unwrap().to_string();
        if text == "second" {
            Step::ok(envelope_error(1042, "illegal characters"))
        } else {
            Step::ok(t2a_ok(&hex::encode(&text)))
        }
    });
    let client = AsyncMiniMaxSpeech::with_transport(config(3), transport.clone());

    let requests = vec![request("first"), request("second"), request("third")];
    let results = client.batch_text_to_speech(&requests, 1).await;

    assert_eq!(results[0].as_ref().unwrap().audio_bytes().unwrap(), b"first");
    assert_eq!(
        results[1].as_ref().unwrap_err().service_code(),
        Some(ServiceStatusCode::IllegalCharacters)
    );
    assert_eq!(results[2].as_ref().unwrap().audio_bytes().unwrap(), b"third");
    assert_eq!(transport.calls(), 3);
}

#[tokio::test]
async fn async_batch_never_exceeds_the_admission_limit() {
    let transport = MockTransport::slow(Duration::from_millis(15), |_, req| {
        let text = req.body.as_json().unwrap()["text"].as_str().unwrap().to_string();
        Step::ok(t2a_ok(&hex::encode(&text)))
    });
    let client = AsyncMiniMaxSpeech::with_transport(config(0), transport.clone());

    let texts: Vec<String> = (0..10).map(|i| format!("item-{i}")).collect();
    let requests: Vec<_> = texts.iter().map(|t| request(t)).collect();
    let results = client.batch_text_to_speech(&requests, 3).await;

    assert_eq!(transport.calls(), 10);
    assert!(transport.max_in_flight() <= 3);
    assert!(transport.max_in_flight() >= 2);
    for (text, result) in texts.iter().zip(&results) {
        assert_eq!(result.as_ref().unwrap().audio_bytes().unwrap(), text.as_bytes());
    }
}

#[tokio::test]
async fn async_clone_shares_the_transport() {
    let transport = MockTransport::always(Step::ok(UPLOAD_OK));
    let client = AsyncMiniMaxSpeech::with_transport(config(0), transport.clone());
    let other = client.clone();

    client
        .file_upload_bytes(b"abc".to_vec(), "a.wav", "voice_clone")
        .await
        .unwrap();
    other
        .file_upload_bytes(b"abc".to_vec(), "a.wav", "voice_clone")
        .await
        .unwrap();
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn async_unbuildable_request_is_attempted_once() {
    let transport = MockTransport::always(Step::Unbuildable);
    let client = AsyncMiniMaxSpeech::with_transport(config(3), transport.clone());

    let err = client.get_voice(VoiceType::All).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn async_batch_accepts_an_unbounded_limit() {
    let transport = MockTransport::always(Step::ok(t2a_ok("00")));
    let client = AsyncMiniMaxSpeech::with_transport(config(0), transport.clone());

    let requests: Vec<_> = (0..4).map(|i| request(&format!("line {i}"))).collect();
    let results = client.batch_text_to_speech(&requests, usize::MAX).await;

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(transport.calls(), 4);
    assert!(client.batch_text_to_speech(&[], usize::MAX).await.is_empty());
}

#[test]
fn blocking_batch_accepts_an_unbounded_limit() {
    let transport = MockTransport::always(Step::ok(t2a_ok("00")));
    let client = MiniMaxSpeech::with_transport(config(0), transport.clone());

    let requests: Vec<_> = (0..4).map(|i| request(&format!("line {i}"))).collect();
    let results = client.batch_text_to_speech(&requests, usize::MAX);

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(transport.calls(), 4);
}
