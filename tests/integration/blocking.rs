//! Blocking client over `reqwest::blocking` against a mock server.

use crate::common::{envelope_error, t2a_ok, UPLOAD_OK, VOICE_LIST};
use crate::integration::mock_server::{MockServerFixture, API_KEY};
use minimax_speech::error_code::ServiceStatusCode;
use minimax_speech::prelude::*;
use mockito::Matcher;
use serde_json::json;

#[test]
fn t2a_sends_json_and_decodes_audio() {
    let mut fixture = MockServerFixture::new_blocking();
    let mock = fixture
        .authed_post("/v1/t2a_v2")
        .match_header("content-type", "application/json")
        .match_header("authority", "127.0.0.1")
        .match_body(Matcher::PartialJson(json!({
            "model": "speech-02-hd",
            "text": "hello",
            "stream": false,
            "voice_setting": {"voice_id": "Wise_Woman", "speed": 1.0},
            "audio_setting": {"format": "mp3", "sample_rate": 32000}
        })));
    let mock = MockServerFixture::json_response(mock, 200, &t2a_ok("68656c6c6f"))
        .expect(1)
        .create();

    let client = MiniMaxSpeech::new(fixture.config(0)).unwrap();
    let audio = client
        .text_to_speech_simple("hello", &SpeechOptions::new())
        .unwrap();

    assert_eq!(audio.audio, b"hello");
    mock.assert();
}

#[test]
fn server_errors_are_retried_then_reported() {
    let mut fixture = MockServerFixture::new_blocking();
    let mock = fixture.authed_post("/v1/t2a_v2");
    let mock = MockServerFixture::json_response(mock, 503, r#"{"error":"overloaded"}"#)
        .expect(3)
        .create();

    let client = MiniMaxSpeech::new(fixture.config(2)).unwrap();
    let err = client
        .text_to_speech_simple("hello", &SpeechOptions::new())
        .unwrap_err();

    match err {
        Error::Api {
            http_status,
            attempts,
            ..
        } => {
            assert_eq!(http_status, Some(503));
            assert_eq!(attempts, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    mock.assert();
}

#[test]
fn unauthorized_is_not_retried() {
    let mut fixture = MockServerFixture::new_blocking();
    let mock = fixture.authed_post("/v1/t2a_v2");
    let mock = MockServerFixture::json_response(mock, 401, r#"{"error":"unauthorized"}"#)
        .expect(1)
        .create();

    let client = MiniMaxSpeech::new(fixture.config(3)).unwrap();
    let err = client
        .text_to_speech_simple("hello", &SpeechOptions::new())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.attempts(), 1);
    mock.assert();
}

#[test]
fn envelope_rejection_carries_service_code() {
    let mut fixture = MockServerFixture::new_blocking();
    let mock = fixture.authed_post("/v1/t2a_v2");
    let mock = MockServerFixture::json_response(mock, 200, &envelope_error(1004, "invalid api key"))
        .expect(1)
        .create();

    let client = MiniMaxSpeech::new(fixture.config(3)).unwrap();
    let err = client
        .text_to_speech_simple("hello", &SpeechOptions::new())
        .unwrap_err();

    assert_eq!(err.service_code(), Some(ServiceStatusCode::AuthenticationFailed));
    mock.assert();
}

#[test]
fn voice_listing_posts_form_without_group_id() {
    let mut fixture = MockServerFixture::new_blocking();
    let mock = fixture
        .server
        .mock("POST", "/v1/get_voice")
        .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
        .match_query(Matcher::Missing)
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::UrlEncoded("voice_type".into(), "all".into()));
    let mock = MockServerFixture::json_response(mock, 200, VOICE_LIST)
        .expect(1)
        .create();

    let client = MiniMaxSpeech::new(fixture.config(0)).unwrap();
    let listing = client.get_voice(VoiceType::All).unwrap();

    assert_eq!(listing.system_voice.as_ref().map(Vec::len), Some(2));
    assert!(listing.find("MyVoice001").is_some());
    mock.assert();
}

#[test]
fn upload_sends_multipart_file() {
    let mut fixture = MockServerFixture::new_blocking();
    let mock = fixture
        .authed_post("/v1/files/upload")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".into()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="purpose"\s+voice_clone"#.into()),
            Matcher::Regex(r#"name="file"; filename="sample.mp3""#.into()),
            Matcher::Regex("ID3aa".into()),
        ]));
    let mock = MockServerFixture::json_response(mock, 200, UPLOAD_OK)
        .expect(1)
        .create();

    let dir = std::env::temp_dir().join(format!("minimax-upload-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("sample.mp3");
    std::fs::write(&path, b"ID3aa").unwrap();

    let client = MiniMaxSpeech::new(fixture.config(0)).unwrap();
    let uploaded = client.file_upload(&path, "voice_clone").unwrap();

    assert_eq!(uploaded.file_id, FileId::new(987654321));
    assert_eq!(uploaded.purpose, "voice_clone");
    mock.assert();
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn clone_and_delete_hit_their_endpoints() {
    let mut fixture = MockServerFixture::new_blocking();
    let clone = fixture
        .authed_post("/v1/voice_clone")
        .match_body(Matcher::PartialJson(json!({
            "file_id": 987654321,
            "voice_id": "MyVoice001",
            "accuracy": 0.7
        })));
    let clone = MockServerFixture::json_response(
        clone,
        200,
        r#"{"input_sensitive":false,"base_resp":{"status_code":0,"status_msg":"success"}}"#,
    )
    .expect(1)
    .create();
    let delete = fixture
        .authed_post("/v1/delete_voice")
        .match_body(Matcher::PartialJson(json!({
            "voice_type": "voice_cloning",
            "voice_id": "MyVoice001"
        })));
    let delete = MockServerFixture::json_response(
        delete,
        200,
        r#"{"voice_id":"MyVoice001","created_time":"2025-06-01","base_resp":{"status_code":0,"status_msg":"success"}}"#,
    )
    .expect(1)
    .create();

    let client = MiniMaxSpeech::new(fixture.config(0)).unwrap();
    let cloned = client
        .voice_clone_simple(FileId::new(987654321), "MyVoice001", &CloneOptions::new())
        .unwrap();
    assert!(!cloned.input_sensitive);
    client
        .voice_delete("MyVoice001", DeleteVoiceType::VoiceCloning)
        .unwrap();

    clone.assert();
    delete.assert();
}

#[test]
fn unreachable_service_is_a_transport_error() {
    let config = ClientConfig::builder()
        .api_key(API_KEY)
        .group_id("group-1")
        .base_url("http://127.0.0.1:9/v1")
        .retry_policy(
            RetryPolicy::default()
                .with_max_retries(1)
                .with_delay(std::time::Duration::ZERO),
        )
        .build()
        .unwrap();
    let client = MiniMaxSpeech::new(config).unwrap();

    let err = client.get_voice(VoiceType::All).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Transport | ErrorKind::Timeout));
    assert_eq!(err.attempts(), 2);
}
