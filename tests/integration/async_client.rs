//! Async client over the pooled reqwest transport against a mock server.

use crate::common::{t2a_ok, UPLOAD_OK, VOICE_LIST};
use crate::integration::mock_server::MockServerFixture;
use minimax_speech::prelude::*;
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn t2a_round_trip() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .authed_post("/v1/t2a_v2")
        .match_body(Matcher::PartialJson(json!({
            "text": "bonjour",
            "language_boost": "French",
            "audio_setting": {"format": "pcm", "sample_rate": 16000, "channel": 1}
        })));
    let mock = MockServerFixture::json_response(mock, 200, &t2a_ok("00010203"))
        .expect(1)
        .create_async()
        .await;

    let client = AsyncMiniMaxSpeech::new(fixture.config(0)).unwrap();
    let options = SpeechOptions::new()
        .format(AudioFormat::Pcm)
        .sample_rate(SampleRate::Hz16000)
        .language_boost(Language::French);
    let audio = client.text_to_speech_simple("bonjour", &options).await.unwrap();

    assert_eq!(audio.audio, vec![0, 1, 2, 3]);
    assert_eq!(audio.to_wav().unwrap().len(), 44 + 4);
    mock.assert_async().await;
}

#[tokio::test]
async fn server_errors_are_retried_then_reported() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.authed_post("/v1/t2a_v2");
    let mock = MockServerFixture::json_response(mock, 500, r#"{"error":"boom"}"#)
        .expect(4)
        .create_async()
        .await;

    let client = AsyncMiniMaxSpeech::new(fixture.config(3)).unwrap();
    let err = client
        .text_to_speech_simple("hello", &SpeechOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.attempts(), 4);
    assert!(err.service_code().is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn batch_over_http_keeps_order() {
    let mut fixture = MockServerFixture::new().await;
    let first = fixture
        .authed_post("/v1/t2a_v2")
        .match_body(Matcher::PartialJson(json!({"text": "one"})));
    let first = MockServerFixture::json_response(first, 200, &t2a_ok("6f6e65"))
        .create_async()
        .await;
    let second = fixture
        .authed_post("/v1/t2a_v2")
        .match_body(Matcher::PartialJson(json!({"text": "two"})));
    let second = MockServerFixture::json_response(second, 400, r#"{"error":"bad"}"#)
        .create_async()
        .await;
    let third = fixture
        .authed_post("/v1/t2a_v2")
        .match_body(Matcher::PartialJson(json!({"text": "three"})));
    let third = MockServerFixture::json_response(third, 200, &t2a_ok("7468726565"))
        .create_async()
        .await;

    let client = AsyncMiniMaxSpeech::new(fixture.config(0)).unwrap();
    let options = SpeechOptions::new();
    let requests: Vec<_> = ["one", "two", "three"]
        .iter()
        .map(|t| options.to_request(*t).unwrap())
        .collect();
    let results = client.batch_text_to_speech(&requests, 2).await;

    assert_eq!(results[0].as_ref().unwrap().audio_bytes().unwrap(), b"one");
    assert_eq!(results[1].as_ref().unwrap_err().kind(), ErrorKind::Api);
    assert_eq!(results[2].as_ref().unwrap().audio_bytes().unwrap(), b"three");
    first.assert_async().await;
    second.assert_async().await;
    third.assert_async().await;
}

#[tokio::test]
async fn voice_helpers_pick_their_category() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/v1/get_voice")
        .match_body(Matcher::UrlEncoded("voice_type".into(), "voice_cloning".into()));
    let mock = MockServerFixture::json_response(mock, 200, VOICE_LIST)
        .expect(1)
        .create_async()
        .await;

    let client = AsyncMiniMaxSpeech::new(fixture.config(0)).unwrap();
    let cloned = client.cloned_voices().await.unwrap();

    assert_eq!(cloned.len(), 1);
    assert_eq!(cloned[0].voice_id, "MyVoice001");
    mock.assert_async().await;
}

#[tokio::test]
async fn upload_from_bytes() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .authed_post("/v1/files/upload")
        .match_body(Matcher::Regex(r#"filename="sample.wav""#.into()));
    let mock = MockServerFixture::json_response(mock, 200, UPLOAD_OK)
        .expect(1)
        .create_async()
        .await;

    let client = AsyncMiniMaxSpeech::new(fixture.config(0)).unwrap();
    let uploaded = client
        .file_upload_bytes(b"RIFF".to_vec(), "sample.wav", "voice_clone")
        .await
        .unwrap();

    assert_eq!(uploaded.file_id.get(), 987654321);
    mock.assert_async().await;
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.authed_post("/v1/t2a_v2");
    let mock = MockServerFixture::json_response(mock, 200, "<html>gateway</html>")
        .expect(1)
        .create_async()
        .await;

    let client = AsyncMiniMaxSpeech::new(fixture.config(3)).unwrap();
    let err = client
        .text_to_speech_simple("hello", &SpeechOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    mock.assert_async().await;
}
