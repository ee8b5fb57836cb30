//! Shared fixtures: a scriptable transport that counts calls.

#![allow(dead_code)]

use async_trait::async_trait;
use minimax_speech::transport::{
    AsyncTransport, HttpRequest, HttpResponse, Transport, TransportError,
};
use minimax_speech::{ClientConfig, RetryPolicy};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Outcome of one mocked attempt.
#[derive(Debug, Clone)]
pub enum Step {
    Respond(u16, String),
    Timeout,
    Connect,
    /// The transport could not assemble the request.
    Unbuildable,
}

impl Step {
    pub fn ok(body: impl Into<String>) -> Self {
        Step::Respond(200, body.into())
    }

    fn into_result(self) -> Result<HttpResponse, TransportError> {
        match self {
            Step::Respond(status, body) => Ok(HttpResponse::new(status, body)),
            Step::Timeout => Err(TransportError::Timeout),
            Step::Connect => Err(TransportError::Connect("connection refused".into())),
            Step::Unbuildable => Err(TransportError::Request(
                "builder error: failed to parse header value".into(),
            )),
        }
    }
}

type Responder = Box<dyn Fn(usize, &HttpRequest) -> Step + Send + Sync>;

pub struct MockTransport {
    responder: Responder,
    delay: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Replay `steps` in order, repeating the last one once exhausted.
    pub fn scripted(steps: Vec<Step>) -> Arc<Self> {
        assert!(!steps.is_empty());
        Self::from_fn(move |call, _| steps[call.min(steps.len() - 1)].clone())
    }

    pub fn always(step: Step) -> Arc<Self> {
        Self::scripted(vec![step])
    }

    pub fn from_fn(f: impl Fn(usize, &HttpRequest) -> Step + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self::build(Box::new(f), None))
    }

    /// Like [`MockTransport::from_fn`], holding every call for `delay`.
    pub fn slow(
        delay: Duration,
        f: impl Fn(usize, &HttpRequest) -> Step + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self::build(Box::new(f), Some(delay)))
    }

    fn build(responder: Responder, delay: Option<Duration>) -> Self {
        Self {
            responder,
            delay,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn enter(&self, request: &HttpRequest) -> usize {
        self.requests.lock().unwrap().push(request.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst)
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let call = self.enter(request);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        let step = (self.responder)(call, request);
        self.leave();
        step.into_result()
    }
}

#[async_trait]
impl AsyncTransport for MockTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let call = self.enter(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let step = (self.responder)(call, request);
        self.leave();
        step.into_result()
    }
}

/// Config with zero retry delay so tests only measure counts.
pub fn config(max_retries: u32) -> ClientConfig {
    ClientConfig::builder()
        .api_key("test-key")
        .group_id("group-1")
        .retry_policy(
            RetryPolicy::default()
                .with_max_retries(max_retries)
                .with_delay(Duration::ZERO),
        )
        .build()
        .unwrap()
}

pub fn t2a_ok(audio_hex: &str) -> String {
    format!(
        r#"{{"data":{{"audio":"{}","status":2}},"extra_info":{{"audio_length":1200,"audio_format":"mp3"}},"trace_id":"trace-123","base_resp":{{"status_code":0,"status_msg":"success"}}}}"#,
        audio_hex
    )
}

pub fn envelope_error(code: i64, msg: &str) -> String {
    format!(
        r#"{{"base_resp":{{"status_code":{},"status_msg":"{}"}}}}"#,
        code, msg
    )
}

pub const VOICE_LIST: &str = r#"{
    "system_voice": [
        {"voice_id": "Wise_Woman", "voice_name": "Wise Woman", "description": ["calm, mature"]},
        {"voice_id": "Deep_Voice_Man", "voice_name": "Deep Voice Man", "description": []}
    ],
    "voice_cloning": [
        {"voice_id": "MyVoice001", "description": [], "created_time": "2025-06-01"}
    ],
    "base_resp": {"status_code": 0, "status_msg": "success"}
}"#;

pub const UPLOAD_OK: &str = r#"{
    "file": {"file_id": 987654321, "bytes": 5, "created_at": 1700000000,
             "filename": "sample.mp3", "purpose": "voice_clone"},
    "base_resp": {"status_code": 0, "status_msg": "success"}
}"#;
