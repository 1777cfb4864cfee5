//! Local stand-ins for the three inference services.

#![allow(dead_code)]

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use lecture_voice::InferenceConfig;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A canned upstream response.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    pub delay: Duration,
}

impl Reply {
    pub fn json(status: u16, value: Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: serde_json::to_vec(&value).unwrap(),
            delay: Duration::ZERO,
        }
    }

    pub fn wav(bytes: &[u8]) -> Self {
        Self {
            status: 200,
            content_type: "audio/wav",
            body: bytes.to_vec(),
            delay: Duration::ZERO,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.as_bytes().to_vec(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn send(self) -> Response {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let status = StatusCode::from_u16(self.status).unwrap();
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

/// A multipart part received by the transcription stand-in.
#[derive(Debug, Clone)]
pub struct Upload {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Everything the stand-ins observed.
#[derive(Clone, Default)]
pub struct Recorder {
    /// Services called, in order: "stt", "llm", "tts".
    pub calls: Arc<Mutex<Vec<&'static str>>>,
    pub authorization: Arc<Mutex<Vec<String>>>,
    pub uploads: Arc<Mutex<Vec<Upload>>>,
    pub llm_inputs: Arc<Mutex<Vec<Value>>>,
    pub tts_inputs: Arc<Mutex<Vec<Value>>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, service: &str) -> usize {
        self.calls().iter().filter(|c| **c == service).count()
    }

    fn record(&self, service: &'static str, headers: &HeaderMap) {
        self.calls.lock().unwrap().push(service);
        if let Some(auth) = headers.get(header::AUTHORIZATION) {
            self.authorization
                .lock()
                .unwrap()
                .push(auth.to_str().unwrap_or_default().to_string());
        }
    }
}

#[derive(Clone)]
struct MockState {
    stt: Reply,
    llm: Reply,
    tts: Reply,
    recorder: Recorder,
}

async fn stt_handler(
    State(state): State<MockState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    state.recorder.record("stt", &headers);
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.unwrap_or_default().to_vec();
        state.recorder.uploads.lock().unwrap().push(Upload {
            field: name,
            file_name,
            content_type,
            data,
        });
    }
    state.stt.send().await
}

async fn llm_handler(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.recorder.record("llm", &headers);
    state.recorder.llm_inputs.lock().unwrap().push(body);
    state.llm.send().await
}

async fn tts_handler(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.recorder.record("tts", &headers);
    state.recorder.tts_inputs.lock().unwrap().push(body);
    state.tts.send().await
}

pub struct MockInference {
    pub base_url: String,
    pub recorder: Recorder,
}

impl MockInference {
    /// Starts the stand-ins on an ephemeral local port.
    pub async fn start(stt: Reply, llm: Reply, tts: Reply) -> Self {
        let recorder = Recorder::default();
        let state = MockState {
            stt,
            llm,
            tts,
            recorder: recorder.clone(),
        };
        let app = Router::new()
            .route("/stt", post(stt_handler))
            .route("/llm", post(llm_handler))
            .route("/tts", post(tts_handler))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            recorder,
        }
    }

    pub fn config(&self, token: &str) -> InferenceConfig {
        InferenceConfig::new(token).with_endpoints(
            format!("{}/stt", self.base_url),
            format!("{}/llm", self.base_url),
            format!("{}/tts", self.base_url),
        )
    }
}

// ── Server helpers ──

use axum::body::Body;
use axum::http::Request;
use lecture_server::{app, AppState};
use lecture_voice::Pipeline;

pub const BOUNDARY: &str = "lecture-test-boundary";

/// Builds the router against the stand-in services.
pub fn test_app(mock: &MockInference) -> Router {
    test_app_with(mock, |_| {})
}

pub fn test_app_with(mock: &MockInference, tweak: impl FnOnce(&mut InferenceConfig)) -> Router {
    let mut config = mock.config("test-token");
    tweak(&mut config);
    let max_audio_bytes = config.max_audio_bytes;
    app(AppState {
        pipeline: Arc::new(Pipeline::new(config).unwrap()),
        max_audio_bytes,
        static_dir: "/nonexistent/static".to_string(),
    })
}

/// A multipart body with one file part.
pub fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn json_request(uri: &str, value: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&value).unwrap()))
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
