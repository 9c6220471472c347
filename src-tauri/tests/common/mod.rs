//! Shared test helpers: a local stand-in for the Gemini endpoint.
//!
//! The mock answers every request with one canned status + JSON body and
//! records what it received, so tests can assert both on the request shape
//! and on whether a request was made at all.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{StatusCode, Uri},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use stratify_lib::llm::{GatewayConfig, GeminiClient};

pub const TEST_API_KEY: &str = "test-key-123";

/// One request as seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub body: Value,
}

impl RecordedRequest {
    pub fn prompt(&self) -> &str {
        self.body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap_or_default()
    }

    pub fn max_output_tokens(&self) -> u64 {
        self.body["generationConfig"]["maxOutputTokens"]
            .as_u64()
            .unwrap_or_default()
    }
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: Value,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// A running mock Gemini server.
pub struct MockGemini {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockGemini {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("mock received no requests")
    }

    /// Client pointed at this mock with a valid test key.
    pub fn client(&self) -> GeminiClient {
        GeminiClient::new(GatewayConfig::new(TEST_API_KEY).with_base_url(&self.base_url))
    }

    /// Client pointed at this mock with no usable key.
    pub fn client_without_key(&self) -> GeminiClient {
        GeminiClient::new(GatewayConfig::new("your_api_key_here").with_base_url(&self.base_url))
    }
}

async fn handle(
    State(state): State<MockState>,
    uri: Uri,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });
    (state.status, Json(state.body.clone()))
}

/// Start a mock that answers every request with `status` and `body`.
pub async fn spawn_mock(status: StatusCode, body: Value) -> MockGemini {
    let hits = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status,
        body,
        hits: hits.clone(),
        requests: requests.clone(),
    };
    let app = Router::new().fallback(handle).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockGemini {
        base_url: format!("http://{}", addr),
        hits,
        requests,
    }
}

/// Mock answering 200 with a single candidate whose text is `text`.
pub async fn spawn_text_mock(text: &str) -> MockGemini {
    spawn_mock(StatusCode::OK, gemini_text(text)).await
}

/// A `generateContent` response body with one text part.
pub fn gemini_text(text: &str) -> Value {
    json!({
        "candidates": [
            {
                "content": {
                    "role": "model",
                    "parts": [{ "text": text }]
                },
                "finishReason": "STOP"
            }
        ]
    })
}

/// One-shot raw server: answers with `status` and a `content-length` larger
/// than the body it actually sends, then hangs up mid-body.
pub async fn spawn_truncated_response(status: u16) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        let head = format!(
            "HTTP/1.1 {} Upstream Error\r\ncontent-type: application/json\r\ncontent-length: 512\r\n\r\n{{\"error\":",
            status
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.flush().await.unwrap();
    });
    format!("http://{}", addr)
}

/// Read one full HTTP request (headers plus `content-length` body).
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                return;
            }
        }
    }
}
