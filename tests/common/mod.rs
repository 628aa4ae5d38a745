#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

const USER_NAMES: [&str; 3] = ["Layla Kawaguchi", "Vikram Desai", "Sophia Al-Farsi"];

pub fn sample_messages(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let user_name = USER_NAMES[i % USER_NAMES.len()];
            json!({
                "id": format!("msg-{}", i),
                "user_id": format!("user-{}", i % 3),
                "user_name": user_name,
                "timestamp": "2025-05-05T07:47:20.159073+00:00",
                "message": format!("Request number {}", i)
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    skip: usize,
    limit: usize,
}

/// Fake upstream messages API.
#[derive(Clone, Default)]
pub struct FakeUpstream {
    pub items: Arc<Vec<Value>>,
    pub requests: Arc<Mutex<Vec<(usize, usize)>>>,
    pub fail_with: Option<StatusCode>,
    pub omit_items: bool,
    pub garbage_body: bool,
}

impl FakeUpstream {
    pub fn with_items(items: Vec<Value>) -> Self {
        Self {
            items: Arc::new(items),
            ..Self::default()
        }
    }

    pub fn failing(status: StatusCode) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<(usize, usize)> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the base URL; the messages endpoint is `<base>/messages`.
    pub async fn start(&self) -> String {
        let app = Router::new()
            .route("/messages", get(serve_page))
            .with_state(self.clone());
        spawn(app).await
    }
}

async fn serve_page(State(upstream): State<FakeUpstream>, Query(query): Query<PageQuery>) -> Response {
    upstream
        .requests
        .lock()
        .unwrap()
        .push((query.skip, query.limit));

    if let Some(status) = upstream.fail_with {
        return (status, "upstream unavailable").into_response();
    }
    if upstream.garbage_body {
        return (StatusCode::OK, "<html>not json</html>").into_response();
    }
    if upstream.omit_items {
        return Json(json!({ "total": 0 })).into_response();
    }

    let page: Vec<Value> = upstream
        .items
        .iter()
        .skip(query.skip)
        .take(query.limit)
        .cloned()
        .collect();
    Json(json!({ "total": upstream.items.len(), "items": page })).into_response()
}

/// Fake OpenAI-compatible chat-completion API.
#[derive(Clone, Default)]
pub struct FakeModel {
    pub reply: Arc<String>,
    pub requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    pub fail_with: Option<StatusCode>,
}

impl FakeModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Arc::new(text.to_string()),
            ..Self::default()
        }
    }

    pub fn failing(status: StatusCode) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::default()
        }
    }

    /// Recorded `(authorization header, request body)` pairs.
    pub fn requests(&self) -> Vec<(Option<String>, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn start(&self) -> String {
        let app = Router::new()
            .route("/chat/completions", post(complete))
            .with_state(self.clone());
        spawn(app).await
    }
}

async fn complete(
    State(model): State<FakeModel>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    model.requests.lock().unwrap().push((auth, body));

    if let Some(status) = model.fail_with {
        return (status, Json(json!({ "error": { "message": "rate limited" } }))).into_response();
    }

    Json(json!({
        "id": "gen-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "finish_reason": "stop",
                "message": { "role": "assistant", "content": model.reply.as_str() }
            }
        ]
    }))
    .into_response()
}
