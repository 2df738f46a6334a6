use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::record::ChatMessageRecord;

pub struct ReceivedRequest {
    pub content_type: String,
    pub body: Value,
}

pub struct MockWebhook {
    pub url: String,
    pub received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

/// Local webhook receiver answering every POST to `/hook` with `status` and `body`
pub async fn spawn_webhook(status: StatusCode, body: &'static str) -> MockWebhook {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();

    let app = Router::new().route(
        "/hook",
        post(move |headers: HeaderMap, Json(payload): Json<Value>| {
            let sink = sink.clone();
            async move {
                let content_type = headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                sink.lock().await.push(ReceivedRequest {
                    content_type,
                    body: payload,
                });
                (status, body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockWebhook {
        url: format!("http://{}/hook", addr),
        received,
    }
}

/// Webhook receiver that waits `delay` before answering, for timeout tests
pub async fn spawn_slow_webhook(delay: Duration) -> String {
    let app = Router::new().route(
        "/hook",
        post(move || async move {
            tokio::time::sleep(delay).await;
            StatusCode::NO_CONTENT
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/hook", addr)
}

pub fn record(player_name: &str, message: &str, is_team_scoped: bool) -> ChatMessageRecord {
    ChatMessageRecord {
        player_name: player_name.to_string(),
        message: message.to_string(),
        player_id: 76561198000000000,
        is_team_scoped,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        server_label: "Test Server".to_string(),
    }
}
