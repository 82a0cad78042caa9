//! Draw, export, and guess through a real relay against a mock vision API

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::http::{StatusCode, header};
use axum::routing::post;
use doodle_config::CanvasConfig;
use doodle_relay::{GuessRelay, OpenAiCompatibleAdapter, router};
use doodle_ui::{DrawingSession, PanelStatus, RelayClient};
use serde_json::Value;
use tokio::net::TcpListener;

/// Mock chat-completions upstream; returns the recorded request bodies
async fn spawn_upstream(status: StatusCode, body: &'static str) -> (String, Arc<Mutex<Vec<Value>>>) {
    let seen: Arc<Mutex<Vec<Value>>> = Arc::default();
    let log = seen.clone();
    let app = Router::new().route(
        "/chat/completions",
        post(move |raw: Bytes| {
            let log = log.clone();
            async move {
                log.lock()
                    .unwrap()
                    .push(serde_json::from_slice(&raw).unwrap_or(Value::Null));
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    (format!("http://{addr}/chat/completions"), seen)
}

/// Serve a relay pointed at `endpoint`; returns its origin
async fn spawn_relay(endpoint: &str, credential: Option<&str>) -> String {
    let relay = GuessRelay::new(
        Box::new(OpenAiCompatibleAdapter::new(endpoint, "test-model")),
        credential.map(str::to_string),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router(Arc::new(relay))).await.unwrap() });
    format!("http://{addr}")
}

fn draw_line(session: &mut DrawingSession) {
    session.pointer_down(100.0, 300.0);
    session.pointer_move(400.0, 300.0);
    session.pointer_move(700.0, 300.0);
    session.pointer_up();
}

#[tokio::test]
async fn test_draw_and_guess() {
    let (upstream, seen) = spawn_upstream(
        StatusCode::OK,
        r#"{"choices":[{"message":{"role":"assistant","content":"一个圆圈"}}]}"#,
    )
    .await;
    let origin = spawn_relay(&upstream, Some("test-key")).await;
    let client = RelayClient::new(&origin);

    let mut session = DrawingSession::new(&CanvasConfig::default());
    draw_line(&mut session);
    session.submit_guess(&client).await;

    assert!(!session.panel().is_loading());
    assert_eq!(session.panel().guess(), Some("一个圆圈"));
    assert_eq!(session.panel().display_text().as_deref(), Some("一个圆圈"));

    // The exported PNG reached the upstream without its original header duplicated
    let bodies = seen.lock().unwrap().clone();
    assert_eq!(bodies.len(), 1);
    let url = bodies[0]["messages"][0]["content"][1]["image_url"]["url"]
        .as_str()
        .unwrap();
    assert!(url.starts_with("data:image/png;base64,"));
    assert!(!url["data:image/png;base64,".len()..].starts_with("data:"));
}

#[tokio::test]
async fn test_upstream_failure_shows_error() {
    let (upstream, _) = spawn_upstream(StatusCode::SERVICE_UNAVAILABLE, "overloaded").await;
    let origin = spawn_relay(&upstream, Some("test-key")).await;
    let client = RelayClient::new(&origin);

    let mut session = DrawingSession::new(&CanvasConfig::default());
    draw_line(&mut session);
    session.submit_guess(&client).await;

    assert!(!session.panel().is_loading());
    assert!(session.panel().guess().is_none());
    assert_eq!(session.panel().error(), Some("Vision API 调用失败"));
}

#[tokio::test]
async fn test_missing_credential_shows_error() {
    let (upstream, seen) = spawn_upstream(StatusCode::OK, "{}").await;
    let origin = spawn_relay(&upstream, None).await;
    let client = RelayClient::new(&origin);

    let mut session = DrawingSession::new(&CanvasConfig::new(32, 32));
    session.submit_guess(&client).await;

    assert_eq!(session.panel().error(), Some("API 密钥未配置"));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_relay_shows_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = RelayClient::new(&format!("http://{addr}"));

    let mut session = DrawingSession::new(&CanvasConfig::new(32, 32));
    session.submit_guess(&client).await;

    assert!(matches!(session.panel().status(), PanelStatus::Error(_)));
    assert!(session.panel().can_request_guess());
}
