mod helpers;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use shastra::application::services::{ChatService, DEFAULT_MAX_FILE_BYTES};
use shastra::domain::{ChatSession, ChatUserId, Language};
use shastra::infrastructure::persistence::InMemorySessionStore;
use shastra::presentation::{BotState, create_bot_router};

use helpers::{RecordingTransport, ScriptedDispatcher, json_body};

fn bot_app(transport: Arc<RecordingTransport>) -> axum::Router {
    let chat_service = Arc::new(ChatService::new(
        Arc::new(ScriptedDispatcher::default()),
        transport,
        Arc::new(InMemorySessionStore::<ChatUserId, ChatSession>::default()),
        Arc::new(InMemorySessionStore::<ChatUserId, Language>::default()),
        DEFAULT_MAX_FILE_BYTES,
    ));

    create_bot_router(BotState {
        chat_service,
        has_token: true,
    })
}

#[tokio::test]
async fn given_webhook_when_status_requested_then_reports_active() {
    let app = bot_app(Arc::new(RecordingTransport::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/telegram-webhook")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "active");
    assert_eq!(body["has_token"], true);
    assert_eq!(body["webhook"], "ready");
}

#[tokio::test]
async fn given_pushed_command_when_webhook_called_then_replies_and_acknowledges() {
    let transport = Arc::new(RecordingTransport::default());
    let app = bot_app(Arc::clone(&transport));
    let update = json!({
        "update_id": 1,
        "message": {"message_id": 3, "chat": {"id": 55}, "from": {"id": 66}, "text": "/upload"}
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/telegram-webhook")
                .header("content-type", "application/json")
                .body(Body::from(update.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"ok": true}));
    assert!(transport.last_text().contains("PDF or DOCX"));
}

#[tokio::test]
async fn given_unrecognized_payload_when_webhook_called_then_still_acknowledges() {
    let transport = Arc::new(RecordingTransport::default());
    let app = bot_app(Arc::clone(&transport));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/telegram-webhook")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"unexpected": true}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(transport.texts().is_empty());
}
