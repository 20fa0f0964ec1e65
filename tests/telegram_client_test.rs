mod helpers;

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use shastra::application::ports::{ChatTransport, MessageFormat, SessionStore, TransportError};
use shastra::application::services::{COMMAND_MENU, ChatService, DEFAULT_MAX_FILE_BYTES};
use shastra::domain::{ChatId, ChatSession, ChatUserId, DocumentId, EntitySet, Language};
use shastra::infrastructure::persistence::InMemorySessionStore;
use shastra::infrastructure::telegram::{TelegramClient, Update, handle_update};

use helpers::ScriptedDispatcher;

type Calls = Arc<Mutex<Vec<(String, Value)>>>;

const BROKEN_MARKUP: &str = "UNCLOSED_";
const UNREACHABLE_CHAT: i64 = 404;

async fn bot_api(
    State(calls): State<Calls>,
    Path((_bot, method)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    calls.lock().unwrap().push((method.clone(), body.clone()));

    let reply = match method.as_str() {
        "sendMessage" if body["chat_id"] == UNREACHABLE_CHAT => json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        }),
        "sendMessage"
            if body.get("parse_mode").is_some()
                && body["text"].as_str().unwrap_or_default().contains(BROKEN_MARKUP) =>
        {
            json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: can't parse entities"
            })
        }
        "sendMessage" => json!({"ok": true, "result": {"message_id": 1}}),
        "getFile" => json!({
            "ok": true,
            "result": {"file_id": body["file_id"], "file_path": "documents/lease.pdf"}
        }),
        "getUpdates" => json!({
            "ok": true,
            "result": [{
                "update_id": 900,
                "message": {"message_id": 5, "chat": {"id": 1}, "from": {"id": 2}, "text": "/help"}
            }]
        }),
        _ => json!({"ok": true, "result": true}),
    };
    Json(reply)
}

async fn file_download(Path((_bot, path)): Path<(String, String)>) -> Vec<u8> {
    format!("PDFDATA:{path}").into_bytes()
}

async fn start_fake_bot_api() -> (TelegramClient, Calls) {
    let calls: Calls = Arc::default();
    let router = Router::new()
        .route("/{bot}/{method}", post(bot_api))
        .route("/file/{bot}/{*path}", get(file_download))
        .with_state(Arc::clone(&calls));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let client =
        TelegramClient::new("123456:test-token".to_string(), Some(format!("http://{addr}")))
            .unwrap();
    (client, calls)
}

fn methods(calls: &Calls) -> Vec<String> {
    calls.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
}

fn sent_messages(calls: &Calls) -> Vec<(bool, String)> {
    calls
        .lock()
        .unwrap()
        .iter()
        .filter(|(method, _)| method == "sendMessage")
        .map(|(_, body)| {
            (
                body.get("parse_mode").is_some(),
                body["text"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

#[tokio::test]
async fn given_markdown_rejected_by_api_when_sending_then_resends_as_plain_text() {
    let (client, calls) = start_fake_bot_api().await;
    let text = format!("*Answer* {BROKEN_MARKUP} tail");

    client
        .send_message(ChatId::new(1), &text, MessageFormat::Markdown)
        .await
        .unwrap();

    assert_eq!(
        sent_messages(&calls),
        vec![(true, text.clone()), (false, text)]
    );
}

#[tokio::test]
async fn given_later_part_rejected_when_sending_markdown_then_only_that_part_is_resent() {
    let (client, calls) = start_fake_bot_api().await;
    let opening = "a".repeat(4096);
    let text = format!("{opening}{}\n{BROKEN_MARKUP} tail", "a".repeat(904));

    client
        .send_message(ChatId::new(1), &text, MessageFormat::Markdown)
        .await
        .unwrap();

    let sent = sent_messages(&calls);
    let closing = format!("{}\n{BROKEN_MARKUP} tail", "a".repeat(904));
    assert_eq!(
        sent,
        vec![
            (true, opening.clone()),
            (true, closing.clone()),
            (false, closing),
        ]
    );
    assert_eq!(sent.iter().filter(|(_, t)| *t == opening).count(), 1);
}

#[tokio::test]
async fn given_plain_text_rejected_when_sending_then_returns_rejected() {
    let (client, calls) = start_fake_bot_api().await;

    let err = client
        .send_message(ChatId::new(UNREACHABLE_CHAT), "hello", MessageFormat::Markdown)
        .await
        .unwrap_err();

    match err {
        TransportError::Rejected(reason) => assert!(reason.contains("chat not found")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(sent_messages(&calls).len(), 2);
}

#[tokio::test]
async fn given_long_message_when_sending_then_splits_into_platform_sized_parts() {
    let (client, calls) = start_fake_bot_api().await;
    let text = "x".repeat(5000);

    client
        .send_message(ChatId::new(1), &text, MessageFormat::Plain)
        .await
        .unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1["text"].as_str().unwrap().len(), 4096);
    assert_eq!(calls[1].1["text"].as_str().unwrap().len(), 904);
    assert_eq!(calls[0].1["chat_id"], 1);
}

#[tokio::test]
async fn given_file_id_when_downloading_then_resolves_path_and_fetches_bytes() {
    let (client, calls) = start_fake_bot_api().await;

    let data = client.download_file("file-xyz").await.unwrap();

    assert_eq!(&data[..], b"PDFDATA:documents/lease.pdf");
    assert_eq!(methods(&calls), vec!["getFile".to_string()]);
}

#[tokio::test]
async fn given_command_menu_when_registering_then_sends_all_commands() {
    let (client, calls) = start_fake_bot_api().await;

    client.set_commands(&COMMAND_MENU).await.unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].0, "setMyCommands");
    assert_eq!(calls[0].1["commands"].as_array().unwrap().len(), 11);
    assert_eq!(calls[0].1["commands"][0]["command"], "start");
}

#[tokio::test]
async fn given_pending_update_when_polling_then_update_is_parsed() {
    let (client, _calls) = start_fake_bot_api().await;

    let updates = client.get_updates(Some(899), 0).await.unwrap();

    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].update_id, 900);
}

#[tokio::test]
async fn given_long_answer_with_broken_markup_when_asking_then_each_part_is_delivered_once() {
    let (client, calls) = start_fake_bot_api().await;
    let answer = format!("{}\n{BROKEN_MARKUP} tail", "a".repeat(5000));
    let sessions = Arc::new(InMemorySessionStore::<ChatUserId, ChatSession>::default());
    sessions
        .put(
            ChatUserId::new(20),
            ChatSession::new(
                DocumentId::for_chat_user(20),
                "lease.pdf".to_string(),
                1024,
                EntitySet::default(),
            ),
        )
        .await;
    let service = ChatService::new(
        Arc::new(ScriptedDispatcher {
            answer,
            ..Default::default()
        }),
        Arc::new(client),
        sessions,
        Arc::new(InMemorySessionStore::<ChatUserId, Language>::default()),
        DEFAULT_MAX_FILE_BYTES,
    );
    let update: Update = serde_json::from_value(json!({
        "update_id": 1,
        "message": {"message_id": 1, "chat": {"id": 10}, "from": {"id": 20}, "text": "/ask Who pays?"}
    }))
    .unwrap();

    handle_update(&service, update).await;

    let sent = sent_messages(&calls);
    let full_run = "a".repeat(4096);
    assert_eq!(sent.iter().filter(|(_, t)| *t == full_run).count(), 1);
    assert_eq!(sent.iter().filter(|(_, t)| t.starts_with("Answer:")).count(), 1);

    let (markdown, last) = sent.last().unwrap();
    assert!(!markdown);
    assert!(last.ends_with(&format!("{BROKEN_MARKUP} tail")));
    assert_eq!(
        sent.iter().filter(|(_, t)| t.contains(BROKEN_MARKUP)).count(),
        2
    );
}
