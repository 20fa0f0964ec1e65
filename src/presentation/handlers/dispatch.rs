use axum::Json;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::application::ports::FileLoader;
use crate::application::services::{DispatchError, Upload};
use crate::domain::DocumentId;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::handlers::models::{
    AskResponse, DispatchRequest, EntitiesResponse, ErrorResponse, IngestResponse,
    LivenessResponse,
};
use crate::presentation::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Ingest,
    Entities,
    Ask,
}

impl Action {
    fn parse(action: Option<&str>) -> Option<Self> {
        match action.map(str::trim)? {
            "ingest" => Some(Action::Ingest),
            "entities" => Some(Action::Entities),
            "ask" => Some(Action::Ask),
            _ => None,
        }
    }
}

/// Everything a dispatcher call may carry, from either body encoding.
#[derive(Default)]
struct DispatchCall {
    action: Option<String>,
    doc_id: Option<String>,
    question: Option<String>,
    upload: Option<Upload>,
}

/// Single entry point for `/api`: the `action` field picks the behavior.
#[tracing::instrument(skip(state, request), fields(method = %request.method()))]
pub async fn dispatch_handler<F>(State(state): State<AppState<F>>, request: Request) -> Response
where
    F: FileLoader + 'static,
{
    let method = request.method().clone();
    let url = request.uri().to_string();

    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    if method != Method::POST {
        return liveness(&method, &url);
    }

    let call = match read_call(request, &state).await {
        Ok(call) => call,
        Err(response) => return response,
    };

    let Some(action) = Action::parse(call.action.as_deref()) else {
        tracing::debug!(action = ?call.action, "No dispatch action, answering liveness");
        return liveness(&method, &url);
    };

    let doc_id = DocumentId::or_default(call.doc_id.as_deref(), &state.default_doc_id);
    tracing::info!(action = ?action, doc_id = %doc_id, "Dispatching");

    let service = &state.document_service;
    let result = match action {
        Action::Ingest => service
            .ingest(doc_id, call.upload)
            .await
            .map(|summary| Json(IngestResponse::from(summary)).into_response()),
        Action::Entities => service
            .entities(doc_id)
            .await
            .map(|report| Json(EntitiesResponse::from(report)).into_response()),
        Action::Ask => {
            let question = call.question.unwrap_or_default();
            tracing::debug!(question = %sanitize_prompt(&question), "Processing question");
            service
                .ask(doc_id, &question)
                .await
                .map(|answer| Json(AskResponse::from(answer)).into_response())
        }
    };

    result.unwrap_or_else(|e| error_response(&e))
}

async fn read_call<F>(request: Request, state: &AppState<F>) -> Result<DispatchCall, Response>
where
    F: FileLoader + 'static,
{
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected multipart request");
                upload_failed(&e.body_text())
            })?;
        return read_multipart(multipart, state.max_upload_bytes).await;
    }

    let body = Bytes::from_request(request, state).await.map_err(|e| {
        tracing::warn!(error = %e, "Failed to read request body");
        e.into_response()
    })?;

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DispatchCall::default());
    }

    let request: DispatchRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Malformed JSON body");
        error_body(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", e))
    })?;

    Ok(DispatchCall {
        action: request.action,
        doc_id: request.doc_id,
        question: request.q,
        upload: None,
    })
}

async fn read_multipart(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<DispatchCall, Response> {
    let mut call = DispatchCall::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(upload_failed(&e.body_text()));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(String::from);

        match (name.as_str(), filename) {
            ("file", Some(filename)) => {
                let data = field.bytes().await.map_err(|e| {
                    tracing::error!(error = %e, "Failed to read file bytes");
                    upload_failed(&e.body_text())
                })?;

                if data.len() > max_upload_bytes {
                    tracing::warn!(size = data.len(), "Upload exceeds size limit");
                    return Err(upload_failed("File too large"));
                }

                tracing::debug!(filename = %filename, bytes = data.len(), "File data received");
                call.upload = Some(Upload { filename, data });
            }
            ("action" | "doc_id" | "q", _) => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| upload_failed(&e.body_text()))?;
                match name.as_str() {
                    "action" => call.action = Some(value),
                    "doc_id" => call.doc_id = Some(value),
                    _ => call.question = Some(value),
                }
            }
            _ => tracing::debug!(field = %name, "Ignoring multipart field"),
        }
    }

    Ok(call)
}

fn liveness(method: &Method, url: &str) -> Response {
    Json(LivenessResponse {
        message: "API is working!".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        method: method.to_string(),
        url: url.to_string(),
    })
    .into_response()
}

fn error_response(error: &DispatchError) -> Response {
    let status = match error {
        DispatchError::MissingFile
        | DispatchError::UnsupportedFormat(_)
        | DispatchError::EmptyText
        | DispatchError::MissingQuestion => StatusCode::BAD_REQUEST,
        DispatchError::NotFound(_) => StatusCode::NOT_FOUND,
        DispatchError::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        DispatchError::UpstreamParseFailure(_) | DispatchError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        tracing::error!(error = %error, status = status.as_u16(), "Dispatch failed");
    } else {
        tracing::warn!(error = %error, status = status.as_u16(), "Dispatch rejected");
    }

    error_body(status, error.to_string())
}

/// Every upload problem, size limits included, is a client error.
fn upload_failed(reason: &str) -> Response {
    error_body(StatusCode::BAD_REQUEST, format!("Upload failed: {}", reason))
}

fn error_body(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}
