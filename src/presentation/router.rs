use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{any, get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::FileLoader;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    dispatch_handler, health_handler, telegram_webhook_handler, telegram_webhook_status_handler,
};
use crate::presentation::state::{AppState, BotState};

/// Headroom over the upload limit for multipart framing and text fields.
const BODY_LIMIT_SLACK_BYTES: usize = 1024 * 1024;

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

fn trace_layer() -> TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

pub fn create_router<F>(state: AppState<F>) -> Router
where
    F: FileLoader + 'static,
{
    let body_limit = state.max_upload_bytes + BODY_LIMIT_SLACK_BYTES;

    Router::new()
        .route("/api", any(dispatch_handler::<F>))
        .route("/api/", any(dispatch_handler::<F>))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer())
        .layer(cors_layer())
        .with_state(state)
}

pub fn create_bot_router(state: BotState) -> Router {
    Router::new()
        .route(
            "/api/telegram-webhook",
            get(telegram_webhook_status_handler).post(telegram_webhook_handler),
        )
        .route("/health", get(health_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer())
        .with_state(state)
}
