use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use shastra::application::services::DocumentService;
use shastra::domain::{DocumentId, DocumentRecord};
use shastra::infrastructure::llm::LlmClientFactory;
use shastra::infrastructure::observability::{TracingConfig, init_tracing};
use shastra::infrastructure::persistence::InMemorySessionStore;
use shastra::infrastructure::text_processing::CompositeFileLoader;
use shastra::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let (environment, settings) = Settings::load()?;
    init_tracing(&TracingConfig::from_settings(
        "shastra",
        environment,
        &settings.logging,
    ));

    let llm_client = LlmClientFactory::create(&settings.llm)?;
    let document_store = Arc::new(InMemorySessionStore::<DocumentId, DocumentRecord>::new(
        settings.cache.eviction_policy(),
    ));

    let document_service = Arc::new(DocumentService::new(
        Arc::new(CompositeFileLoader::with_default_adapters()),
        llm_client,
        document_store,
        settings.documents.max_prompt_chars,
    ));

    tracing::info!(
        ai_enabled = document_service.ai_enabled(),
        provider = ?settings.llm.provider,
        "Dispatcher configured"
    );

    let state = AppState {
        document_service,
        default_doc_id: DocumentId::new(settings.documents.default_doc_id.clone()),
        max_upload_bytes: settings.server.max_upload_bytes(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
