use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use shastra::application::services::ChatService;
use shastra::domain::{ChatSession, ChatUserId, Language};
use shastra::infrastructure::dispatcher::HttpDispatcherClient;
use shastra::infrastructure::observability::{TracingConfig, init_tracing};
use shastra::infrastructure::persistence::InMemorySessionStore;
use shastra::infrastructure::telegram::{TelegramClient, run_polling};
use shastra::presentation::config::BotMode;
use shastra::presentation::{BotState, Settings, create_bot_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let (environment, settings) = Settings::load()?;
    init_tracing(&TracingConfig::from_settings(
        "shastra-bot",
        environment,
        &settings.logging,
    ));

    let bot = settings.bot;
    let token = bot
        .token
        .clone()
        .filter(|token| !token.trim().is_empty())
        .context("TELEGRAM_BOT_TOKEN is required")?;

    let telegram = Arc::new(TelegramClient::new(
        token,
        Some(bot.telegram_api_base.clone()),
    )?);
    let dispatcher = Arc::new(HttpDispatcherClient::new(
        bot.api_url.clone(),
        Duration::from_secs(bot.request_timeout_secs),
    )?);

    let eviction = settings.cache.eviction_policy();
    let chat_service = Arc::new(ChatService::new(
        dispatcher,
        telegram.clone(),
        Arc::new(InMemorySessionStore::<ChatUserId, ChatSession>::new(eviction)),
        Arc::new(InMemorySessionStore::<ChatUserId, Language>::new(eviction)),
        bot.max_file_bytes(),
    ));

    tracing::info!(mode = ?bot.mode, api_url = %bot.api_url, "Chat front end starting");

    match bot.mode {
        BotMode::Polling => run_polling(telegram, chat_service, shutdown_signal()).await,
        BotMode::Webhook => {
            let router = create_bot_router(BotState {
                chat_service,
                has_token: true,
            });

            let addr: SocketAddr = format!("{}:{}", bot.webhook_host, bot.webhook_port).parse()?;
            tracing::info!("Webhook listening on {}", addr);

            let listener = TcpListener::bind(addr).await?;
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
