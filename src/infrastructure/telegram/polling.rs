use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::ChatService;

use super::TelegramClient;
use super::update_handler::handle_update;

const LONG_POLL_SECS: u64 = 30;
const ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Long-polls the Bot API until `shutdown` resolves. Each update is handled
/// on its own task.
pub async fn run_polling<S>(client: Arc<TelegramClient>, service: Arc<ChatService>, shutdown: S)
where
    S: Future<Output = ()>,
{
    if let Err(e) = client.delete_webhook().await {
        tracing::warn!(error = %e, "Failed to clear webhook before polling");
    }

    tracing::info!("Polling for chat updates");

    tokio::pin!(shutdown);
    let mut offset: Option<i64> = None;

    loop {
        let updates = tokio::select! {
            _ = &mut shutdown => break,
            result = client.get_updates(offset, LONG_POLL_SECS) => result,
        };

        match updates {
            Ok(updates) => {
                for update in updates {
                    offset = Some(update.update_id + 1);
                    let service = Arc::clone(&service);
                    tokio::spawn(async move {
                        handle_update(&service, update).await;
                    });
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch updates");
                tokio::select! {
                    _ = &mut shutdown => break,
                    _ = tokio::time::sleep(ERROR_BACKOFF) => {}
                }
            }
        }
    }

    tracing::info!("Polling stopped");
}
