mod dispatch;
mod health;
pub mod models;
mod telegram_webhook;

pub use dispatch::dispatch_handler;
pub use health::health_handler;
pub use telegram_webhook::{telegram_webhook_handler, telegram_webhook_status_handler};
