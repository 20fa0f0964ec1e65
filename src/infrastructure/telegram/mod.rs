mod bot_api_client;
mod polling;
mod types;
mod update_handler;

pub use bot_api_client::{MAX_MESSAGE_CHARS, TELEGRAM_API_BASE, TelegramClient, split_message};
pub use polling::run_polling;
pub use types::{ApiResponse, Chat, Document, Message, Update, User};
pub use update_handler::handle_update;
