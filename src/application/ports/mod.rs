mod chat_transport;
mod dispatcher_client;
mod file_loader;
mod llm_client;
mod session_store;

pub use chat_transport::{ChatTransport, CommandDescription, MessageFormat, TransportError};
pub use dispatcher_client::{DispatcherClient, DispatcherClientError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use session_store::SessionStore;
