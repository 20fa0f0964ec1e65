mod http_dispatcher_client;

pub use http_dispatcher_client::HttpDispatcherClient;
