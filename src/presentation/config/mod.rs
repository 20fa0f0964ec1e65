mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    BotMode, BotSettings, CacheSettings, DocumentSettings, LlmProvider, LlmSettings,
    LoggingSettings, ServerSettings, Settings,
};
