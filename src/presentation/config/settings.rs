use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::infrastructure::persistence::EvictionPolicy;

use super::Environment;

const MEGABYTE: u64 = 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub documents: DocumentSettings,
    pub cache: CacheSettings,
    pub logging: LoggingSettings,
    pub bot: BotSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSettings {
    pub default_doc_id: String,
    pub max_prompt_chars: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub ttl_seconds: Option<u64>,
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotSettings {
    pub token: Option<String>,
    pub api_url: String,
    pub telegram_api_base: String,
    pub mode: BotMode,
    pub webhook_host: String,
    pub webhook_port: u16,
    pub max_file_mb: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotMode {
    Polling,
    Webhook,
}

/// Pre-namespacing variable names, mapped onto their settings keys.
const LEGACY_VARIABLES: [(&str, &str); 4] = [
    ("GOOGLE_AI_API_KEY", "llm.api_key"),
    ("TELEGRAM_BOT_TOKEN", "bot.token"),
    ("API_URL", "bot.api_url"),
    ("SERVER_PORT", "server.port"),
];

impl Settings {
    /// Loads settings for `APP_ENVIRONMENT` from the working directory and
    /// the process environment.
    pub fn load() -> Result<(Environment, Self), ConfigError> {
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(ConfigError::Message)?;

        let settings = Self::load_from(environment, Path::new("."), None)?;
        Ok((environment, settings))
    }

    /// Layers, lowest precedence first: built-in defaults,
    /// `appsettings.<env>.toml` in `config_dir` (optional), `APP__SECTION__KEY`
    /// variables, then the legacy variables. `vars` replaces the process
    /// environment when given.
    pub fn load_from(
        environment: Environment,
        config_dir: &Path,
        vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let settings_file = config_dir.join(environment.settings_file());

        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.max_upload_mb", 10)?
            .set_default("llm.provider", "gemini")?
            .set_default("llm.model", "gemini-1.5-flash")?
            .set_default("llm.request_timeout_secs", 60)?
            .set_default("documents.default_doc_id", "demo-doc")?
            .set_default("documents.max_prompt_chars", 50_000)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("bot.api_url", "http://localhost:3000/api")?
            .set_default("bot.telegram_api_base", "https://api.telegram.org")?
            .set_default("bot.mode", "polling")?
            .set_default("bot.webhook_host", "0.0.0.0")?
            .set_default("bot.webhook_port", 3001)?
            .set_default("bot.max_file_mb", 10)?
            .set_default("bot.request_timeout_secs", 120)?
            .add_source(File::with_name(&settings_file.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars.clone()),
            );

        for (variable, key) in LEGACY_VARIABLES {
            let value = match &vars {
                Some(vars) => vars.get(variable).cloned(),
                None => std::env::var(variable).ok(),
            };
            builder = builder.set_override_option(key, value.filter(|v| !v.trim().is_empty()))?;
        }

        builder.build()?.try_deserialize()
    }
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        (self.max_upload_mb * MEGABYTE) as usize
    }
}

impl CacheSettings {
    pub fn eviction_policy(&self) -> EvictionPolicy {
        EvictionPolicy {
            ttl: self.ttl_seconds.map(Duration::from_secs),
            max_entries: self.max_entries,
        }
    }
}

impl BotSettings {
    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_mb * MEGABYTE
    }
}
