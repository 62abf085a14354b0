use serde::{Deserialize, Serialize};

pub const DEFAULT_PROVIDER_URL: &str = "https://api.deepseek.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_EXPLORER_URL: &str = "https://api.mainnet.hiro.so";

/// Process-wide configuration, resolved once at startup and shared read-only.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub explorer: ExplorerConfig,
    pub server: ServerConfig,
    pub prompts: PromptsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Empty means "not configured"; the gateway refuses to call out.
    pub api_key: String,
    /// Full chat-completions endpoint URL.
    pub api_url: String,
    pub model: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_PROVIDER_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ProviderConfig {
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.api_url.trim().is_empty()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub base_url: String,
    pub events_limit: u32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_EXPLORER_URL.to_string(),
            events_limit: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            api_token: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PromptsConfig {
    /// Directory of `<route>.txt` files overriding built-in system prompts.
    pub directory: Option<String>,
}
