use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct HarvestConfig {
    /// Chat API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Workbook store settings
    #[serde(default)]
    pub store: StoreConfig,
}

/// Configuration for the Coze chat API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Bot addressed by every chat request
    #[serde(default = "default_bot_id")]
    pub bot_id: String,
    /// Base URL of the API endpoint (for custom or proxy endpoints)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API token (can also be set via the COZE_API_TOKEN environment variable)
    pub token: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Number of attempts per request before giving up
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Initial delay between retries in milliseconds (grows with each attempt)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bot_id: default_bot_id(),
            base_url: default_base_url(),
            token: None,
            timeout: default_timeout(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Configuration for the workbook store and batch input
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Workbook file the batch appends to
    #[serde(default = "default_store_path")]
    pub path: String,
    /// Names file read by the batch driver, one recipe name per line
    #[serde(default = "default_names_file")]
    pub names_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            names_file: default_names_file(),
        }
    }
}

// Default value functions
fn default_bot_id() -> String {
    "7487100580821893160".to_string()
}

fn default_base_url() -> String {
    "https://api.coze.cn".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_store_path() -> String {
    "data/database.json".to_string()
}

fn default_names_file() -> String {
    "recipes.txt".to_string()
}

impl HarvestConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with HARVEST__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: HARVEST__API__BOT_ID
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Environment variables with HARVEST prefix
            // Use double underscore for nested: HARVEST__API__TIMEOUT
            .add_source(
                Environment::with_prefix("HARVEST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
