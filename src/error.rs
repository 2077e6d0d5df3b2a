use thiserror::Error;

/// Errors that can occur while fetching or archiving recipes
#[derive(Error, Debug)]
pub enum HarvestError {
    /// No API token in configuration, environment, or interactive input
    #[error("No Coze API token found; set COZE_API_TOKEN or api.token in config")]
    MissingCredential,

    /// HTTP transport or status failure talking to the bot API
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response envelope carried no assistant answer message
    #[error("No answer message found in the bot reply")]
    NoAnswer,

    /// Bot answered with plain text instead of structured recipe data
    #[error("Bot reply was not structured recipe data: {0}")]
    UnstructuredReply(String),

    /// Reply decoded but lacked required recipe attributes
    #[error("Recipe is missing required fields: {0}")]
    MissingFields(String),

    /// JSON serialization or deserialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading the names file or the workbook store failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Workbook store is structurally invalid
    #[error("Store error: {0}")]
    Store(String),
}
