use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::{self, Write};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::{json, Value};
use tokio::time::sleep;

use crate::config::ApiConfig;
use crate::error::HarvestError;
use crate::model::{BotReply, Recipe};

use super::RecipeSource;

/// Client for the Coze open chat API.
pub struct CozeClient {
    client: Client,
    base_url: String,
    bot_id: String,
    token: Option<String>,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

impl CozeClient {
    /// Create a client from configuration.
    ///
    /// The token is taken from config, falling back to the COZE_API_TOKEN
    /// environment variable. Call [`ensure_token`] before starting a batch
    /// to fail fast when neither is set.
    ///
    /// [`ensure_token`]: CozeClient::ensure_token
    pub fn new(config: &ApiConfig) -> Result<Self, HarvestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(CozeClient {
            client,
            base_url: config.base_url.clone(),
            bot_id: config.bot_id.clone(),
            token: config
                .token
                .clone()
                .or_else(|| std::env::var("COZE_API_TOKEN").ok()),
            retry_attempts: config.retry_attempts.max(1),
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(token: String, base_url: String, bot_id: String) -> Self {
        CozeClient {
            client: Client::new(),
            base_url,
            bot_id,
            token: Some(token),
            retry_attempts: 1,
            retry_delay_ms: 0,
        }
    }

    /// Make sure a token is available, prompting on stdin when
    /// `interactive` is set.
    ///
    /// A token entered at the prompt is kept for subsequent requests.
    pub fn ensure_token(&mut self, interactive: bool) -> Result<(), HarvestError> {
        if self.token.is_some() {
            return Ok(());
        }
        if !interactive {
            return Err(HarvestError::MissingCredential);
        }

        println!("COZE_API_TOKEN is not set. You can set it with:");
        println!("  export COZE_API_TOKEN='your_token_here'    (Linux/macOS)");
        println!("  $env:COZE_API_TOKEN='your_token_here'      (Windows PowerShell)");
        println!("  set COZE_API_TOKEN=your_token_here         (Windows CMD)");
        println!();
        print!("Enter your Coze API token: ");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        let token = line.trim();
        if token.is_empty() {
            return Err(HarvestError::MissingCredential);
        }
        self.token = Some(token.to_string());
        Ok(())
    }

    /// One POST per attempt, with a linearly growing delay between
    /// transport failures. HTTP error statuses and parse failures are not
    /// retried.
    async fn request_with_retry(
        &self,
        url: &str,
        token: &str,
        payload: &Value,
    ) -> Result<Value, HarvestError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = self
                .client
                .post(url)
                .header("Authorization", format!("Bearer {token}"))
                .json(payload)
                .send()
                .await;

            match result {
                Ok(response) => {
                    debug!("response status: {}", response.status());
                    let response = response.error_for_status()?;
                    return Ok(response.json().await?);
                }
                Err(e) if attempt < self.retry_attempts => {
                    warn!(
                        "request failed (attempt {attempt}/{}): {e}",
                        self.retry_attempts
                    );
                    let delay = Duration::from_millis(self.retry_delay_ms * attempt as u64);
                    sleep(delay).await;
                }
                Err(e) => return Err(HarvestError::Http(e)),
            }
        }
    }
}

#[async_trait]
impl RecipeSource for CozeClient {
    fn source_name(&self) -> &str {
        "coze"
    }

    async fn fetch(&self, name: &str) -> Result<BotReply, HarvestError> {
        let token = self
            .token
            .as_ref()
            .ok_or(HarvestError::MissingCredential)?;
        let url = format!("{}/open_api/v2/chat", self.base_url);
        let payload = json!({
            "bot_id": self.bot_id,
            "user": user_tag(name),
            "query": name,
            "stream": false,
        });
        debug!("POST {url} query {name:?}");

        let envelope = self.request_with_retry(&url, token, &payload).await?;
        extract_answer(&envelope)
    }
}

/// Stable per-name user tag sent with each chat request.
fn user_tag(name: &str) -> String {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    format!("user_{}", hasher.finish() % 10_000_000)
}

/// Pull the assistant's answer out of a chat response envelope and try to
/// decode it as a recipe, falling back to the raw text.
fn extract_answer(envelope: &Value) -> Result<BotReply, HarvestError> {
    let messages = envelope["messages"]
        .as_array()
        .ok_or(HarvestError::NoAnswer)?;

    for message in messages {
        if message["role"] == "assistant" && message["type"] == "answer" {
            let content = message["content"].as_str().unwrap_or_default();
            return Ok(match serde_json::from_str::<Recipe>(content) {
                Ok(recipe) => BotReply::Recipe(recipe),
                Err(e) => {
                    debug!("answer content is not structured recipe data: {e}");
                    BotReply::Text(content.to_string())
                }
            });
        }
    }
    Err(HarvestError::NoAnswer)
}
