//! Chat Client — the single point of entry for calls to the AI gateway.
//!
//! Speaks the OpenAI-compatible `chat/completions` protocol. Transport errors and
//! 5xx responses are retried with exponential backoff; 429 and 402 are surfaced
//! immediately so the caller can tell the user.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Reply used when the gateway answers without any message content.
pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't process that.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited by AI gateway")]
    RateLimited,

    #[error("AI gateway requires payment")]
    PaymentRequired,
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::RateLimited => AppError::RateLimited,
            ChatError::PaymentRequired => AppError::PaymentRequired,
            other => AppError::Chat(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice, or the stock apology when there is none.
    pub fn reply(&self) -> String {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(EMPTY_REPLY)
            .to_string()
    }
}

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    api_key: String,
    url: String,
    model: String,
}

impl ChatClient {
    pub fn new(api_key: String, url: String, model: String) -> Result<Self, ChatError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            url,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one system + user exchange and returns the assistant's reply text.
    pub async fn complete(&self, system: &str, message: &str) -> Result<String, ChatError> {
        let request_body = CompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: message,
                },
            ],
        };

        let mut last_error: Option<ChatError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Chat call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ChatError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            match status.as_u16() {
                429 => return Err(ChatError::RateLimited),
                402 => return Err(ChatError::PaymentRequired),
                _ => {}
            }

            if status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("AI gateway returned {}: {}", status, body);
                last_error = Some(ChatError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ChatError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let completion: CompletionResponse = response.json().await?;
            debug!("Chat call succeeded with {} choice(s)", completion.choices.len());

            return Ok(completion.reply());
        }

        Err(last_error.unwrap_or(ChatError::Api {
            status: 503,
            message: format!("no response after {MAX_RETRIES} attempts"),
        }))
    }
}
