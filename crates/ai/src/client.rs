//! HTTP client for the chat-completions API.
//!
//! One [`AiClient`] serves all AI endpoints: one-shot email generation,
//! HTML improvement, and the streaming chat proxy. The one-shot paths go
//! through [`with_retry`]; the streaming path does not retry (a broken
//! stream cannot be resumed transparently).

use std::time::Duration;

use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::parse::{parse_composed_email, strip_code_fences, GeneratedEmail};
use crate::retry::{with_retry, RetryPolicy};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default chat model when `OPENAI_MODEL` is not set.
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default API base when `OPENAI_BASE_URL` is not set.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Per-request timeout for the upstream HTTP call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Buffered fragments between the upstream reader and the SSE writer.
const STREAM_CHANNEL_CAPACITY: usize = 32;

/// System instruction for one-shot email generation. The parser depends
/// on the literal `Subject:` / `Content:` markers requested here.
const GENERATE_SYSTEM_PROMPT: &str =
    "You are an expert email copywriter for a software consultancy. \
     Write a professional outreach email for the request you are given. \
     Respond in exactly this format, with no other text:\n\
     Subject: <subject line>\n\
     Content: <the email body as HTML>";

/// System instruction for improving existing HTML content.
const IMPROVE_SYSTEM_PROMPT: &str =
    "You are an expert email copywriter. You will be given the HTML of an \
     existing email and an instruction. Apply the instruction and return \
     only the full improved HTML, with no surrounding prose and no code \
     fences.";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the AI composition client.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("AI request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-2xx status.
    #[error("AI service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The response did not match the expected format.
    #[error("Unexpected AI response format: {0}")]
    Format(String),
}

impl AiError {
    /// Transient upstream failures worth retrying: rate limiting and
    /// temporary unavailability. Everything else propagates immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AiError::Service {
                status: 429 | 503,
                ..
            }
        )
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the AI client.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Bearer token for the upstream API.
    pub api_key: String,
    /// Chat model identifier.
    pub model: String,
    /// API base URL, without a trailing slash.
    pub base_url: String,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `OPENAI_API_KEY` is not set, signalling that the
    /// AI endpoints are not configured and should fail.
    ///
    /// | Variable          | Required | Default                      |
    /// |-------------------|----------|------------------------------|
    /// | `OPENAI_API_KEY`  | yes      | —                            |
    /// | `OPENAI_MODEL`    | no       | `gpt-3.5-turbo`              |
    /// | `OPENAI_BASE_URL` | no       | `https://api.openai.com/v1`  |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;
        Some(Self {
            api_key,
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Upstream error body: `{ "error": { "message": ... } }`.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the external generative text service.
pub struct AiClient {
    client: reqwest::Client,
    config: AiConfig,
    retry: RetryPolicy,
}

impl AiClient {
    /// Create a client with the default retry policy.
    pub fn new(config: AiConfig) -> Self {
        Self::with_retry_policy(config, RetryPolicy::default())
    }

    /// Create a client with an explicit retry policy.
    pub fn with_retry_policy(config: AiConfig, retry: RetryPolicy) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            config,
            retry,
        }
    }

    /// Generate a subject/content pair from a free-form prompt.
    pub async fn generate_email(&self, prompt: &str) -> Result<GeneratedEmail, AiError> {
        let raw = self.chat(GENERATE_SYSTEM_PROMPT, prompt).await?;
        parse_composed_email(&raw)
    }

    /// Apply an instruction to existing email HTML and return the cleaned
    /// result.
    pub async fn improve_content(
        &self,
        html: &str,
        instruction: &str,
    ) -> Result<String, AiError> {
        let user = format!("Instruction: {instruction}\n\nExisting email HTML:\n{html}");
        let raw = self.chat(IMPROVE_SYSTEM_PROMPT, &user).await?;
        Ok(strip_code_fences(&raw))
    }

    /// One complete (non-streaming) chat call with retries.
    async fn chat(&self, system: &str, user: &str) -> Result<String, AiError> {
        with_retry(&self.retry, AiError::is_retryable, || {
            self.chat_once(system, user)
        })
        .await
    }

    async fn chat_once(&self, system: &str, user: &str) -> Result<String, AiError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::service_error(status.as_u16(), response).await);
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AiError::Format("response has no message content".to_string()))
    }

    /// Start a streaming chat completion.
    ///
    /// Returns a channel yielding one text fragment per upstream delta
    /// chunk. An upstream failure before the stream opens surfaces as the
    /// returned error; a failure mid-stream is delivered as the final
    /// channel item.
    pub async fn chat_stream(
        &self,
        system: &str,
        user: &str,
    ) -> Result<mpsc::Receiver<Result<String, AiError>>, AiError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            stream: true,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::service_error(status.as_u16(), response).await);
        }

        let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);
        tokio::spawn(forward_stream(response, tx));
        Ok(rx)
    }

    /// Decode a non-2xx response into a service error, preferring the
    /// structured `error.message` body when present.
    async fn service_error(status: u16, response: reqwest::Response) -> AiError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        AiError::Service { status, message }
    }
}

// ---------------------------------------------------------------------------
// Stream handling
// ---------------------------------------------------------------------------

/// Read the upstream SSE body and forward text fragments to the channel.
///
/// Ends on `[DONE]`, on upstream close, or when the receiver goes away.
async fn forward_stream(
    response: reqwest::Response,
    tx: mpsc::Sender<Result<String, AiError>>,
) {
    let mut body = response.bytes_stream();
    let mut buffer = String::new();

    while let Some(chunk) = body.next().await {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(err) => {
                let _ = tx.send(Err(AiError::Http(err))).await;
                return;
            }
        };

        buffer.push_str(&String::from_utf8_lossy(&bytes));

        // Upstream events are separated by a blank line.
        while let Some(boundary) = buffer.find("\n\n") {
            let event: String = buffer.drain(..boundary + 2).collect();
            for line in event.lines() {
                let Some(payload) = line.strip_prefix("data: ") else {
                    continue;
                };
                if payload == "[DONE]" {
                    return;
                }
                if let Some(fragment) = extract_delta(payload) {
                    if tx.send(Ok(fragment)).await.is_err() {
                        return;
                    }
                }
            }
        }
    }
}

/// Pull the incremental text fragment out of one streamed chunk, if any.
///
/// Chunks without a text delta (role preludes, finish markers) yield
/// `None` and are skipped.
fn extract_delta(payload: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(payload).ok()?;
    let fragment = value
        .get("choices")?
        .get(0)?
        .get("delta")?
        .get("content")?
        .as_str()?;
    (!fragment.is_empty()).then(|| fragment.to_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_and_unavailable_are_retryable() {
        for status in [429, 503] {
            let err = AiError::Service {
                status,
                message: "busy".to_string(),
            };
            assert!(err.is_retryable(), "status {status} should be retryable");
        }
    }

    #[test]
    fn other_failures_are_not_retryable() {
        let err = AiError::Service {
            status: 400,
            message: "bad request".to_string(),
        };
        assert!(!err.is_retryable());

        let err = AiError::Format("nope".to_string());
        assert!(!err.is_retryable());
    }

    #[test]
    fn extract_delta_returns_the_text_fragment() {
        let payload = r#"{"choices":[{"delta":{"content":"Hel"}}]}"#;
        assert_eq!(extract_delta(payload), Some("Hel".to_string()));
    }

    #[test]
    fn extract_delta_skips_role_preludes() {
        let payload = r#"{"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert_eq!(extract_delta(payload), None);
    }

    #[test]
    fn extract_delta_skips_empty_fragments() {
        let payload = r#"{"choices":[{"delta":{"content":""}}]}"#;
        assert_eq!(extract_delta(payload), None);
    }

    #[test]
    fn extract_delta_ignores_malformed_json() {
        assert_eq!(extract_delta("not json"), None);
    }
}
