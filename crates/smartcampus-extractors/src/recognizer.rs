//! Optional higher-accuracy text recognition for PDFs.
//!
//! A [`TextRecognizer`] is asked to transcribe a document reachable at a
//! public URL. The pipeline treats any failure, timeout, or short answer as
//! "not available" and falls back to the byte scanner.

use async_trait::async_trait;

use crate::error::ExtractResult;

/// External text-recognition capability.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Transcribe the document at `public_url`. `Ok(None)` means no text.
    async fn recognize_text(&self, public_url: &str) -> ExtractResult<Option<String>>;

    /// Human-readable name for this recognizer.
    fn name(&self) -> &str;
}

#[cfg(feature = "vision")]
pub use vision::{VisionConfig, VisionTextRecognizer};

#[cfg(feature = "vision")]
mod vision {
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::Client;
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Serialize};
    use tracing::debug;

    use super::TextRecognizer;
    use crate::error::{ExtractError, ExtractResult};

    const DEFAULT_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";
    const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
    const DEFAULT_PROMPT: &str = "Extract all the text content from this PDF document. \
                                  Return only the extracted text, nothing else.";

    /// Configuration for the vision recognizer.
    #[derive(Debug, Clone)]
    pub struct VisionConfig {
        /// Bearer key for the completion endpoint.
        pub api_key: SecretString,
        /// Base URL of an OpenAI-compatible API.
        pub base_url: String,
        /// Model to use (default: google/gemini-2.5-flash).
        pub model: String,
        /// Custom prompt (optional).
        pub prompt: Option<String>,
        /// HTTP request timeout.
        pub request_timeout: Duration,
    }

    impl VisionConfig {
        /// Create a config with default endpoint and model.
        pub fn new(api_key: impl Into<String>) -> Self {
            Self {
                api_key: SecretString::new(api_key.into()),
                base_url: DEFAULT_BASE_URL.to_string(),
                model: DEFAULT_MODEL.to_string(),
                prompt: None,
                request_timeout: Duration::from_secs(120),
            }
        }

        /// Load from environment. Returns `None` when no API key is set.
        pub fn from_env() -> Option<Self> {
            let api_key = std::env::var("SMARTCAMPUS_VISION_API_KEY").ok()?;
            if api_key.trim().is_empty() {
                return None;
            }
            let mut config = Self::new(api_key);

            if let Ok(base_url) = std::env::var("SMARTCAMPUS_VISION_BASE_URL") {
                config.base_url = base_url.trim_end_matches('/').to_string();
            }

            if let Ok(model) = std::env::var("SMARTCAMPUS_VISION_MODEL") {
                config.model = model;
            }

            Some(config)
        }
    }

    #[derive(Debug, Serialize)]
    struct CompletionRequest<'a> {
        model: &'a str,
        messages: Vec<CompletionMessage<'a>>,
    }

    #[derive(Debug, Serialize)]
    struct CompletionMessage<'a> {
        role: &'a str,
        content: Vec<ContentPart<'a>>,
    }

    #[derive(Debug, Serialize)]
    #[serde(tag = "type", rename_all = "snake_case")]
    enum ContentPart<'a> {
        Text { text: &'a str },
        ImageUrl { image_url: ImageUrl<'a> },
    }

    #[derive(Debug, Serialize)]
    struct ImageUrl<'a> {
        url: &'a str,
    }

    #[derive(Debug, Deserialize)]
    struct CompletionResponse {
        #[serde(default)]
        choices: Vec<CompletionChoice>,
    }

    #[derive(Debug, Deserialize)]
    struct CompletionChoice {
        message: CompletionChoiceMessage,
    }

    #[derive(Debug, Deserialize)]
    struct CompletionChoiceMessage {
        content: Option<String>,
    }

    /// Recognizer backed by a vision-capable chat-completion model.
    pub struct VisionTextRecognizer {
        client: Client,
        config: VisionConfig,
    }

    impl VisionTextRecognizer {
        /// Create a recognizer from configuration.
        pub fn new(config: VisionConfig) -> ExtractResult<Self> {
            let client = Client::builder()
                .timeout(config.request_timeout)
                .build()
                .map_err(|e| {
                    ExtractError::EnhancementUnavailable(format!(
                        "Failed to create HTTP client: {}",
                        e
                    ))
                })?;

            Ok(Self { client, config })
        }

        /// Create a recognizer from environment, if configured.
        pub fn from_env() -> Option<ExtractResult<Self>> {
            VisionConfig::from_env().map(Self::new)
        }

        fn prompt(&self) -> &str {
            self.config.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
        }

        fn build_request<'a>(&'a self, public_url: &'a str) -> CompletionRequest<'a> {
            CompletionRequest {
                model: &self.config.model,
                messages: vec![CompletionMessage {
                    role: "user",
                    content: vec![
                        ContentPart::Text {
                            text: self.prompt(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl { url: public_url },
                        },
                    ],
                }],
            }
        }
    }

    #[async_trait]
    impl TextRecognizer for VisionTextRecognizer {
        async fn recognize_text(&self, public_url: &str) -> ExtractResult<Option<String>> {
            let request = self.build_request(public_url);

            let response = self
                .client
                .post(format!("{}/chat/completions", self.config.base_url))
                .bearer_auth(self.config.api_key.expose_secret())
                .json(&request)
                .send()
                .await
                .map_err(|e| {
                    ExtractError::EnhancementUnavailable(format!("Request failed: {}", e))
                })?;

            let status = response.status();
            let body = response.text().await.map_err(|e| {
                ExtractError::EnhancementUnavailable(format!(
                    "Failed to read response body: {}",
                    e
                ))
            })?;

            if !status.is_success() {
                return Err(ExtractError::EnhancementUnavailable(format!(
                    "Recognizer API error ({}): {}",
                    status, body
                )));
            }

            let response: CompletionResponse = serde_json::from_str(&body).map_err(|e| {
                ExtractError::EnhancementUnavailable(format!("Failed to parse response: {}", e))
            })?;

            let text = response
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .filter(|t| !t.trim().is_empty());

            debug!(
                model = %self.config.model,
                chars = text.as_ref().map(|t| t.chars().count()).unwrap_or(0),
                "Recognizer responded"
            );

            Ok(text)
        }

        fn name(&self) -> &str {
            "vision-llm"
        }
    }

}
