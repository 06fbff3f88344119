//! OpenAI chat completions client
//!
//! Async HTTP client for the OpenAI chat completions endpoint. The client
//! carries no credential of its own: the caller's API key is attached to each
//! request as a bearer token and forgotten afterwards. Transient provider
//! failures are retried up to a configured budget before surfacing.

use crate::core::provider::{Provider, ProviderError};
use crate::models::openai::{ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

/// Delay between retry attempts
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// OpenAI async client with bounded retries
pub struct OpenAIClient {
    client: Client,
    base_url: String,
    max_retries: u32,
}

impl OpenAIClient {
    /// Create a new OpenAI client
    ///
    /// # Arguments
    ///
    /// * `base_url` - API base URL, e.g. `https://api.openai.com/v1`
    /// * `timeout` - Per-attempt request timeout in seconds
    /// * `max_retries` - Retry budget for transient failures (0 disables)
    pub fn new(base_url: String, timeout: u64, max_retries: u32) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            max_retries,
        }
    }

    /// Classify provider error bodies into actionable messages
    fn classify_error(error_detail: &str) -> String {
        let error_lower = error_detail.to_lowercase();

        if error_lower.contains("invalid_api_key") || error_lower.contains("unauthorized") {
            return "Invalid API key. Please check the key you provided.".to_string();
        }

        if error_lower.contains("rate_limit") || error_lower.contains("quota") {
            return "Rate limit exceeded. Please wait and try again, or upgrade your API plan."
                .to_string();
        }

        if error_lower.contains("model")
            && (error_lower.contains("not found") || error_lower.contains("does not exist"))
        {
            return "Model not found. Please check the configured model name.".to_string();
        }

        if error_lower.contains("billing") || error_lower.contains("payment") {
            return "Billing issue. Please check your provider account billing status.".to_string();
        }

        error_detail.to_string()
    }

    /// Single request attempt, no retry handling
    async fn send_completion_request(
        &self,
        request: &ChatCompletionRequest,
        api_key: &str,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let classified_error = Self::classify_error(&error_text);

            return Err(match status.as_u16() {
                401 => ProviderError::Authentication(classified_error),
                429 => ProviderError::RateLimit(classified_error),
                400 => ProviderError::BadRequest(classified_error),
                _ => ProviderError::ApiError {
                    status: status.as_u16(),
                    message: classified_error,
                },
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unexpected(format!("Failed to parse response: {}", e)))?;

        Ok(completion)
    }
}

#[async_trait]
impl Provider for OpenAIClient {
    async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
        api_key: &str,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let mut attempt = 0;
        loop {
            match self.send_completion_request(request, api_key).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "Transient provider error (attempt {}/{}): {}",
                        attempt, self.max_retries, e
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn provider_name(&self) -> &str {
        "OpenAI"
    }
}
