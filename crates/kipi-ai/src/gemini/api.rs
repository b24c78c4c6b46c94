//! ModelClient implementation for GeminiClient.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use kipi_common::GenerationConfig;

use crate::outcome::{demo_reply, is_offline_credential, CallResult};
use crate::{AiError, ModelClient};

use super::client::GeminiClient;

impl GeminiClient {
    /// Issue exactly one `generateContent` request.
    async fn send(
        &self,
        prompt: &str,
        generation: &GenerationConfig,
        credential: &str,
    ) -> Result<String, AiError> {
        let body = self.build_request_body(prompt, generation);
        let url = self.api_url(&generation.model);

        debug!(
            model = %generation.model,
            temperature = generation.temperature,
            max_output_tokens = generation.max_output_tokens,
            "Gemini API request"
        );

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", credential)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout(e.to_string())
                } else {
                    AiError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::RateLimited(format!("HTTP {status}: {text}")));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        self.parse_response(&json)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
        credential: &str,
    ) -> CallResult {
        if is_offline_credential(credential) {
            info!("no API key configured, returning demo reply");
            return CallResult::Success(demo_reply(prompt));
        }

        match self.send(prompt, config, credential.trim()).await {
            Ok(text) => CallResult::Success(text),
            Err(e) => {
                let result = CallResult::failure(e.to_string(), prompt);
                if let Some(kind) = result.error_kind() {
                    warn!(%kind, "Gemini call failed: {e}");
                }
                result
            }
        }
    }
}
