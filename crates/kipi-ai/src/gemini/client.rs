//! Gemini API client struct, request building, and response parsing.

use kipi_common::GenerationConfig;

use crate::AiError;

use super::config::GeminiConfig;

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub(crate) fn api_url(&self, model: &str) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            model
        )
    }

    /// Build the JSON request body for a single-prompt call.
    ///
    /// Only the current prompt is sent; earlier turns are not replayed.
    pub(crate) fn build_request_body(
        &self,
        prompt: &str,
        generation: &GenerationConfig,
    ) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "maxOutputTokens": generation.max_output_tokens,
                "temperature": generation.temperature,
            }
        })
    }

    /// Extract the reply text from a `generateContent` response.
    pub(crate) fn parse_response(&self, json: &serde_json::Value) -> Result<String, AiError> {
        let candidates = json["candidates"]
            .as_array()
            .ok_or_else(|| AiError::ParseError("no candidates in response".to_string()))?;

        let first = candidates
            .first()
            .ok_or_else(|| AiError::ParseError("empty candidates".to_string()))?;

        let mut content = String::new();
        if let Some(parts) = first["content"]["parts"].as_array() {
            for part in parts {
                if let Some(text) = part["text"].as_str() {
                    content.push_str(text);
                }
            }
        }

        if content.is_empty() {
            let reason = first["finishReason"].as_str().unwrap_or("UNKNOWN");
            return Err(AiError::ParseError(format!(
                "response contained no text (finishReason: {reason})"
            )));
        }

        Ok(content)
    }
}
