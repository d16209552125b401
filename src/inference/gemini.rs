use reqwest::Client;

use crate::{
    config::InferenceSettings,
    error::ProviderError,
    types::{GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest, GeminiResponse},
};

/// Primary provider: Google Gemini `generateContent` in JSON mode.
pub struct GeminiProvider {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(client: Client, settings: &InferenceSettings) -> Self {
        Self {
            client,
            api_url: settings.gemini_api_url.clone(),
            api_key: settings.gemini_api_key.clone(),
            model: settings.gemini_model.clone(),
        }
    }

    /// Sends `prompt` as a single user turn and returns the first text part.
    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{uri}/models/{model}:generateContent",
            uri = self.api_url,
            model = self.model
        );
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GeminiResponse = res.json().await?;
        payload
            .candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .find_map(|part| part.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }
}
