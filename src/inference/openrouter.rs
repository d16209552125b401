use reqwest::Client;

use crate::{
    config::InferenceSettings,
    error::ProviderError,
    types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat},
};

/// Fallback provider: OpenRouter chat completions with a JSON response format.
pub struct OpenRouterProvider {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
    referer: Option<String>,
}

impl OpenRouterProvider {
    pub fn new(client: Client, settings: &InferenceSettings) -> Self {
        Self {
            client,
            api_url: settings.openrouter_api_url.clone(),
            api_key: settings.openrouter_api_key.clone(),
            model: settings.openrouter_model.clone(),
            referer: settings.openrouter_referer.clone(),
        }
    }

    /// Sends `prompt` as a single user message and returns the first choice's content.
    ///
    /// # Errors
    ///
    /// [`ProviderError::MissingCredential`] without sending anything when no
    /// API key is configured.
    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("OPENROUTER_API_KEY"))?;

        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            response_format: ResponseFormat {
                kind: "json_object".to_string(),
            },
        };

        let mut req = self
            .client
            .post(format!("{uri}/chat/completions", uri = self.api_url))
            .bearer_auth(api_key)
            .json(&body);
        if let Some(referer) = &self.referer {
            req = req.header("HTTP-Referer", referer);
        }

        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: ChatCompletionResponse = res.json().await?;
        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }
}
