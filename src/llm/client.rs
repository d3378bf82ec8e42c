use crate::error::{DecoderError, Result};
use crate::llm::types::*;
use crate::llm::CompletionModel;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    /// Points the client at a different API root (proxies, local gateways).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
    ) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let payload = GenerateContentRequest::from_prompt(prompt, temperature);

        debug!("Requesting completion from {} ({} prompt bytes)", model, prompt.len());
        // The key travels in a header; transport errors never carry it.
        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| e.without_url())?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await.map_err(|e| e.without_url())?;
            return Err(DecoderError::CompletionFailed(format!(
                "Gemini API Error (status {}): {}",
                status, err_text
            )));
        }

        let body: GenerateContentResponse = res.json().await.map_err(|e| e.without_url())?;
        body.text().ok_or_else(|| {
            DecoderError::CompletionFailed("Model returned no text content".to_string())
        })
    }
}

#[async_trait]
impl CompletionModel for GeminiClient {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String> {
        self.generate_content(request.model, request.prompt, request.temperature)
            .await
    }
}
