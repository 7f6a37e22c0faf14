use async_trait::async_trait;
use dotenv::dotenv;
use reqwest::Client;
use std::env;
use thiserror::Error;

use super::endpoints::{
    GeminiAvailableModel, GenerateContentRequest, GenerateContentResponse, Provider,
    ResponseSchema, DEFAULT_GEMINI_MODEL, GEMINI_BASE_URL, GEMINI_MODELS,
};

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("API error {status}: {error_body}")]
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
    #[error("API returned no text content")]
    EmptyResponse,
}

/// Anything that can turn a prompt plus a response schema into raw model text.
///
/// `Provider` is the production implementation; tests substitute canned responses.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate_json(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
    ) -> Result<String, ApiConnectionError>;
}

impl Provider {
    pub fn gemini(api_key_env_var_name: &str) -> Self {
        dotenv().ok();
        Self::Gemini {
            api_key: api_key_env_var_name.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_model(self, model_name: &str) -> Self {
        match self {
            Provider::Gemini {
                api_key, base_url, ..
            } => Provider::Gemini {
                api_key,
                model: model_name.to_string(),
                base_url,
            },
        }
    }

    pub fn with_base_url(self, url: &str) -> Self {
        match self {
            Provider::Gemini { api_key, model, .. } => Provider::Gemini {
                api_key,
                model,
                base_url: url.trim_end_matches('/').to_string(),
            },
        }
    }

    pub fn get_available_models(&self) -> Vec<GeminiAvailableModel> {
        match self {
            Provider::Gemini { .. } => GEMINI_MODELS.to_vec(),
        }
    }

    /// Resolves the credential without touching the network.
    pub fn api_key(&self) -> Result<String, ApiConnectionError> {
        match self {
            Provider::Gemini {
                api_key: api_key_env_var_name,
                ..
            } => {
                dotenv().ok();
                env::var(api_key_env_var_name)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| ApiConnectionError::MissingApiKey(api_key_env_var_name.clone()))
            }
        }
    }

    pub async fn call_generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiConnectionError> {
        match self {
            Provider::Gemini {
                model, base_url, ..
            } => {
                let actual_api_key = self.api_key()?;

                let client = Client::new();
                let url = format!("{}/v1beta/models/{}:generateContent", base_url, model);
                tracing::debug!(%model, "sending generateContent request");

                let response = client
                    .post(&url)
                    .header("x-goog-api-key", actual_api_key)
                    .header("Content-Type", "application/json")
                    .json(request)
                    .send()
                    .await?;

                if response.status().is_success() {
                    let body = response.json::<GenerateContentResponse>().await?;
                    if let Some(usage) = &body.usage_metadata {
                        tracing::debug!(
                            prompt_tokens = ?usage.prompt_token_count,
                            total_tokens = ?usage.total_token_count,
                            "generateContent completed"
                        );
                    }
                    Ok(body)
                } else {
                    let status = response.status();
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read error body".to_string());
                    tracing::warn!(%status, "generateContent rejected");
                    Err(ApiConnectionError::ApiError { status, error_body })
                }
            }
        }
    }
}

#[async_trait]
impl GenerativeModel for Provider {
    async fn generate_json(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
    ) -> Result<String, ApiConnectionError> {
        let request = GenerateContentRequest::json(prompt, schema.clone());
        let response = self.call_generate_content(&request).await?;
        response.text().ok_or(ApiConnectionError::EmptyResponse)
    }
}
