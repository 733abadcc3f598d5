use std::sync::Arc;

use async_trait::async_trait;
use openai_dive::v1::resources::{
    chat::{ChatCompletionParameters, ChatCompletionResponse},
    model::ListModelResponse,
};
use serde_json::Value;

use crate::api::{ApiClient, ChainedHooks, JsonHooks};
use crate::embedding::{EmbeddingRequest, EmbeddingResponse};
use crate::provider::{EnvVar, LlmError, LlmProvider, LlmStream, ProviderInfo};
use super::parse_model_list;

pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Ollama's compatibility layer predates `max_completion_tokens`
pub struct OllamaHooks;

#[async_trait]
impl JsonHooks for OllamaHooks {
    async fn before_send(&self, mut json: Value) -> Result<Value, LlmError> {
        if let Some(obj) = json.as_object_mut() {
            if let Some(limit) = obj.remove("max_completion_tokens") {
                obj.entry("max_tokens").or_insert(limit);
            }
        }
        Ok(json)
    }
}

pub struct OllamaProvider {
    api: ApiClient,
    hooks: Arc<dyn JsonHooks>,
}

impl OllamaProvider {
    /// `base_url` is the server root; the OpenAI compatible API lives under `/v1`
    pub fn new(base_url: Option<String>) -> Self {
        let root = base_url.unwrap_or_else(|| OLLAMA_BASE_URL.to_string());
        let root = root.trim_end_matches('/').trim_end_matches("/v1");
        Self {
            api: ApiClient::new(String::new(), format!("{}/v1", root)),
            hooks: Arc::new(OllamaHooks),
        }
    }

    /// Create Ollama provider from environment variables
    /// Returns None if OLLAMA_BASE_URL is not set
    pub fn from_env() -> Option<Self> {
        std::env::var("OLLAMA_BASE_URL").ok().filter(|v| !v.is_empty()).map(|url| Self::new(Some(url)))
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn models(&self) -> Result<ListModelResponse, LlmError> {
        let listing = self.api.get_json("models").await?;
        parse_model_list(listing)
    }

    async fn default_model(&self) -> Result<String, LlmError> {
        Ok("phi4-mini".to_string())
    }

    async fn chat_with_hooks(&self, request: ChatCompletionParameters, hooks: &dyn JsonHooks) -> Result<ChatCompletionResponse, LlmError> {
        let hooks = ChainedHooks { first: self.hooks.as_ref(), second: hooks };
        self.api.chat_completion(&request, &hooks).await
    }

    async fn chat_stream(&self, mut request: ChatCompletionParameters) -> Result<LlmStream, LlmError> {
        request.stream = Some(true);
        self.api.chat_completion_stream(&request, self.hooks.clone()).await
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, LlmError> {
        self.api.embeddings(&request).await
    }

    fn supports_functions(&self, _model: &str) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "ollama"
    }

    fn info() -> ProviderInfo {
        ProviderInfo {
            name: "ollama",
            display_name: "Ollama",
            env_vars: vec![
                EnvVar::optional("OLLAMA_BASE_URL", "Ollama server (defaults to http://localhost:11434)"),
            ],
        }
    }
}
