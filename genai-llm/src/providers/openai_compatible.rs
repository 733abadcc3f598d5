use std::sync::Arc;

use async_trait::async_trait;
use openai_dive::v1::resources::{
    chat::{ChatCompletionParameters, ChatCompletionResponse},
    model::ListModelResponse,
};

use crate::api::{ApiClient, ChainedHooks, JsonHooks, NoHooks};
use crate::embedding::{EmbeddingRequest, EmbeddingResponse};
use crate::provider::{EnvVar, LlmError, LlmProvider, LlmStream, ProviderInfo};
use super::{parse_model_list, single_model};

/// Any server speaking the OpenAI chat completions protocol
pub struct OpenAICompatibleProvider {
    api: ApiClient,
    model: Option<String>,
    hooks: Arc<dyn JsonHooks>,
}

impl OpenAICompatibleProvider {
    pub fn new(api_key: String, base_url: String, model: Option<String>) -> Self {
        Self {
            api: ApiClient::new(api_key, base_url),
            model,
            hooks: Arc::new(NoHooks),
        }
    }

    /// Create provider from environment variables
    /// Returns None if OPENAI_COMPATIBLE_BASE_URL is not set
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("OPENAI_COMPATIBLE_BASE_URL").ok().filter(|v| !v.is_empty())?;
        let api_key = std::env::var("OPENAI_COMPATIBLE_API_KEY").unwrap_or_default();
        let model = std::env::var("OPENAI_COMPATIBLE_MODEL").ok().filter(|v| !v.is_empty());
        Some(Self::new(api_key, base_url, model))
    }
}

#[async_trait]
impl LlmProvider for OpenAICompatibleProvider {
    async fn models(&self) -> Result<ListModelResponse, LlmError> {
        match &self.model {
            Some(model) => single_model(model, "openai_compatible"),
            None => parse_model_list(self.api.get_json("models").await?),
        }
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
        "openai_compatible"
    }

    fn info() -> ProviderInfo {
        ProviderInfo {
            name: "openai_compatible",
            display_name: "OpenAI Compatible",
            env_vars: vec![
                EnvVar::required("OPENAI_COMPATIBLE_BASE_URL", "Base URL of the API, including /v1"),
                EnvVar::optional("OPENAI_COMPATIBLE_API_KEY", "API key, if the server wants one"),
                EnvVar::optional("OPENAI_COMPATIBLE_MODEL", "Model to use"),
            ],
        }
    }
}
