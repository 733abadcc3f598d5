use std::sync::Arc;

use async_trait::async_trait;
use openai_dive::v1::resources::{
    chat::{ChatCompletionParameters, ChatCompletionResponse},
    model::ListModelResponse,
};

use crate::api::{ApiClient, ChainedHooks, JsonHooks, NoHooks};
use crate::embedding::{EmbeddingRequest, EmbeddingResponse};
use crate::image::{ImageGenerationRequest, ImageGenerationResponse};
use crate::provider::{EnvVar, LlmError, LlmProvider, LlmStream, ProviderInfo};
use super::parse_model_list;

pub struct OpenAIProvider {
    api: ApiClient,
    hooks: Arc<dyn JsonHooks>,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api: ApiClient::new(api_key, "https://api.openai.com/v1".to_string()),
            hooks: Arc::new(NoHooks),
        }
    }

    /// Create OpenAI provider from environment variables
    /// Returns None if OPENAI_API_KEY is not set
    pub fn from_env() -> Option<Self> {
        std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()).map(Self::new)
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    async fn models(&self) -> Result<ListModelResponse, LlmError> {
        let listing = self.api.get_json("models").await?;
        parse_model_list(listing)
    }

    async fn default_model(&self) -> Result<String, LlmError> {
        Ok("gpt-4o-mini".to_string())
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

    async fn generate_image(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse, LlmError> {
        self.api.generate_image(&request).await
    }

    fn supports_functions(&self, _model: &str) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "openai"
    }

    fn info() -> ProviderInfo {
        ProviderInfo {
            name: "openai",
            display_name: "OpenAI",
            env_vars: vec![
                EnvVar::required("OPENAI_API_KEY", "OpenAI API key"),
            ],
        }
    }
}
