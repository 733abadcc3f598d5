// GitHub Models: OpenAI compatible inference authenticated with a GitHub token
use std::sync::Arc;

use async_trait::async_trait;
use openai_dive::v1::resources::{
    chat::{ChatCompletionParameters, ChatCompletionResponse},
    model::ListModelResponse,
};

use crate::api::{ApiClient, ChainedHooks, JsonHooks, NoHooks};
use crate::embedding::{EmbeddingRequest, EmbeddingResponse};
use crate::provider::{EnvVar, LlmError, LlmProvider, LlmStream, ProviderInfo};
use super::parse_model_list;

pub const GITHUB_MODELS_ENDPOINT: &str = "https://models.inference.ai.azure.com";

pub struct GithubModelsProvider {
    api: ApiClient,
    hooks: Arc<dyn JsonHooks>,
}

impl GithubModelsProvider {
    pub fn new(token: String, endpoint: Option<String>) -> Self {
        let endpoint = endpoint.unwrap_or_else(|| GITHUB_MODELS_ENDPOINT.to_string());
        Self {
            api: ApiClient::new(token, endpoint),
            hooks: Arc::new(NoHooks),
        }
    }

    /// Create GitHub Models provider from environment variables
    /// Returns None if GITHUB_TOKEN is not set
    pub fn from_env() -> Option<Self> {
        std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()).map(|token| {
            Self::new(token, std::env::var("GITHUB_MODELS_ENDPOINT").ok())
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.api.base_url
    }
}

#[async_trait]
impl LlmProvider for GithubModelsProvider {
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

    fn supports_functions(&self, model: &str) -> bool {
        // small open models served here reject the tools parameter
        !model.to_lowercase().starts_with("phi-3")
    }

    fn name(&self) -> &'static str {
        "github"
    }

    fn info() -> ProviderInfo {
        ProviderInfo {
            name: "github",
            display_name: "GitHub Models",
            env_vars: vec![
                EnvVar::required("GITHUB_TOKEN", "GitHub personal access token with models access"),
                EnvVar::optional("GITHUB_MODELS_ENDPOINT", "Inference endpoint (defaults to models.inference.ai.azure.com)"),
            ],
        }
    }
}
