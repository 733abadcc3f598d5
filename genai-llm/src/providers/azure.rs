use std::sync::Arc;

use async_trait::async_trait;
use openai_dive::v1::resources::{
    chat::{ChatCompletionParameters, ChatCompletionResponse},
    model::ListModelResponse,
};
use serde_json::Value;

use crate::api::{ApiClient, ApiFlavor, ChainedHooks, JsonHooks, AZURE_API_VERSION};
use crate::embedding::{EmbeddingRequest, EmbeddingResponse};
use crate::image::{ImageGenerationRequest, ImageGenerationResponse};
use crate::provider::{EnvVar, LlmError, LlmProvider, LlmStream, ProviderInfo};
use super::single_model;

/// Azure routes by deployment in the URL, the body must not carry a model
pub struct AzureHooks;

#[async_trait]
impl JsonHooks for AzureHooks {
    async fn before_send(&self, mut json: Value) -> Result<Value, LlmError> {
        if let Some(obj) = json.as_object_mut() {
            obj.remove("model");
        }
        Ok(json)
    }
}

pub struct AzureOpenAiProvider {
    api: ApiClient,
    deployment: String,
    hooks: Arc<dyn JsonHooks>,
}

impl AzureOpenAiProvider {
    pub fn new(endpoint: String, api_key: String, deployment: String, api_version: Option<String>) -> Self {
        Self {
            api: ApiClient::azure(api_key, endpoint, api_version),
            deployment,
            hooks: Arc::new(AzureHooks),
        }
    }

    /// Create Azure OpenAI provider from environment variables
    /// Returns None if AZURE_OPENAI_ENDPOINT or AZURE_OPENAI_APIKEY is not set
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("AZURE_OPENAI_ENDPOINT").ok().filter(|v| !v.is_empty())?;
        let api_key = std::env::var("AZURE_OPENAI_APIKEY").ok().filter(|v| !v.is_empty())?;
        let deployment = std::env::var("AZURE_OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let api_version = std::env::var("AZURE_OPENAI_API_VERSION").ok();
        Some(Self::new(endpoint, api_key, deployment, api_version))
    }

    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    pub fn api_version(&self) -> &str {
        match &self.api.flavor {
            ApiFlavor::Azure { api_version } => api_version,
            ApiFlavor::OpenAi => AZURE_API_VERSION,
        }
    }

    /// Requests without a model go to the configured deployment
    fn route(&self, mut request: ChatCompletionParameters) -> ChatCompletionParameters {
        if request.model.is_empty() {
            request.model = self.deployment.clone();
        }
        request
    }
}

#[async_trait]
impl LlmProvider for AzureOpenAiProvider {
    async fn models(&self) -> Result<ListModelResponse, LlmError> {
        single_model(&self.deployment, "azure")
    }

    async fn default_model(&self) -> Result<String, LlmError> {
        Ok(self.deployment.clone())
    }

    async fn chat_with_hooks(&self, request: ChatCompletionParameters, hooks: &dyn JsonHooks) -> Result<ChatCompletionResponse, LlmError> {
        let request = self.route(request);
        let hooks = ChainedHooks { first: self.hooks.as_ref(), second: hooks };
        self.api.chat_completion(&request, &hooks).await
    }

    async fn chat_stream(&self, request: ChatCompletionParameters) -> Result<LlmStream, LlmError> {
        let mut request = self.route(request);
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
        "azure"
    }

    fn info() -> ProviderInfo {
        ProviderInfo {
            name: "azure",
            display_name: "Azure OpenAI",
            env_vars: vec![
                EnvVar::required("AZURE_OPENAI_ENDPOINT", "Resource endpoint, e.g. https://my-resource.openai.azure.com"),
                EnvVar::required("AZURE_OPENAI_APIKEY", "Resource API key"),
                EnvVar::optional("AZURE_OPENAI_MODEL", "Chat deployment name (defaults to gpt-4o-mini)"),
                EnvVar::optional("AZURE_OPENAI_API_VERSION", "REST api-version query parameter"),
            ],
        }
    }
}
