use std::fmt::Debug;
use async_trait::async_trait;
use futures::Stream;
use std::error::Error;
use openai_dive::v1::resources::{
    chat::{ChatCompletionParameters, ChatCompletionResponse, ChatCompletionChunkResponse},
    model::ListModelResponse,
};
use thiserror::Error;

use crate::api::{JsonHooks, NoHooks};
use crate::embedding::{EmbeddingRequest, EmbeddingResponse};
use crate::image::{ImageGenerationRequest, ImageGenerationResponse};

pub type LlmError = Box<dyn Error + Send + Sync>;
pub type LlmStream = Box<dyn Stream<Item = Result<ChatCompletionChunkResponse, LlmError>> + Send + Unpin>;

/// The endpoint could not be reached at all (nothing listening, DNS failure...)
#[derive(Debug, Error)]
#[error("could not connect to {url}: {message}")]
pub struct ConnectionError {
    pub url: String,
    pub message: String,
}

/// True when the error chain carries a [`ConnectionError`]
pub fn is_connection_error(error: &LlmError) -> bool {
    error.downcast_ref::<ConnectionError>().is_some()
}

#[derive(Debug, Clone)]
pub struct EnvVar {
    pub name: String,
    pub description: String,
    pub required: bool,
}

#[derive(Debug, Clone)]
pub struct ProviderInfo {
    pub name: &'static str,
    pub display_name: &'static str,
    pub env_vars: Vec<EnvVar>,
}

impl EnvVar {
    pub fn required(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
        }
    }

    pub fn optional(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: false,
        }
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn models(&self) -> Result<ListModelResponse, LlmError>;

    async fn default_model(&self) -> Result<String, LlmError> {
        let models = self.models().await?;
        models.data
            .first()
            .map(|m| m.id.clone())
            .ok_or_else(|| "no model available".into())
    }

    async fn chat(&self, request: ChatCompletionParameters) -> Result<ChatCompletionResponse, LlmError> {
        self.chat_with_hooks(request, &NoHooks).await
    }

    /// Chat completion with extra JSON hooks applied after the provider's own
    async fn chat_with_hooks(&self, request: ChatCompletionParameters, hooks: &dyn JsonHooks) -> Result<ChatCompletionResponse, LlmError>;

    async fn chat_stream(&self, request: ChatCompletionParameters) -> Result<LlmStream, LlmError>;

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, LlmError> {
        Err(format!("embeddings are not supported by {}", self.name()).into())
    }

    async fn generate_image(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse, LlmError> {
        Err(format!("image generation is not supported by {}", self.name()).into())
    }

    fn supports_functions(&self, model: &str) -> bool;

    fn name(&self) -> &'static str;

    /// Returns provider information including environment variables
    fn info() -> ProviderInfo where Self: Sized;
}

impl Debug for dyn LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LlmProvider({})", self.name())
    }
}
