// llm/client.rs
use std::collections::HashMap;

use openai_dive::v1::resources::{
    chat::{
        ChatCompletionChunkResponse, ChatCompletionParameters,
        ChatCompletionResponse, ChatMessage, ChatMessageContent, DeltaChatMessage,
    },
    model::ListModelResponse,
};
use regex::Regex;

use super::provider::{LlmError, LlmProvider, LlmStream, ProviderInfo};
use super::providers::{
    azure::AzureOpenAiProvider,
    github::GithubModelsProvider,
    ollama::OllamaProvider,
    openai::OpenAIProvider,
    openai_compatible::OpenAICompatibleProvider,
};
use crate::embedding::EmbeddingRequest;
use crate::image::{ImageGenerationRequest, ImageGenerationResponse};
use crate::vision::{ImageAttachmentHooks, ImageInput};

#[derive(Debug)]
pub struct LlmClient {
    provider: Box<dyn LlmProvider>,
}

/// Provider Factory related method
impl LlmClient {
    pub fn from_provider(provider: Box<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Create a GitHub Models provider from environment variables
    /// Returns None if required environment variables are not set
    pub fn from_env_github() -> Option<Self> {
        GithubModelsProvider::from_env().map(|provider| Self {
            provider: Box::new(provider),
        })
    }

    /// Create an Azure OpenAI provider from environment variables
    /// Returns None if required environment variables are not set
    pub fn from_env_azure() -> Option<Self> {
        AzureOpenAiProvider::from_env().map(|provider| Self {
            provider: Box::new(provider),
        })
    }

    /// Create an OpenAI provider from environment variables
    /// Returns None if required environment variables are not set
    pub fn from_env_openai() -> Option<Self> {
        OpenAIProvider::from_env().map(|provider| Self {
            provider: Box::new(provider),
        })
    }

    /// Create an Ollama provider from environment variables
    /// Returns None if OLLAMA_BASE_URL is not set
    pub fn from_env_ollama() -> Option<Self> {
        OllamaProvider::from_env().map(|provider| Self {
            provider: Box::new(provider),
        })
    }

    /// Create an OpenAI Compatible provider from environment variables
    /// Returns None if required environment variables are not set
    pub fn from_env_openai_compatible() -> Option<Self> {
        OpenAICompatibleProvider::from_env().map(|provider| Self {
            provider: Box::new(provider),
        })
    }

    pub fn github(token: String, endpoint: Option<String>) -> Self {
        Self {
            provider: Box::new(GithubModelsProvider::new(token, endpoint)),
        }
    }

    pub fn azure(endpoint: String, api_key: String, deployment: String, api_version: Option<String>) -> Self {
        Self {
            provider: Box::new(AzureOpenAiProvider::new(endpoint, api_key, deployment, api_version)),
        }
    }

    pub fn openai(api_key: String) -> Self {
        Self {
            provider: Box::new(OpenAIProvider::new(api_key)),
        }
    }

    pub fn ollama(base_url: Option<String>) -> Self {
        Self {
            provider: Box::new(OllamaProvider::new(base_url)),
        }
    }

    pub fn compatible(api_key: String, base_url: String, model: Option<String>) -> Self {
        Self {
            provider: Box::new(OpenAICompatibleProvider::new(api_key, base_url, model)),
        }
    }

    /// First configured provider, honouring GENAI_PROVIDER when set
    pub fn first_from_env() -> Option<Self> {
        if let Ok(provider) = std::env::var("GENAI_PROVIDER") {
            match provider.as_str() {
                "github" => return Self::from_env_github(),
                "azure" => return Self::from_env_azure(),
                "openai" => return Self::from_env_openai(),
                "ollama" => return Self::from_env_ollama(),
                "openai_compatible" => return Self::from_env_openai_compatible(),
                _ => {} // Fall through to default behavior
            }
        }

        Self::from_env_github()
            .or_else(Self::from_env_azure)
            .or_else(Self::from_env_openai)
            .or_else(Self::from_env_openai_compatible)
            .or_else(Self::from_env_ollama)
    }

    /// Get information about all available providers
    pub fn list_providers() -> Vec<ProviderInfo> {
        vec![
            GithubModelsProvider::info(),
            AzureOpenAiProvider::info(),
            OpenAIProvider::info(),
            OllamaProvider::info(),
            OpenAICompatibleProvider::info(),
        ]
    }

    /// Create a provider dynamically based on name and configuration values
    pub fn create_provider(provider_name: &str, values: &HashMap<String, String>) -> Result<Self, LlmError> {
        let get = |key: &str| values.get(key).filter(|v| !v.is_empty()).cloned();
        let require = |key: &str| get(key).ok_or_else(|| format!("{} not found", key));

        match provider_name {
            "github" => Ok(Self::github(require("GITHUB_TOKEN")?, get("GITHUB_MODELS_ENDPOINT"))),
            "azure" => Ok(Self::azure(
                require("AZURE_OPENAI_ENDPOINT")?,
                require("AZURE_OPENAI_APIKEY")?,
                get("AZURE_OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
                get("AZURE_OPENAI_API_VERSION"),
            )),
            "openai" => Ok(Self::openai(require("OPENAI_API_KEY")?)),
            "ollama" => Ok(Self::ollama(get("OLLAMA_BASE_URL"))),
            "openai_compatible" => Ok(Self::compatible(
                get("OPENAI_COMPATIBLE_API_KEY").unwrap_or_default(),
                require("OPENAI_COMPATIBLE_BASE_URL")?,
                get("OPENAI_COMPATIBLE_MODEL"),
            )),
            _ => Err(format!("Unknown provider: {}", provider_name).into()),
        }
    }
}

/// Provider Delegate
impl LlmClient {
    pub async fn models(&self) -> Result<ListModelResponse, LlmError> {
        self.provider.models().await
    }

    pub async fn default_model(&self) -> Result<String, LlmError> {
        match std::env::var("GENAI_MODEL") {
            Ok(model) if !model.is_empty() => Ok(model),
            _ => self.provider.default_model().await,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Get a reference to the underlying provider (for testing)
    pub fn provider(&self) -> &dyn LlmProvider {
        &*self.provider
    }
}

/// Higher level chat client
impl LlmClient {
    pub async fn chat(&self, request: ChatCompletionParameters) -> Result<ChatCompletionResponse, LlmError> {
        tracing::debug!(target: "genai::llm", provider = self.provider.name(), model = %request.model, messages = request.messages.len(), "chat");
        let response = self.provider
            .chat(request)
            .await?
            .extract_think_content();

        Ok(response)
    }

    pub async fn chat_stream(&self, request: ChatCompletionParameters) -> Result<LlmStream, LlmError> {
        tracing::debug!(target: "genai::llm", provider = self.provider.name(), model = %request.model, "chat stream");
        self.provider.chat_stream(request).await
    }

    /// Send `request` with the last user message replaced by `text_parts` followed by `images`
    pub async fn chat_with_images(
        &self,
        request: ChatCompletionParameters,
        text_parts: Vec<String>,
        images: Vec<ImageInput>,
    ) -> Result<ChatCompletionResponse, LlmError> {
        tracing::debug!(target: "genai::llm", provider = self.provider.name(), images = images.len(), "chat with images");
        let hooks = ImageAttachmentHooks::new(text_parts, images);
        let response = self.provider
            .chat_with_hooks(request, &hooks)
            .await?
            .extract_think_content();

        Ok(response)
    }

    /// One-shot completion of a single user prompt
    pub async fn complete(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let request = ChatCompletionParameters {
            model: model.to_string(),
            messages: vec![ChatMessage::User {
                content: ChatMessageContent::Text(prompt.to_string()),
                name: None,
            }],
            ..Default::default()
        };

        let response = self.chat(request).await?;
        Ok(response_text(&response).unwrap_or_default())
    }

    /// Embed `texts`, one vector per input in input order
    pub async fn embed(&self, model: &str, texts: Vec<String>) -> Result<Vec<Vec<f32>>, LlmError> {
        let count = texts.len();
        let response = self.provider.embed(EmbeddingRequest::new(model, texts)).await?;
        let vectors = response.sorted().into_vectors();
        if vectors.len() != count {
            return Err(format!("expected {} embeddings, got {}", count, vectors.len()).into());
        }
        Ok(vectors)
    }

    pub async fn generate_image(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse, LlmError> {
        tracing::debug!(target: "genai::llm", provider = self.provider.name(), model = %request.model, "generate image");
        self.provider.generate_image(request).await
    }
}

/// Text of the first choice, if the assistant answered with text
pub fn response_text(response: &ChatCompletionResponse) -> Option<String> {
    match &response.choices.first()?.message {
        ChatMessage::Assistant { content: Some(ChatMessageContent::Text(text)), .. } => Some(text.clone()),
        _ => None,
    }
}

/// Text carried by a streaming chunk, if any
pub fn delta_text(chunk: &ChatCompletionChunkResponse) -> Option<String> {
    match &chunk.choices.first()?.delta {
        DeltaChatMessage::Assistant { content: Some(ChatMessageContent::Text(text)), .. }
        | DeltaChatMessage::Untagged { content: Some(ChatMessageContent::Text(text)), .. } => Some(text.clone()),
        _ => None,
    }
}

pub trait ExtractThinkContent {
    /// Extract <think> content from assistant messages and move it to reasoning_content
    fn extract_think_content(self) -> ChatCompletionResponse;
}

impl ExtractThinkContent for ChatCompletionResponse {
    fn extract_think_content(mut self) -> ChatCompletionResponse {
        let Ok(think_regex) = Regex::new(r"(?s)<think>(.*?)</think>") else {
            return self;
        };
        for choice in &mut self.choices {
            if let ChatMessage::Assistant { reasoning_content, content, .. } = &mut choice.message {
                if let Some(ChatMessageContent::Text(content_text)) = content {
                    let reasoning = think_regex
                        .captures(content_text)
                        .and_then(|c| c.get(1))
                        .map(|m| m.as_str().trim().to_string());
                    if let Some(reasoning) = reasoning {
                        *reasoning_content = Some(reasoning);
                        let cleaned = think_regex.replace_all(content_text, "").trim().to_string();
                        *content = if cleaned.is_empty() { None } else { Some(ChatMessageContent::Text(cleaned)) };
                    }
                }
            }
        }
        self
    }
}
