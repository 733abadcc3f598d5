pub mod secrets;


use std::collections::HashMap;

use genai_llm::providers::azure::AzureOpenAiProvider;
use genai_llm::providers::github::GITHUB_MODELS_ENDPOINT;
use genai_llm::providers::ollama::OLLAMA_BASE_URL;
use genai_llm::LlmClient;

use crate::error::DemoError;
pub use secrets::{mask, UserSecrets, SECRETS_FILE_ENV};

pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const GITHUB_MODELS_ENDPOINT_KEY: &str = "GITHUB_MODELS_ENDPOINT";
pub const AZURE_OPENAI_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const AZURE_OPENAI_APIKEY: &str = "AZURE_OPENAI_APIKEY";
pub const AZURE_OPENAI_MODEL: &str = "AZURE_OPENAI_MODEL";
pub const AZURE_OPENAI_IMAGE_MODEL: &str = "AZURE_OPENAI_IMAGE_MODEL";
pub const AZURE_OPENAI_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub const OLLAMA_BASE_URL_KEY: &str = "OLLAMA_BASE_URL";

/// Every key the demos read, in display order
pub const KNOWN_KEYS: [&str; 12] = [
    GITHUB_TOKEN,
    GITHUB_MODELS_ENDPOINT_KEY,
    AZURE_OPENAI_ENDPOINT,
    AZURE_OPENAI_APIKEY,
    AZURE_OPENAI_MODEL,
    AZURE_OPENAI_IMAGE_MODEL,
    AZURE_OPENAI_API_VERSION,
    OLLAMA_BASE_URL_KEY,
    "OPENAI_API_KEY",
    "OPENAI_COMPATIBLE_API_KEY",
    "OPENAI_COMPATIBLE_BASE_URL",
    "OPENAI_COMPATIBLE_MODEL",
];

#[derive(Debug, Clone, PartialEq)]
pub struct AzureOpenAiSettings {
    pub endpoint: String,
    pub api_key: String,
    /// Chat deployment
    pub model: String,
    /// Image generation deployment
    pub image_model: String,
    /// `None` keeps the client's default api-version
    pub api_version: Option<String>,
}

impl AzureOpenAiSettings {
    pub fn provider(&self, deployment: &str) -> AzureOpenAiProvider {
        AzureOpenAiProvider::new(
            self.endpoint.clone(),
            self.api_key.clone(),
            deployment.to_string(),
            self.api_version.clone(),
        )
    }

    pub fn chat_client(&self) -> LlmClient {
        LlmClient::from_provider(Box::new(self.provider(&self.model)))
    }

    pub fn image_client(&self) -> LlmClient {
        LlmClient::from_provider(Box::new(self.provider(&self.image_model)))
    }
}

/// Resolved configuration: environment variables first, then user secrets
#[derive(Debug, Clone, Default)]
pub struct Settings {
    env: HashMap<String, String>,
    secrets: UserSecrets,
}

impl Settings {
    pub fn from_parts(secrets: UserSecrets, env: HashMap<String, String>) -> Self {
        Self { env, secrets }
    }

    pub fn load() -> Result<Self, DemoError> {
        let secrets = UserSecrets::load()?;
        tracing::debug!(target: "genai::config", path = ?secrets.path(), "loaded user secrets");
        Ok(Self::from_parts(secrets, std::env::vars().collect()))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.env
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .or_else(|| self.secrets.get(key))
            .map(str::to_string)
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    pub fn require(&self, key: &str) -> Result<String, DemoError> {
        self.get(key).ok_or_else(|| DemoError::MissingConfig(key.to_string()))
    }

    pub fn github_token(&self) -> Result<String, DemoError> {
        self.require(GITHUB_TOKEN)
    }

    pub fn github_endpoint(&self) -> String {
        self.get_or(GITHUB_MODELS_ENDPOINT_KEY, GITHUB_MODELS_ENDPOINT)
    }

    /// GitHub Models client; `endpoint` overrides the configured one
    pub fn github_client(&self, endpoint: Option<&str>) -> Result<LlmClient, DemoError> {
        let endpoint = endpoint.map(str::to_string).unwrap_or_else(|| self.github_endpoint());
        Ok(LlmClient::github(self.github_token()?, Some(endpoint)))
    }

    /// Fails naming the first missing key
    pub fn azure_openai(&self) -> Result<AzureOpenAiSettings, DemoError> {
        Ok(AzureOpenAiSettings {
            endpoint: self.require(AZURE_OPENAI_ENDPOINT)?,
            api_key: self.require(AZURE_OPENAI_APIKEY)?,
            model: self.get_or(AZURE_OPENAI_MODEL, "gpt-4o-mini"),
            image_model: self.get_or(AZURE_OPENAI_IMAGE_MODEL, "dall-e-3"),
            api_version: self.get(AZURE_OPENAI_API_VERSION),
        })
    }

    pub fn ollama_base_url(&self) -> String {
        self.get_or(OLLAMA_BASE_URL_KEY, OLLAMA_BASE_URL)
    }

    pub fn ollama_client(&self) -> LlmClient {
        LlmClient::ollama(Some(self.ollama_base_url()))
    }

    /// Known keys with a value, for provider construction by name
    pub fn values(&self) -> HashMap<String, String> {
        KNOWN_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|v| (key.to_string(), v)))
            .collect()
    }

    pub fn secrets(&self) -> &UserSecrets {
        &self.secrets
    }
}
