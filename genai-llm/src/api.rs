// HTTP plumbing shared by every provider: OpenAI-style and Azure-style routing,
// status mapping, SSE streaming and JSON manipulation hooks.
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use openai_dive::v1::resources::chat::{ChatCompletionChunkResponse, ChatCompletionParameters, ChatCompletionResponse};
use reqwest::{Method, RequestBuilder};
use reqwest_eventsource::{Event, RequestBuilderExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::embedding::{EmbeddingRequest, EmbeddingResponse};
use crate::image::{ImageGenerationRequest, ImageGenerationResponse};
use crate::provider::{ConnectionError, LlmError, LlmStream};

pub const AZURE_API_VERSION: &str = "2024-10-21";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("permission denied: {0}")]
    Permission(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("rate limited: {0}")]
    RateLimit(String),
    #[error("unexpected status {0}: {1}")]
    Status(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("stream error: {0}")]
    Stream(String),
}

impl ApiError {
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            400 => ApiError::InvalidRequest(body),
            401 => ApiError::Authentication(body),
            403 => ApiError::Permission(body),
            404 => ApiError::NotFound(body),
            429 => ApiError::RateLimit(body),
            _ => ApiError::Status(status, body),
        }
    }
}

/// Trait for JSON manipulation hooks
#[async_trait]
pub trait JsonHooks: Send + Sync {
    /// Called before sending JSON to the API
    async fn before_send(&self, json: Value) -> Result<Value, LlmError> {
        Ok(json)
    }

    /// Called after receiving JSON from the API (non-streaming)
    async fn after_receive(&self, json: Value) -> Result<Value, LlmError> {
        Ok(json)
    }

    /// Called after receiving JSON from the API (streaming chunks)
    async fn after_receive_stream(&self, json: Value) -> Result<Value, LlmError> {
        self.after_receive(json).await
    }
}

pub struct NoHooks;

#[async_trait]
impl JsonHooks for NoHooks {}

/// Runs `first` then `second` on every payload
pub struct ChainedHooks<'a> {
    pub first: &'a dyn JsonHooks,
    pub second: &'a dyn JsonHooks,
}

#[async_trait]
impl<'a> JsonHooks for ChainedHooks<'a> {
    async fn before_send(&self, json: Value) -> Result<Value, LlmError> {
        let json = self.first.before_send(json).await?;
        self.second.before_send(json).await
    }

    async fn after_receive(&self, json: Value) -> Result<Value, LlmError> {
        let json = self.first.after_receive(json).await?;
        self.second.after_receive(json).await
    }

    async fn after_receive_stream(&self, json: Value) -> Result<Value, LlmError> {
        let json = self.first.after_receive_stream(json).await?;
        self.second.after_receive_stream(json).await
    }
}

/// How paths and credentials are laid out on the wire
#[derive(Clone, Debug, PartialEq)]
pub enum ApiFlavor {
    /// `{base}/{operation}` with a bearer token
    OpenAi,
    /// `{base}/openai/deployments/{deployment}/{operation}?api-version=..` with an `api-key` header
    Azure { api_version: String },
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    pub http_client: reqwest::Client,
    pub base_url: String,
    pub api_key: String,
    pub flavor: ApiFlavor,
    pub headers: Option<HashMap<String, String>>,
}

impl ApiClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            flavor: ApiFlavor::OpenAi,
            headers: None,
        }
    }

    pub fn azure(api_key: String, endpoint: String, api_version: Option<String>) -> Self {
        Self {
            flavor: ApiFlavor::Azure {
                api_version: api_version.unwrap_or_else(|| AZURE_API_VERSION.to_string()),
            },
            ..Self::new(api_key, endpoint)
        }
    }

    /// Full URL of `operation` (e.g. `chat/completions`) for the given model or deployment
    pub fn url(&self, model: &str, operation: &str) -> String {
        match &self.flavor {
            ApiFlavor::OpenAi => format!("{}/{}", self.base_url, operation),
            ApiFlavor::Azure { api_version } => format!(
                "{}/openai/deployments/{}/{}?api-version={}",
                self.base_url, model, operation, api_version
            ),
        }
    }

    /// URL of a resource that is not scoped to a deployment (e.g. `models`)
    pub fn resource_url(&self, path: &str) -> String {
        match &self.flavor {
            ApiFlavor::OpenAi => format!("{}/{}", self.base_url, path),
            ApiFlavor::Azure { api_version } => {
                format!("{}/openai/{}?api-version={}", self.base_url, path, api_version)
            }
        }
    }

    /// Build a request with authentication headers
    fn build_request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self
            .http_client
            .request(method, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        request = match &self.flavor {
            ApiFlavor::OpenAi if self.api_key.is_empty() => request,
            ApiFlavor::OpenAi => request.bearer_auth(&self.api_key),
            ApiFlavor::Azure { .. } => request.header("api-key", &self.api_key),
        };

        if let Some(headers) = &self.headers {
            for (key, value) in headers {
                request = request.header(key, value);
            }
        }

        request
    }

    /// Check status code and handle errors
    async fn check_status_code(
        url: &str,
        result: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<reqwest::Response, LlmError> {
        match result {
            Ok(response) if response.status().is_success() => Ok(response),
            Ok(response) => {
                let status = response.status().as_u16();
                let error_text = response.text().await.unwrap_or_default();
                Err(Box::new(ApiError::from_status(status, error_text)))
            }
            Err(error) if error.is_connect() || error.is_timeout() => Err(Box::new(ConnectionError {
                url: url.to_string(),
                message: error.to_string(),
            })),
            Err(error) => Err(Box::new(ApiError::Parse(error.to_string()))),
        }
    }

    async fn send_value(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Value, LlmError> {
        tracing::debug!(target: "genai::llm", %url, "sending request");
        let mut request = self.build_request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = Self::check_status_code(url, request.send().await).await?;
        let text = response
            .text()
            .await
            .map_err(|e| Box::new(ApiError::Parse(e.to_string())) as LlmError)?;

        serde_json::from_str(&text).map_err(|e| Box::new(ApiError::Parse(e.to_string())) as LlmError)
    }

    pub async fn get_json(&self, path: &str) -> Result<Value, LlmError> {
        let url = self.resource_url(path);
        self.send_value(Method::GET, &url, None).await
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, model: &str, operation: &str, body: &B) -> Result<R, LlmError> {
        let json = serde_json::to_value(body).map_err(|e| Box::new(ApiError::Parse(e.to_string())) as LlmError)?;
        let url = self.url(model, operation);
        let value = self.send_value(Method::POST, &url, Some(&json)).await?;
        serde_json::from_value(value).map_err(|e| Box::new(ApiError::Parse(e.to_string())) as LlmError)
    }

    /// Chat completion with JSON hooks
    pub async fn chat_completion(
        &self,
        parameters: &ChatCompletionParameters,
        hooks: &dyn JsonHooks,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let json = serde_json::to_value(parameters).map_err(|e| Box::new(ApiError::Parse(e.to_string())) as LlmError)?;
        let json = hooks.before_send(json).await?;

        let url = self.url(&parameters.model, "chat/completions");
        let response_json = self.send_value(Method::POST, &url, Some(&json)).await?;
        let response_json = hooks.after_receive(response_json).await?;

        serde_json::from_value(response_json).map_err(|e| Box::new(ApiError::Parse(e.to_string())) as LlmError)
    }

    /// Chat completion streaming with JSON hooks
    pub async fn chat_completion_stream(
        &self,
        parameters: &ChatCompletionParameters,
        hooks: Arc<dyn JsonHooks>,
    ) -> Result<LlmStream, LlmError> {
        let json = serde_json::to_value(parameters).map_err(|e| Box::new(ApiError::Parse(e.to_string())) as LlmError)?;
        let json = hooks.before_send(json).await?;

        let url = self.url(&parameters.model, "chat/completions");
        let event_source = self
            .build_request(Method::POST, &url)
            .json(&json)
            .eventsource()
            .map_err(|e| Box::new(ApiError::Stream(e.to_string())) as LlmError)?;

        let stream = async_stream::stream! {
            let mut event_source = event_source;
            while let Some(event) = event_source.next().await {
                match event {
                    Ok(Event::Open) => {}
                    Ok(Event::Message(message)) => {
                        if message.data == "[DONE]" {
                            break;
                        }

                        let chunk = match serde_json::from_str::<Value>(&message.data) {
                            Ok(json) => hooks.after_receive_stream(json).await,
                            Err(e) => Err(Box::new(ApiError::Parse(e.to_string())) as LlmError),
                        };

                        match chunk.and_then(|json| {
                            serde_json::from_value::<ChatCompletionChunkResponse>(json)
                                .map_err(|e| Box::new(ApiError::Parse(e.to_string())) as LlmError)
                        }) {
                            Ok(chunk) => yield Ok(chunk),
                            Err(e) => yield Err(e),
                        }
                    }
                    Err(reqwest_eventsource::Error::StreamEnded) => break,
                    Err(reqwest_eventsource::Error::InvalidStatusCode(status, response)) => {
                        let body = response.text().await.unwrap_or_default();
                        yield Err(Box::new(ApiError::from_status(status.as_u16(), body)) as LlmError);
                        break;
                    }
                    Err(reqwest_eventsource::Error::Transport(e)) if e.is_connect() => {
                        yield Err(Box::new(ConnectionError { url: url.clone(), message: e.to_string() }) as LlmError);
                        break;
                    }
                    Err(e) => {
                        yield Err(Box::new(ApiError::Stream(e.to_string())) as LlmError);
                        break;
                    }
                }
            }
            event_source.close();
        };

        Ok(Box::new(Box::pin(stream)))
    }

    pub async fn embeddings(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse, LlmError> {
        self.post(&request.model, "embeddings", request).await
    }

    pub async fn generate_image(&self, request: &ImageGenerationRequest) -> Result<ImageGenerationResponse, LlmError> {
        self.post(&request.model, "images/generations", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Tagger(&'static str);

    #[async_trait]
    impl JsonHooks for Tagger {
        async fn before_send(&self, mut json: Value) -> Result<Value, LlmError> {
            let tags = json["tags"].as_array_mut().ok_or("missing tags")?;
            tags.push(json!(self.0));
            Ok(json)
        }
    }

    #[test]
    fn test_openai_url_layout() {
        let client = ApiClient::new("key".to_string(), "https://api.example.com/v1/".to_string());
        assert_eq!(client.url("gpt-4o-mini", "chat/completions"), "https://api.example.com/v1/chat/completions");
        assert_eq!(client.resource_url("models"), "https://api.example.com/v1/models");
    }

    #[test]
    fn test_azure_url_layout() {
        let client = ApiClient::azure("key".to_string(), "https://res.openai.azure.com/".to_string(), None);
        assert_eq!(
            client.url("dall-e-3", "images/generations"),
            format!("https://res.openai.azure.com/openai/deployments/dall-e-3/images/generations?api-version={}", AZURE_API_VERSION)
        );
        assert_eq!(
            client.resource_url("models"),
            format!("https://res.openai.azure.com/openai/models?api-version={}", AZURE_API_VERSION)
        );
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(ApiError::from_status(401, String::new()), ApiError::Authentication(_)));
        assert!(matches!(ApiError::from_status(429, String::new()), ApiError::RateLimit(_)));
        assert!(matches!(ApiError::from_status(502, String::new()), ApiError::Status(502, _)));
    }

    #[tokio::test]
    async fn test_chained_hooks_run_in_order() {
        let first = Tagger("provider");
        let second = Tagger("request");
        let chained = ChainedHooks { first: &first, second: &second };

        let json = chained.before_send(json!({ "tags": [] })).await.unwrap();
        assert_eq!(json["tags"], json!(["provider", "request"]));
    }

    /// One-shot HTTP server answering every connection with `status` and `body`
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 16 * 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_stream_maps_http_status() {
        let base_url = serve_once("401 Unauthorized", r#"{"error":{"message":"bad token"}}"#).await;
        let client = ApiClient::new("key".to_string(), base_url);
        let parameters = ChatCompletionParameters {
            model: "gpt-4o-mini".to_string(),
            messages: vec![],
            stream: Some(true),
            ..Default::default()
        };

        let mut stream = client.chat_completion_stream(&parameters, Arc::new(NoHooks)).await.unwrap();
        let err = stream.next().await.expect("an error item").unwrap_err();
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::Authentication(body)) => assert!(body.contains("bad token"), "body: {}", body),
            other => panic!("expected an authentication error, got {:?}", other),
        }
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        // nothing listens on port 9 of the loopback interface
        let client = ApiClient::new(String::new(), "http://127.0.0.1:9".to_string());
        let err = client.get_json("models").await.unwrap_err();
        assert!(crate::provider::is_connection_error(&err), "unexpected error: {}", err);
    }
}
