// In-process provider replaying scripted answers
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use genai_llm::api::JsonHooks;
use genai_llm::provider::ProviderInfo;
use genai_llm::{
    ChatCompletionChunkResponse, ChatCompletionParameters, ChatCompletionResponse, EmbeddingRequest,
    EmbeddingResponse, LlmClient, LlmError, LlmProvider, LlmStream,
};
use openai_dive::v1::resources::model::ListModelResponse;
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub enum Scripted {
    Text(String),
    /// (call id, function name, JSON arguments)
    ToolCalls(Vec<(String, String, String)>),
    Fail(String),
    /// Streams `text` word by word, then fails mid-stream
    FailAfter(String),
}

impl Scripted {
    pub fn text(text: &str) -> Self {
        Scripted::Text(text.to_string())
    }

    pub fn call(id: &str, name: &str, arguments: Value) -> Self {
        Scripted::ToolCalls(vec![(id.to_string(), name.to_string(), arguments.to_string())])
    }
}

#[derive(Default)]
struct State {
    script: VecDeque<Scripted>,
    requests: Vec<ChatCompletionParameters>,
}

#[derive(Clone, Default)]
pub struct ScriptedProvider {
    state: Arc<Mutex<State>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Scripted>) -> Self {
        let provider = Self::default();
        provider.state.lock().unwrap().script = script.into();
        provider
    }

    /// Client over a clone sharing this provider's state
    pub fn client(&self) -> LlmClient {
        LlmClient::from_provider(Box::new(self.clone()))
    }

    pub fn requests(&self) -> Vec<ChatCompletionParameters> {
        self.state.lock().unwrap().requests.clone()
    }

    fn next(&self, request: ChatCompletionParameters) -> Scripted {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request);
        state.script.pop_front().unwrap_or_else(|| Scripted::Fail("script exhausted".to_string()))
    }
}

pub fn completion_response(message: Value) -> ChatCompletionResponse {
    serde_json::from_value(json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "test-model",
        "choices": [{ "index": 0, "message": message, "finish_reason": "stop", "logprobs": null }],
        "usage": { "prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2 }
    }))
    .unwrap()
}

fn chunk(text: &str) -> ChatCompletionChunkResponse {
    serde_json::from_value(json!({
        "id": "chatcmpl-test",
        "object": "chat.completion.chunk",
        "created": 1700000000,
        "model": "test-model",
        "choices": [{ "index": 0, "delta": { "role": "assistant", "content": text }, "finish_reason": null }]
    }))
    .unwrap()
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn models(&self) -> Result<ListModelResponse, LlmError> {
        Ok(serde_json::from_value(json!({
            "object": "list",
            "data": [{ "id": "test-model", "object": "model", "created": 0, "owned_by": "test" }]
        }))?)
    }

    async fn chat_with_hooks(&self, request: ChatCompletionParameters, hooks: &dyn JsonHooks) -> Result<ChatCompletionResponse, LlmError> {
        match self.next(request) {
            Scripted::Text(text) => Ok(completion_response(json!({ "role": "assistant", "content": text }))),
            Scripted::ToolCalls(calls) => {
                let tool_calls: Vec<Value> = calls
                    .iter()
                    .map(|(id, name, arguments)| json!({
                        "id": id,
                        "type": "function",
                        "function": { "name": name, "arguments": arguments }
                    }))
                    .collect();
                Ok(completion_response(json!({ "role": "assistant", "content": null, "tool_calls": tool_calls })))
            }
            Scripted::Fail(message) => Err(message.into()),
            Scripted::FailAfter(_) => Err("stream failure scripted on a non-streaming request".into()),
        }
    }

    async fn chat_stream(&self, request: ChatCompletionParameters) -> Result<LlmStream, LlmError> {
        match self.next(request) {
            Scripted::Text(text) => {
                // one chunk per word, spaces kept
                let chunks: Vec<Result<ChatCompletionChunkResponse, LlmError>> = text
                    .split_inclusive(' ')
                    .map(|piece| Ok(chunk(piece)))
                    .collect();
                Ok(Box::new(futures::stream::iter(chunks)))
            }
            Scripted::FailAfter(text) => {
                let mut chunks: Vec<Result<ChatCompletionChunkResponse, LlmError>> = text
                    .split_inclusive(' ')
                    .map(|piece| Ok(chunk(piece)))
                    .collect();
                chunks.push(Err("connection reset mid-stream".into()));
                Ok(Box::new(futures::stream::iter(chunks)))
            }
            Scripted::ToolCalls(_) => Err("tool calls are not scripted for streams".into()),
            Scripted::Fail(message) => Err(message.into()),
        }
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, LlmError> {
        // reversed index order exercises the sort
        let data: Vec<Value> = request
            .input
            .iter()
            .enumerate()
            .rev()
            .map(|(index, text)| json!({
                "index": index,
                "embedding": [text.len() as f32, text.matches('a').count() as f32, 1.0]
            }))
            .collect();
        Ok(serde_json::from_value(json!({ "model": request.model, "data": data }))?)
    }

    fn supports_functions(&self, _model: &str) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn info() -> ProviderInfo {
        ProviderInfo { name: "scripted", display_name: "Scripted", env_vars: vec![] }
    }
}
