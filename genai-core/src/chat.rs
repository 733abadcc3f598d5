use futures::StreamExt;
use genai_llm::{delta_text, ChatCompletionParameters, ChatMessage, ChatMessageContent, LlmClient};

use crate::error::DemoError;

/// Multi-turn conversation with a fixed system prompt
#[derive(Debug, Clone)]
pub struct ChatSession {
    model: String,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(model: impl Into<String>, system_prompt: Option<&str>) -> Self {
        let messages = system_prompt
            .map(|prompt| ChatMessage::System {
                content: ChatMessageContent::Text(prompt.to_string()),
                name: None,
            })
            .into_iter()
            .collect();
        Self { model: model.into(), messages }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Stream the answer to `input`, handing each delta to `on_chunk`.
    ///
    /// The accumulated text is recorded as the assistant turn. If the request
    /// or the stream fails the user turn is dropped again, leaving the history
    /// as it was.
    pub async fn send_streaming<F>(&mut self, llm: &LlmClient, input: &str, mut on_chunk: F) -> Result<String, DemoError>
    where
        F: FnMut(&str),
    {
        self.messages.push(ChatMessage::User {
            content: ChatMessageContent::Text(input.to_string()),
            name: None,
        });

        match self.stream_answer(llm, &mut on_chunk).await {
            Ok(answer) => {
                self.messages.push(ChatMessage::Assistant {
                    content: Some(ChatMessageContent::Text(answer.clone())),
                    reasoning_content: None,
                    tool_calls: None,
                    refusal: None,
                    name: None,
                    audio: None,
                });
                tracing::debug!(target: "genai::chat", messages = self.messages.len(), chars = answer.len(), "turn complete");
                Ok(answer)
            }
            Err(e) => {
                self.messages.pop();
                tracing::warn!(target: "genai::chat", error = %e, "turn failed, user message rolled back");
                Err(e)
            }
        }
    }

    async fn stream_answer<F>(&self, llm: &LlmClient, on_chunk: &mut F) -> Result<String, DemoError>
    where
        F: FnMut(&str),
    {
        let request = ChatCompletionParameters {
            model: self.model.clone(),
            messages: self.messages.clone(),
            stream: Some(true),
            ..Default::default()
        };

        let mut stream = llm.chat_stream(request).await?;
        let mut answer = String::new();
        while let Some(chunk) = stream.next().await {
            if let Some(text) = delta_text(&chunk?) {
                on_chunk(&text);
                answer.push_str(&text);
            }
        }
        Ok(answer)
    }
}

/// Blank input or one of `words`, ignoring case and surrounding whitespace
pub fn is_exit_command(input: &str, words: &[&str]) -> bool {
    let input = input.trim();
    input.is_empty() || words.iter().any(|w| input.eq_ignore_ascii_case(w))
}
