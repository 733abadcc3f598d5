// Multimodal user turns. The request is built with plain text messages and the
// last user message is rewritten into content parts right before it is sent.
use async_trait::async_trait;
use base64::Engine;
use serde_json::{json, Value};

use crate::api::JsonHooks;
use crate::provider::LlmError;

#[derive(Debug, Clone, PartialEq)]
pub enum ImageInput {
    /// Publicly reachable image
    Url(String),
    /// Raw image bytes, sent inline as a data URL
    Bytes { data: Vec<u8>, mime_type: String },
}

impl ImageInput {
    pub fn url(&self) -> String {
        match self {
            ImageInput::Url(url) => url.clone(),
            ImageInput::Bytes { data, mime_type } => format!(
                "data:{};base64,{}",
                mime_type,
                base64::engine::general_purpose::STANDARD.encode(data)
            ),
        }
    }
}

/// Replaces the content of the last user message with text parts followed by image parts
pub struct ImageAttachmentHooks {
    text_parts: Vec<String>,
    images: Vec<ImageInput>,
}

impl ImageAttachmentHooks {
    pub fn new(text_parts: Vec<String>, images: Vec<ImageInput>) -> Self {
        Self { text_parts, images }
    }

    fn content_parts(&self, existing: Option<&Value>) -> Vec<Value> {
        let mut parts: Vec<Value> = Vec::new();

        if self.text_parts.is_empty() {
            if let Some(Value::String(text)) = existing {
                parts.push(json!({ "type": "text", "text": text }));
            }
        }
        for text in &self.text_parts {
            parts.push(json!({ "type": "text", "text": text }));
        }
        for image in &self.images {
            parts.push(json!({ "type": "image_url", "image_url": { "url": image.url() } }));
        }
        parts
    }
}

#[async_trait]
impl JsonHooks for ImageAttachmentHooks {
    async fn before_send(&self, mut json: Value) -> Result<Value, LlmError> {
        let messages = json
            .get_mut("messages")
            .and_then(|m| m.as_array_mut())
            .ok_or("request has no messages")?;

        let user = messages
            .iter_mut()
            .rev()
            .find(|m| m.get("role").and_then(|r| r.as_str()) == Some("user"))
            .ok_or("request has no user message to attach images to")?;

        let parts = self.content_parts(user.get("content"));
        user["content"] = Value::Array(parts);
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_become_data_url() {
        let image = ImageInput::Bytes { data: vec![1, 2, 3], mime_type: "image/png".to_string() };
        assert_eq!(image.url(), "data:image/png;base64,AQID");
    }

    #[tokio::test]
    async fn test_last_user_message_is_rewritten() {
        let hooks = ImageAttachmentHooks::new(
            vec!["Describe this".to_string(), "- Colors".to_string()],
            vec![ImageInput::Url("https://example.com/cat.jpg".to_string())],
        );
        let request = json!({
            "model": "gpt-4o-mini",
            "messages": [
                { "role": "system", "content": "You analyze images." },
                { "role": "user", "content": "placeholder" }
            ]
        });

        let json = hooks.before_send(request).await.unwrap();
        assert_eq!(json["messages"][0]["content"], "You analyze images.");
        assert_eq!(json["messages"][1]["content"], json!([
            { "type": "text", "text": "Describe this" },
            { "type": "text", "text": "- Colors" },
            { "type": "image_url", "image_url": { "url": "https://example.com/cat.jpg" } }
        ]));
    }

    #[tokio::test]
    async fn test_existing_text_kept_without_text_parts() {
        let hooks = ImageAttachmentHooks::new(vec![], vec![ImageInput::Url("u".to_string())]);
        let json = hooks.before_send(json!({
            "messages": [{ "role": "user", "content": "What is this?" }]
        })).await.unwrap();
        assert_eq!(json["messages"][0]["content"][0]["text"], "What is this?");
        assert_eq!(json["messages"][0]["content"][1]["type"], "image_url");
    }

    #[tokio::test]
    async fn test_missing_user_message_is_an_error() {
        let hooks = ImageAttachmentHooks::new(vec![], vec![]);
        let result = hooks.before_send(json!({ "messages": [{ "role": "system", "content": "x" }] })).await;
        assert!(result.is_err());
    }
}
