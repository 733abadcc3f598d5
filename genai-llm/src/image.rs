use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::provider::LlmError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum ImageSize {
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1792x1024")]
    Landscape,
    #[serde(rename = "1024x1792")]
    Portrait,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ImageQuality {
    Standard,
    Hd,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ImageStyle {
    Vivid,
    Natural,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ImageResponseFormat {
    B64Json,
    Url,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: ImageSize,
    pub quality: ImageQuality,
    pub style: ImageStyle,
    pub response_format: ImageResponseFormat,
}

impl ImageGenerationRequest {
    /// One square, standard quality, vivid image returned as bytes
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            n: 1,
            size: ImageSize::Square,
            quality: ImageQuality::Standard,
            style: ImageStyle::Vivid,
            response_format: ImageResponseFormat::B64Json,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedImage {
    #[serde(default)]
    pub b64_json: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

impl GeneratedImage {
    pub fn bytes(&self) -> Result<Vec<u8>, LlmError> {
        let encoded = self.b64_json.as_deref().ok_or("image was not returned as bytes")?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| Box::new(e) as LlmError)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationResponse {
    #[serde(default)]
    pub created: u64,
    pub data: Vec<GeneratedImage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_request_wire_format() {
        let request = ImageGenerationRequest::new("dall-e-3", "a robot");
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({
            "model": "dall-e-3",
            "prompt": "a robot",
            "n": 1,
            "size": "1024x1024",
            "quality": "standard",
            "style": "vivid",
            "response_format": "b64_json"
        }));
    }

    #[test]
    fn test_decode_image_bytes() {
        let response: ImageGenerationResponse = serde_json::from_value(json!({
            "created": 1700000000,
            "data": [{ "b64_json": "iVBORw==", "revised_prompt": "a shiny robot" }]
        })).unwrap();

        let image = &response.data[0];
        assert_eq!(image.bytes().unwrap(), vec![0x89, b'P', b'N', b'G']);
        assert_eq!(image.revised_prompt.as_deref(), Some("a shiny robot"));
    }

    #[test]
    fn test_url_only_image_has_no_bytes() {
        let image = GeneratedImage { b64_json: None, url: Some("https://x/y.png".to_string()), revised_prompt: None };
        assert!(image.bytes().is_err());
    }
}
