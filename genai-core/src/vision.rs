use std::fs;
use std::path::{Path, PathBuf};

use genai_llm::{response_text, ChatCompletionParameters, ChatMessage, ChatMessageContent, ImageInput, LlmClient};

use crate::error::DemoError;

pub const SAMPLE_IMAGE_URL: &str =
    "https://raw.githubusercontent.com/microsoft/Generative-AI-for-beginners-dotnet/main/03-CoreGenerativeAITechniques/images/vision-sample.jpg";

pub const URL_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant that can analyze images. Provide detailed, accurate descriptions of what you see.";

pub const URL_PROMPT_PARTS: [&str; 6] = [
    "Please analyze this image and describe what you see. Include details about:",
    "- Main subjects or objects",
    "- Setting/environment",
    "- Colors and lighting",
    "- Any text or signs visible",
    "- Overall mood or atmosphere",
];

pub const LOCAL_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant that can analyze images. Be specific and detailed in your analysis.";

pub const LOCAL_PROMPT_PARTS: [&str; 5] = [
    "Please analyze this local image and provide:",
    "1. A general description of what you see",
    "2. Technical details (resolution, format if visible)",
    "3. Suggestions for improvement if it's a photo",
    "4. Any interesting details you notice",
];

/// Searched in this order
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "bmp"];

/// Accepts the extension with or without its dot
pub fn mime_type_for(extension: &str) -> &'static str {
    match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        _ => "image/jpeg",
    }
}

/// First image directly inside `dir`, by extension priority then file name
pub fn find_local_image(dir: &Path) -> Result<Option<PathBuf>, DemoError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let found = IMAGE_EXTENSIONS.iter().find_map(|wanted| {
        files.iter().find(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
        })
    });
    Ok(found.cloned())
}

pub fn load_image(path: &Path) -> Result<ImageInput, DemoError> {
    let data = fs::read(path)?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    Ok(ImageInput::Bytes { data, mime_type: mime_type_for(extension).to_string() })
}

/// Ask the model about one image. The user turn is `parts` followed by the image.
pub async fn analyze_image(
    llm: &LlmClient,
    model: &str,
    system_prompt: &str,
    parts: &[&str],
    image: ImageInput,
) -> Result<String, DemoError> {
    let request = ChatCompletionParameters {
        model: model.to_string(),
        messages: vec![
            ChatMessage::System {
                content: ChatMessageContent::Text(system_prompt.to_string()),
                name: None,
            },
            // content is replaced by the image parts before sending
            ChatMessage::User {
                content: ChatMessageContent::Text(parts.join("\n")),
                name: None,
            },
        ],
        ..Default::default()
    };

    let text_parts = parts.iter().map(|p| p.to_string()).collect();
    let response = llm.chat_with_images(request, text_parts, vec![image]).await?;
    response_text(&response).ok_or_else(|| DemoError::InvalidResponse("the model returned no text".to_string()))
}
