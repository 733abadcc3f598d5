pub mod api;
pub mod client;
pub mod embedding;
pub mod image;
pub mod provider;
pub mod providers;
pub mod structured;
pub mod tool;
pub mod vision;

// Re-export our client
pub use client::{LlmClient, response_text, delta_text};
pub use provider::{LlmError, LlmProvider, LlmStream, ConnectionError, is_connection_error};

pub use tool::{
    ToolDescription,
    ToolBox,
    ContainsTool,
    FunctionCallingAutoBuilder,
    completion_tool};

pub use embedding::{EmbeddingRequest, EmbeddingResponse};
pub use image::{ImageGenerationRequest, ImageGenerationResponse, GeneratedImage, ImageSize, ImageQuality, ImageStyle, ImageResponseFormat};
pub use vision::{ImageInput, ImageAttachmentHooks};
pub use structured::{extract_json, parse_structured, StructuredOutputError};

// Re-export commonly used openai_dive types for consumers
pub use openai_dive::v1::resources::chat::{
    ChatCompletionParameters,
    ChatCompletionParametersBuilder,
    ChatCompletionResponse,
    ChatCompletionChunkResponse,
    ChatMessage,
    ChatMessageContent,
    ChatCompletionTool,
    ChatCompletionToolType,
    ChatCompletionFunction,
    DeltaChatMessage,
    ToolCall,
    Function,
    ChatCompletionChoice,
};
