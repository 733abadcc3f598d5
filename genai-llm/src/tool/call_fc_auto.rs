use std::sync::Arc;

use openai_dive::v1::resources::chat::{ChatCompletionParametersBuilder, ChatCompletionToolChoice};

use crate::tool::{completion_tool, ToolDescription};

pub trait FunctionCallingAutoBuilder {
    fn with_function_calling_auto<T: ToolDescription + ?Sized>(&mut self, tools: &[Arc<T>]) -> &mut Self;
}

impl FunctionCallingAutoBuilder for ChatCompletionParametersBuilder {
    fn with_function_calling_auto<T: ToolDescription + ?Sized>(&mut self, tools: &[Arc<T>]) -> &mut Self {
        self
        .tools(tools.iter().map(|t| completion_tool(t.as_ref())).collect::<Vec<_>>())
        .tool_choice(ChatCompletionToolChoice::Auto)
    }
}
