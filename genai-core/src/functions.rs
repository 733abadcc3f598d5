use genai_llm::{
    ChatCompletionParametersBuilder, ChatMessage, ChatMessageContent, FunctionCallingAutoBuilder, LlmClient,
    ToolCall, ToolDescription,
};
use serde_json::Value;

use crate::error::DemoError;
use crate::tools::{AnyToolBox, ToolResult};

pub const DEFAULT_MAX_ITERATIONS: usize = 8;

/// Automatic function invocation.
///
/// Every turn is sent with the registered tools. Tool calls in the reply are
/// executed and their results appended as tool messages, then the model is
/// asked again, until it answers with text.
pub struct FunctionInvoker {
    tools: AnyToolBox,
    max_iterations: usize,
}

impl FunctionInvoker {
    pub fn new(tools: AnyToolBox) -> Self {
        Self { tools, max_iterations: DEFAULT_MAX_ITERATIONS }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn tools(&self) -> &AnyToolBox {
        &self.tools
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Single question with a fresh history
    pub async fn ask(&self, llm: &LlmClient, model: &str, question: &str) -> Result<String, DemoError> {
        let mut messages = vec![ChatMessage::User {
            content: ChatMessageContent::Text(question.to_string()),
            name: None,
        }];
        self.run(llm, model, &mut messages).await
    }

    /// Drive the conversation to a text answer. `messages` receives every
    /// assistant and tool message produced on the way.
    pub async fn run(&self, llm: &LlmClient, model: &str, messages: &mut Vec<ChatMessage>) -> Result<String, DemoError> {
        let offer_tools = !self.tools.is_empty() && llm.provider().supports_functions(model);

        for iteration in 0..self.max_iterations {
            let mut builder = ChatCompletionParametersBuilder::default();
            builder.model(model.to_string()).messages(messages.clone());
            if offer_tools {
                builder.with_function_calling_auto(&self.tools);
            }
            let request = builder
                .build()
                .map_err(|e| DemoError::Config(format!("Failed to build request: {}", e)))?;

            let response = llm.chat(request).await?;
            let message = response
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message)
                .ok_or_else(|| DemoError::InvalidResponse("response has no choices".to_string()))?;

            match &message {
                ChatMessage::Assistant { tool_calls: Some(calls), .. } if !calls.is_empty() => {
                    let calls = calls.clone();
                    tracing::debug!(target: "genai::tool", iteration, calls = calls.len(), "model requested tools");
                    messages.push(message);
                    for call in &calls {
                        let result = self.invoke(call).await;
                        messages.push(ChatMessage::Tool {
                            content: result.content(),
                            tool_call_id: call.id.clone(),
                        });
                    }
                }
                ChatMessage::Assistant { content, .. } => {
                    let text = match content {
                        Some(ChatMessageContent::Text(text)) => text.clone(),
                        _ => String::new(),
                    };
                    messages.push(message);
                    return Ok(text);
                }
                other => {
                    return Err(DemoError::InvalidResponse(format!("unexpected message from model: {:?}", other)));
                }
            }
        }

        Err(DemoError::MaxIterationsReached(self.max_iterations))
    }

    /// Failures become tool error messages so the model can recover
    pub async fn invoke(&self, call: &ToolCall) -> ToolResult {
        let name = call.function.name.as_str();
        let Some(tool) = self.tools.iter().find(|t| t.name() == name) else {
            tracing::warn!(target: "genai::tool", tool = name, "model called an unknown tool");
            return ToolResult::error(format!("unknown tool: {}", name));
        };

        let args = if call.function.arguments.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str::<Value>(&call.function.arguments) {
                Ok(args) => args,
                Err(e) => return ToolResult::error(format!("arguments are not valid JSON: {}", e)),
            }
        };

        tracing::debug!(target: "genai::tool", tool = name, %args, "executing tool");
        let result = tool.execute_json(args).await;
        if !result.is_success() {
            tracing::warn!(target: "genai::tool", tool = name, result = %result.content(), "tool failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Scripted, ScriptedProvider};
    use crate::tools::{interactive_tools, SumTool};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_tool_call_then_answer() {
        let provider = ScriptedProvider::new(vec![
            Scripted::call("call_1", "calculate_sum", json!({ "a": 15, "b": 27 })),
            Scripted::text("15 + 27 is 42."),
        ]);
        let invoker = FunctionInvoker::new(interactive_tools());

        let mut messages = vec![ChatMessage::User {
            content: ChatMessageContent::Text("What's 15 + 27?".to_string()),
            name: None,
        }];
        let answer = invoker.run(&provider.client(), "gpt-4o-mini", &mut messages).await.unwrap();
        assert_eq!(answer, "15 + 27 is 42.");

        assert_eq!(messages.len(), 4);
        assert!(matches!(&messages[1], ChatMessage::Assistant { tool_calls: Some(calls), .. } if calls.len() == 1));
        assert!(matches!(&messages[2], ChatMessage::Tool { content, tool_call_id } if content == "42" && tool_call_id == "call_1"));

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].tools.as_ref().map(|t| t.len()), Some(3));
        assert_eq!(requests[1].messages.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_reported_to_the_model() {
        let provider = ScriptedProvider::new(vec![
            Scripted::call("call_9", "launch_rocket", json!({})),
            Scripted::text("I can't do that."),
        ]);
        let invoker = FunctionInvoker::new(vec![Arc::new(SumTool)]);

        let mut messages = Vec::new();
        let answer = invoker.run(&provider.client(), "m", &mut messages).await.unwrap();
        assert_eq!(answer, "I can't do that.");
        assert!(matches!(&messages[1], ChatMessage::Tool { content, .. } if content == "Error: unknown tool: launch_rocket"));
    }

    #[tokio::test]
    async fn test_bad_arguments_are_reported_to_the_model() {
        let provider = ScriptedProvider::new(vec![
            Scripted::ToolCalls(vec![("c".to_string(), "calculate_sum".to_string(), "{not json".to_string())]),
            Scripted::text("Sorry."),
        ]);
        let invoker = FunctionInvoker::new(vec![Arc::new(SumTool)]);

        let mut messages = Vec::new();
        invoker.run(&provider.client(), "m", &mut messages).await.unwrap();
        assert!(matches!(&messages[1], ChatMessage::Tool { content, .. } if content.starts_with("Error: arguments are not valid JSON")));
    }

    #[tokio::test]
    async fn test_max_iterations() {
        let provider = ScriptedProvider::new(vec![
            Scripted::call("a", "calculate_sum", json!({ "a": 1, "b": 1 })),
            Scripted::call("b", "calculate_sum", json!({ "a": 1, "b": 1 })),
            Scripted::text("never reached"),
        ]);
        let invoker = FunctionInvoker::new(vec![Arc::new(SumTool)]).with_max_iterations(2);

        let result = invoker.ask(&provider.client(), "m", "loop").await;
        assert!(matches!(result, Err(DemoError::MaxIterationsReached(2))));
    }

    #[tokio::test]
    async fn test_llm_failure_propagates() {
        let provider = ScriptedProvider::new(vec![Scripted::Fail("401 unauthorized".to_string())]);
        let invoker = FunctionInvoker::new(interactive_tools());

        let result = invoker.ask(&provider.client(), "m", "hi").await;
        assert!(matches!(result, Err(DemoError::Llm(_))));
    }

    #[test]
    fn test_tool_names() {
        let invoker = FunctionInvoker::new(interactive_tools());
        assert_eq!(invoker.tool_names(), vec!["get_weather", "get_date_time", "calculate_sum"]);
    }
}
