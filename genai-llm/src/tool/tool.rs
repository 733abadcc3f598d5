use std::sync::Arc;

use openai_dive::v1::resources::chat::{ChatCompletionFunction, ChatCompletionTool, ChatCompletionToolType};

/// A tool must be able to describe its parameter as a json schema
pub trait ToolDescription: Send + Sync {

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn parameters_schema(&self) -> serde_json::Value;

}

/// A toolbox is a set of tool
pub type ToolBox = Vec<Arc<dyn ToolDescription>>;

pub trait ContainsTool {
    fn contains_tool(&self, name: &str) -> bool;
}

impl<T: ToolDescription + ?Sized> ContainsTool for [Arc<T>] {
    fn contains_tool(&self, name: &str) -> bool {
        self.iter().any(|tool| tool.name() == name)
    }
}

/// Wire description of a tool for the chat completion api
pub fn completion_tool<T: ToolDescription + ?Sized>(tool: &T) -> ChatCompletionTool {
    ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: ChatCompletionFunction {
            name: tool.name().to_string(),
            description: Some(tool.description().to_string()),
            parameters: tool.parameters_schema(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Clock;

    impl ToolDescription for Clock {
        fn name(&self) -> &'static str {
            "get_time"
        }

        fn description(&self) -> &'static str {
            "Get the current time"
        }

        fn parameters_schema(&self) -> serde_json::Value {
            json!({ "type": "object", "properties": {} })
        }
    }

    #[test]
    fn test_contains_tool() {
        let tools: ToolBox = vec![Arc::new(Clock)];
        assert!(tools.contains_tool("get_time"));
        assert!(!tools.contains_tool("get_weather"));
    }

    #[test]
    fn test_completion_tool_wire_format() {
        let tool = completion_tool(&Clock);
        let json = serde_json::to_value(&tool).unwrap();
        assert_eq!(json["type"], "function");
        assert_eq!(json["function"]["name"], "get_time");
        assert_eq!(json["function"]["description"], "Get the current time");
        assert_eq!(json["function"]["parameters"]["type"], "object");
    }
}
