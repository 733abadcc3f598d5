use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use genai_llm::ToolDescription;
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a tool execution, sent back to the model as the tool message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToolResult {
    Success {
        output: String,
        metadata: Option<HashMap<String, Value>>,
    },
    Error {
        error: String,
        metadata: Option<HashMap<String, Value>>,
    },
}

impl ToolResult {
    pub fn success(output: impl Into<String>) -> Self {
        ToolResult::Success { output: output.into(), metadata: None }
    }

    pub fn error(error: impl Into<String>) -> Self {
        ToolResult::Error { error: error.into(), metadata: None }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success { .. })
    }

    /// Text handed to the model
    pub fn content(&self) -> String {
        match self {
            ToolResult::Success { output, .. } => output.clone(),
            ToolResult::Error { error, .. } => format!("Error: {}", error),
        }
    }
}

/// Parameters for tools that take no arguments
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ToolEmptyParams {}

/// A tool with typed parameters. Usually implemented through `#[tool]`.
#[async_trait]
pub trait Tool: ToolDescription {
    type Params: DeserializeOwned + JsonSchema + Send;

    async fn execute(&self, params: Self::Params) -> ToolResult;
}

/// Object safe view of a tool, driven by raw JSON arguments
#[async_trait]
pub trait AnyTool: ToolDescription {
    async fn execute_json(&self, args: Value) -> ToolResult;
}

#[async_trait]
impl<T> AnyTool for T
where
    T: Tool + Send + Sync,
{
    async fn execute_json(&self, args: Value) -> ToolResult {
        // models send "" or null for tools without parameters
        let args = match args {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        match serde_json::from_value::<T::Params>(args) {
            Ok(params) => self.execute(params).await,
            Err(e) => ToolResult::error(format!("invalid arguments for {}: {}", self.name(), e)),
        }
    }
}

pub type AnyToolBox = Vec<Arc<dyn AnyTool>>;
