use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{tool, ToolResult};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SumParams {
    /// First number
    pub a: i64,
    /// Second number
    pub b: i64,
}

#[derive(Clone, Default)]
pub struct SumTool;

#[tool(name = "calculate_sum", description = "Calculate the sum of two numbers")]
impl SumTool {
    async fn execute(&self, params: SumParams) -> ToolResult {
        let Some(result) = params.a.checked_add(params.b) else {
            return ToolResult::error(format!("{} + {} overflows", params.a, params.b));
        };
        tracing::info!(target: "genai::tool", tool = "calculate_sum", a = params.a, b = params.b, result);
        println!("   🧮 Function Call - Math: {} + {} = {}", params.a, params.b, result);
        ToolResult::success(result.to_string())
    }
}
