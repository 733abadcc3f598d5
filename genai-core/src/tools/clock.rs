use chrono::Local;

use super::{tool, ToolEmptyParams, ToolResult};

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn now() -> String {
    Local::now().format(DATE_TIME_FORMAT).to_string()
}

#[derive(Clone, Default)]
pub struct DateTimeTool;

#[tool(name = "get_date_time", description = "Get the current date and time")]
impl DateTimeTool {
    async fn execute(&self, params: ToolEmptyParams) -> ToolResult {
        let info = format!("Current date and time: {}", now());
        tracing::info!(target: "genai::tool", tool = "get_date_time", %info);
        println!("   🕒 Function Call - DateTime: {}", info);
        ToolResult::success(info)
    }
}

#[derive(Clone, Default)]
pub struct CurrentTimeTool;

#[tool(name = "get_current_time", description = "Get the current date and time")]
impl CurrentTimeTool {
    async fn execute(&self, params: ToolEmptyParams) -> ToolResult {
        let current_time = now();
        tracing::info!(target: "genai::tool", tool = "get_current_time", %current_time);
        println!("  🕐 [Function Call] Getting current time: {}", current_time);
        ToolResult::success(format!("Current date and time: {}", current_time))
    }
}
