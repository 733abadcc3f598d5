use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{tool, ToolEmptyParams, ToolResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WeatherParams {
    /// The location to get weather for
    pub location: Option<String>,
}

/// Simulated forecast for the interactive demo
#[derive(Clone, Default)]
pub struct WeatherTool;

#[tool(name = "get_weather", description = "Get the current weather for a location")]
impl WeatherTool {
    async fn execute(&self, params: WeatherParams) -> ToolResult {
        let location = params
            .location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| "your area".to_string());
        let temperature = fastrand::i32(-5..35);
        let conditions = match fastrand::u8(0..3) {
            0 => "sunny",
            1 => "rainy",
            _ => "cloudy",
        };

        let weather = format!("The weather in {} is {}°C and {}.", location, temperature, conditions);
        tracing::info!(target: "genai::tool", tool = "get_weather", %weather);
        println!("   🌤️  Function Call - Weather: {}", weather);
        ToolResult::success(weather)
    }
}

pub const CONDITIONS: [&str; 5] = ["sunny", "cloudy", "rainy", "partly cloudy", "windy"];

/// Simulated conditions with humidity, used by the Azure demo
#[derive(Clone, Default)]
pub struct CurrentConditionsTool;

#[tool(name = "get_current_conditions", description = "Get the current weather conditions")]
impl CurrentConditionsTool {
    async fn execute(&self, params: ToolEmptyParams) -> ToolResult {
        let temperature = fastrand::i32(-5..35);
        let condition = CONDITIONS[fastrand::usize(..CONDITIONS.len())];
        let humidity = fastrand::u32(30..90);

        let weather = format!("Temperature: {}°C, Conditions: {}, Humidity: {}%", temperature, condition, humidity);
        tracing::info!(target: "genai::tool", tool = "get_current_conditions", %weather);
        println!("  🌤️ [Function Call] Getting weather: {}", weather);
        ToolResult::success(weather)
    }
}
