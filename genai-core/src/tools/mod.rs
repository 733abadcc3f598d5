pub mod types;
pub mod weather;
pub mod clock;
pub mod math;
pub mod distance;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use genai_macros::tool;
pub use types::{Tool, ToolResult, AnyTool, AnyToolBox, ToolEmptyParams};

pub use weather::{WeatherTool, WeatherParams, CurrentConditionsTool};
pub use clock::{DateTimeTool, CurrentTimeTool};
pub use math::{SumTool, SumParams};
pub use distance::{DistanceTool, DistanceParams, known_distance};

/// Tools offered in the interactive function calling demo
pub fn interactive_tools() -> AnyToolBox {
    vec![
        Arc::new(WeatherTool),
        Arc::new(DateTimeTool),
        Arc::new(SumTool),
    ]
}

/// Tools offered in the scripted Azure demo
pub fn azure_tools() -> AnyToolBox {
    vec![
        Arc::new(CurrentConditionsTool),
        Arc::new(CurrentTimeTool),
        Arc::new(DistanceTool),
    ]
}
