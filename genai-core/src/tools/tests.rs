use serde_json::json;

use crate::tools::{
    azure_tools, interactive_tools, known_distance, AnyTool, CurrentConditionsTool, DistanceParams,
    DistanceTool, DateTimeTool, SumParams, SumTool, Tool, ToolEmptyParams, ToolResult, WeatherParams,
    WeatherTool,
};
use genai_llm::ToolDescription;

fn output(result: ToolResult) -> String {
    match result {
        ToolResult::Success { output, .. } => output,
        ToolResult::Error { error, .. } => panic!("tool failed: {}", error),
    }
}

#[tokio::test]
async fn test_weather_defaults_to_your_area() {
    let text = output(WeatherTool.execute(WeatherParams::default()).await);
    assert!(text.starts_with("The weather in your area is "), "{}", text);
    assert!(text.ends_with("sunny.") || text.ends_with("rainy.") || text.ends_with("cloudy."), "{}", text);

    let temperature: i32 = text
        .trim_start_matches("The weather in your area is ")
        .split("°C")
        .next()
        .unwrap()
        .parse()
        .unwrap();
    assert!((-5..35).contains(&temperature));
}

#[tokio::test]
async fn test_weather_named_location() {
    let params = WeatherParams { location: Some("Paris".to_string()) };
    assert!(output(WeatherTool.execute(params).await).starts_with("The weather in Paris is "));
}

#[tokio::test]
async fn test_current_conditions_format() {
    let text = output(CurrentConditionsTool.execute(ToolEmptyParams::default()).await);
    assert!(text.starts_with("Temperature: "));
    assert!(text.contains("°C, Conditions: "));
    let humidity: u32 = text.rsplit("Humidity: ").next().unwrap().trim_end_matches('%').parse().unwrap();
    assert!((30..90).contains(&humidity));
}

#[tokio::test]
async fn test_date_time_format() {
    let text = output(DateTimeTool.execute(ToolEmptyParams::default()).await);
    let stamp = text.trim_start_matches("Current date and time: ");
    assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok(), "{}", text);
}

#[tokio::test]
async fn test_sum() {
    let result = SumTool.execute(SumParams { a: 15, b: 27 }).await;
    assert_eq!(result, ToolResult::success("42"));

    let overflow = SumTool.execute(SumParams { a: i64::MAX, b: 1 }).await;
    assert!(!overflow.is_success());
}

#[test]
fn test_known_distances_are_symmetric() {
    assert_eq!(known_distance("New York", "Los Angeles"), Some(2445));
    assert_eq!(known_distance("Los Angeles", "New York"), Some(2445));
    assert_eq!(known_distance("new york", "miami"), Some(1090));
    assert_eq!(known_distance("Detroit", "Chicago"), Some(280));
    assert_eq!(known_distance("Paris", "Berlin"), None);
}

#[tokio::test]
async fn test_distance_defaults_and_estimates() {
    let text = output(DistanceTool.execute(DistanceParams::default()).await);
    assert_eq!(text, "Distance between New York and Los Angeles: 2445 miles");

    let params = DistanceParams { city1: Some("Paris".to_string()), city2: Some("Berlin".to_string()) };
    let text = output(DistanceTool.execute(params).await);
    let miles: u32 = text
        .trim_start_matches("Estimated distance between Paris and Berlin: ")
        .trim_end_matches(" miles")
        .parse()
        .unwrap();
    assert!((100..3000).contains(&miles));
}

#[tokio::test]
async fn test_execute_json_arguments() {
    let tool = SumTool;
    assert_eq!(tool.execute_json(json!({ "a": 2, "b": 3 })).await, ToolResult::success("5"));

    let bad = tool.execute_json(json!({ "a": "two" })).await;
    assert!(matches!(bad, ToolResult::Error { ref error, .. } if error.contains("calculate_sum")));

    // no-argument tools accept a null payload
    assert!(DateTimeTool.execute_json(serde_json::Value::Null).await.is_success());
}

#[test]
fn test_schema_marks_required_fields() {
    let schema = SumTool.parameters_schema();
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["required"], json!(["a", "b"]));
    assert!(schema.get("$schema").is_none());

    let schema = WeatherTool.parameters_schema();
    assert_eq!(schema["properties"]["location"]["type"], "string");
    assert!(schema.get("required").is_none());
}

#[test]
fn test_tool_sets() {
    let names: Vec<&str> = interactive_tools().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["get_weather", "get_date_time", "calculate_sum"]);

    let names: Vec<&str> = azure_tools().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["get_current_conditions", "get_current_time", "calculate_distance"]);
}

#[test]
fn test_tool_result_content() {
    assert_eq!(ToolResult::success("ok").content(), "ok");
    assert_eq!(ToolResult::error("boom").content(), "Error: boom");
}
