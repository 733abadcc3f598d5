pub mod github;
pub mod azure;
pub mod openai;
pub mod openai_compatible;
pub mod ollama;


use openai_dive::v1::resources::model::ListModelResponse;
use serde_json::{json, Value};

use crate::provider::LlmError;

/// Normalize a model listing into the OpenAI shape.
///
/// Accepts `{"object": "list", "data": [...]}` as well as the bare arrays some
/// catalogs return. Azure ML asset ids are replaced by the model name.
pub(crate) fn parse_model_list(value: Value) -> Result<ListModelResponse, LlmError> {
    let entries = match &value {
        Value::Array(items) => items.clone(),
        Value::Object(obj) => obj.get("data").and_then(|d| d.as_array()).cloned().unwrap_or_default(),
        _ => Vec::new(),
    };

    let data: Vec<Value> = entries
        .iter()
        .filter_map(|entry| {
            let id = entry.get("id").and_then(|v| v.as_str());
            let name = entry.get("name").and_then(|v| v.as_str());
            let id = match (id, name) {
                (Some(id), Some(name)) if id.starts_with("azureml://") => name,
                (Some(id), _) => id,
                (None, Some(name)) => name,
                (None, None) => return None,
            };
            let owned_by = entry
                .get("owned_by")
                .or_else(|| entry.get("publisher"))
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            Some(json!({ "id": id, "object": "model", "created": 0, "owned_by": owned_by }))
        })
        .collect();

    serde_json::from_value(json!({ "object": "list", "data": data })).map_err(|e| Box::new(e) as LlmError)
}

/// A single-entry listing, for endpoints that cannot enumerate their models
pub(crate) fn single_model(id: &str, owned_by: &str) -> Result<ListModelResponse, LlmError> {
    parse_model_list(json!([{ "id": id, "owned_by": owned_by }]))
}
