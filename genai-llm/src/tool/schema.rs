use serde_json::Value;

/// Reshape a generated JSON schema into what chat completion APIs accept as
/// function parameters.
///
/// Schema metadata is dropped, `["T", "null"]` unions collapse to `T`, and only
/// the non nullable properties are listed as required.
pub fn function_schema(mut schema: Value) -> Value {
    fix_schema(&mut schema);
    schema
}

fn fix_schema(schema: &mut Value) {
    let Value::Object(obj) = schema else {
        return;
    };
    obj.remove("$schema");
    obj.remove("title");

    if let Some(Value::Object(properties)) = obj.get_mut("properties") {
        let mut required = Vec::new();

        for (field_name, field_schema) in properties.iter_mut() {
            let Value::Object(field_obj) = field_schema else {
                continue;
            };

            let nullable = match field_obj.get("type") {
                Some(Value::Array(types)) if types.len() == 2 && types.iter().any(|t| t == "null") => {
                    types.iter().find(|t| *t != "null").cloned()
                }
                _ => None,
            };

            match nullable {
                Some(single) => {
                    field_obj.insert("type".to_string(), single);
                }
                None if field_obj.contains_key("type") || field_obj.contains_key("$ref") => {
                    required.push(Value::String(field_name.clone()));
                }
                None => {}
            }
            fix_schema(field_schema);
        }

        if required.is_empty() {
            obj.remove("required");
        } else {
            obj.insert("required".to_string(), Value::Array(required));
        }
    }

    for (key, value) in obj.iter_mut() {
        if key != "properties" && value.is_object() {
            fix_schema(value);
        }
    }
}
