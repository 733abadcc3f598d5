use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructuredOutputError {
    #[error("the model returned an empty response")]
    EmptyResponse,
    #[error("no JSON document found in the response")]
    NoJson,
    #[error("invalid JSON: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Pull the JSON document out of a model answer.
///
/// Models asked to "respond only with valid JSON" still wrap it in markdown
/// fences or a sentence of prose from time to time. The outermost object or
/// array is returned, whichever opens first.
pub fn extract_json(text: &str) -> Result<&str, StructuredOutputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(StructuredOutputError::EmptyResponse);
    }

    let body = strip_fence(trimmed).unwrap_or(trimmed);

    let start = body.find(|c| c == '{' || c == '[').ok_or(StructuredOutputError::NoJson)?;
    let close = if body[start..].starts_with('{') { '}' } else { ']' };
    let end = body.rfind(close).ok_or(StructuredOutputError::NoJson)?;
    if end < start {
        return Err(StructuredOutputError::NoJson);
    }
    Ok(&body[start..=end])
}

fn strip_fence(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after = &text[open + 3..];
    // skip the info string (```json)
    let content_start = after.find('\n')? + 1;
    let content = &after[content_start..];
    let close = content.find("```")?;
    Some(content[..close].trim())
}

pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T, StructuredOutputError> {
    let json = extract_json(text)?;
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Verdict {
        label: String,
        score: f64,
    }

    #[test]
    fn test_plain_json() {
        let verdict: Verdict = parse_structured(r#"{"label": "positive", "score": 0.9}"#).unwrap();
        assert_eq!(verdict, Verdict { label: "positive".to_string(), score: 0.9 });
    }

    #[test]
    fn test_fenced_json() {
        let text = "Here you go:\n```json\n{\"label\": \"neutral\", \"score\": 0.5}\n```\nAnything else?";
        let verdict: Verdict = parse_structured(text).unwrap();
        assert_eq!(verdict.label, "neutral");
    }

    #[test]
    fn test_prose_around_json() {
        let text = "Sure! {\"label\": \"negative\", \"score\": 0.1} Hope this helps.";
        assert_eq!(extract_json(text).unwrap(), r#"{"label": "negative", "score": 0.1}"#);
    }

    #[test]
    fn test_array_document() {
        assert_eq!(extract_json("result: [1, 2, 3]").unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(extract_json("   "), Err(StructuredOutputError::EmptyResponse)));
        assert!(matches!(extract_json("no json here"), Err(StructuredOutputError::NoJson)));
        assert!(matches!(parse_structured::<Verdict>("{\"label\": 3}"), Err(StructuredOutputError::Invalid(_))));
    }
}
