use genai_llm::{parse_structured, LlmClient};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::DemoError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProductAnalysis {
    pub overall_sentiment: String,
    pub sentiment_score: f64,
    pub key_themes: Vec<String>,
    pub summary: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Recipe {
    pub name: String,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub servings: u32,
    pub difficulty: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<RecipeStep>,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Ingredient {
    pub item: String,
    pub amount: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecipeStep {
    pub step_number: u32,
    pub instruction: String,
    pub time_minutes: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeetingSummary {
    pub meeting_type: String,
    pub key_topics: Vec<String>,
    pub decisions_made: Vec<String>,
    pub action_items: Vec<ActionItem>,
    pub metrics_mentioned: Vec<Metric>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ActionItem {
    pub assignee: String,
    pub task: String,
    pub priority: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Metric {
    #[serde(rename = "metric")]
    pub name: String,
    pub value: String,
    pub context: String,
}

pub const PRODUCT_REVIEWS: &str = r#""This laptop is amazing! Super fast processor and great battery life. Worth every penny."
"The screen is a bit dim and the keyboard feels cheap. Not impressed."
"Excellent build quality and performance. Highly recommended for developers."
"Overpriced for what you get. There are better alternatives.""#;

pub const MEETING_TRANSCRIPT: &str = "John: Thanks everyone for joining. Let's start with the quarterly review.
Sarah: The sales numbers look good. We're up 15% from last quarter.
Mike: That's great! The new marketing campaign is really paying off.
John: What about the development timeline for the new features?
Sarah: We're slightly behind on the mobile app, but the web version is on track.
Mike: I think we need to hire two more developers to meet our Q4 goals.
John: Agreed. I'll work on the budget approval. Any other concerns?
Sarah: The customer support team needs better tools for handling tickets.";

const JSON_ONLY: &str = "Respond only with valid JSON, no additional text.";

pub fn product_analysis_prompt(reviews: &str) -> String {
    format!(
        r#"Analyze these product reviews and return the results in the following JSON format:
{{
    "overall_sentiment": "positive|negative|neutral",
    "sentiment_score": 0.0-1.0,
    "key_themes": ["theme1", "theme2"],
    "summary": "brief summary",
    "recommendation": "buy|avoid|consider"
}}

Reviews:
{}

{}"#,
        reviews, JSON_ONLY
    )
}

pub fn recipe_prompt() -> String {
    format!(
        r#"Create a simple pasta recipe and return it in the following JSON format:
{{
    "name": "recipe name",
    "prep_time_minutes": 15,
    "cook_time_minutes": 20,
    "servings": 4,
    "difficulty": "easy|medium|hard",
    "ingredients": [
        {{"item": "ingredient name", "amount": "2 cups", "notes": "optional notes"}}
    ],
    "steps": [
        {{"step_number": 1, "instruction": "detailed instruction", "time_minutes": 5}}
    ],
    "tips": ["tip1", "tip2"]
}}

{}"#,
        JSON_ONLY
    )
}

pub fn meeting_summary_prompt(transcript: &str) -> String {
    format!(
        r#"Summarize this meeting transcript and return the results in the following JSON format:
{{
    "meeting_type": "type of meeting",
    "key_topics": ["topic1", "topic2"],
    "decisions_made": ["decision1", "decision2"],
    "action_items": [
        {{"assignee": "person", "task": "task description", "priority": "high|medium|low"}}
    ],
    "metrics_mentioned": [
        {{"metric": "metric name", "value": "value", "context": "context"}}
    ],
    "next_steps": ["step1", "step2"]
}}

Meeting Transcript:
{}

{}"#,
        transcript, JSON_ONLY
    )
}

/// Complete `prompt` and decode the JSON document in the answer
pub async fn ask_structured<T: DeserializeOwned>(llm: &LlmClient, model: &str, prompt: &str) -> Result<T, DemoError> {
    let answer = llm.complete(model, prompt).await?;
    tracing::debug!(target: "genai::llm", chars = answer.len(), "structured answer");
    Ok(parse_structured(&answer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Scripted, ScriptedProvider};

    #[test]
    fn test_prompts_embed_inputs() {
        let prompt = product_analysis_prompt(PRODUCT_REVIEWS);
        assert!(prompt.contains("\"overall_sentiment\": \"positive|negative|neutral\""));
        assert!(prompt.contains("Worth every penny."));
        assert!(prompt.ends_with("Respond only with valid JSON, no additional text."));

        assert!(recipe_prompt().contains("{\"step_number\": 1, \"instruction\": \"detailed instruction\", \"time_minutes\": 5}"));
        assert!(meeting_summary_prompt(MEETING_TRANSCRIPT).contains("Sarah: The customer support team"));
    }

    #[test]
    fn test_missing_fields_default() {
        let recipe: Recipe = parse_structured(r#"{"name": "Aglio e olio", "servings": 2}"#).unwrap();
        assert_eq!(recipe.name, "Aglio e olio");
        assert_eq!(recipe.servings, 2);
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.prep_time_minutes, 0);
    }

    #[test]
    fn test_metric_name_field() {
        let summary: MeetingSummary = parse_structured(r#"{
            "meeting_type": "Quarterly review",
            "metrics_mentioned": [{"metric": "sales growth", "value": "15%", "context": "vs last quarter"}],
            "action_items": [{"assignee": "John", "task": "Budget approval", "priority": "high"}]
        }"#).unwrap();
        assert_eq!(summary.metrics_mentioned[0].name, "sales growth");
        assert_eq!(summary.action_items[0].assignee, "John");
        assert!(summary.next_steps.is_empty());
    }

    #[tokio::test]
    async fn test_ask_structured_handles_fences() {
        let provider = ScriptedProvider::new(vec![Scripted::text(
            "```json\n{\"overall_sentiment\": \"neutral\", \"sentiment_score\": 0.55, \"key_themes\": [\"price\", \"performance\"], \"summary\": \"Mixed\", \"recommendation\": \"consider\"}\n```",
        )]);
        let analysis: ProductAnalysis = ask_structured(&provider.client(), "gpt-4o-mini", "p").await.unwrap();
        assert_eq!(analysis.overall_sentiment, "neutral");
        assert_eq!(analysis.key_themes, vec!["price", "performance"]);
        assert!((analysis.sentiment_score - 0.55).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_ask_structured_rejects_prose() {
        let provider = ScriptedProvider::new(vec![Scripted::text("I cannot help with that.")]);
        let result: Result<ProductAnalysis, _> = ask_structured(&provider.client(), "m", "p").await;
        assert!(matches!(result, Err(DemoError::Structured(_))));
    }
}
