use genai_core::config::Settings;
use genai_core::structured::{
    ask_structured, meeting_summary_prompt, product_analysis_prompt, recipe_prompt, MeetingSummary, ProductAnalysis,
    Recipe, MEETING_TRANSCRIPT, PRODUCT_REVIEWS,
};
use genai_llm::LlmClient;

use super::{banner, missing_github_token, DemoResult, ModelArgs};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub async fn run(args: ModelArgs) -> DemoResult {
    let settings = Settings::load()?;
    let Ok(llm) = settings.github_client(None) else {
        missing_github_token();
        return Ok(());
    };
    let model = args.model_or(DEFAULT_MODEL);

    println!("📊 Structured Output Demo");
    println!("=========================");
    println!("This demo shows how to get structured JSON responses from AI models.\n");

    product_analysis(&llm, &model).await;
    recipe_generation(&llm, &model).await;
    meeting_summary(&llm, &model).await;

    println!("✨ Demo completed! All responses were structured JSON objects.");
    Ok(())
}

async fn product_analysis(llm: &LlmClient, model: &str) {
    banner("🛍️  Demo 1: Product Review Analysis", '─');
    let prompt = product_analysis_prompt(PRODUCT_REVIEWS);
    match ask_structured::<ProductAnalysis>(llm, model, &prompt).await {
        Ok(analysis) => {
            println!("📈 Analysis Result:");
            println!("   Overall Sentiment: {}", analysis.overall_sentiment);
            println!("   Sentiment Score: {:.2}", analysis.sentiment_score);
            println!("   Key Themes: {}", analysis.key_themes.join(", "));
            println!("   Summary: {}", analysis.summary);
            println!("   Recommendation: {}", analysis.recommendation);
        }
        Err(e) => println!("❌ Error parsing product analysis: {}", e),
    }
    println!();
}

async fn recipe_generation(llm: &LlmClient, model: &str) {
    banner("👨‍🍳 Demo 2: Recipe Generation", '─');
    match ask_structured::<Recipe>(llm, model, &recipe_prompt()).await {
        Ok(recipe) => {
            println!("🍝 Generated Recipe:");
            println!("   Name: {}", recipe.name);
            println!(
                "   Prep: {}min | Cook: {}min | Serves: {}",
                recipe.prep_time_minutes, recipe.cook_time_minutes, recipe.servings
            );
            println!("   Difficulty: {}", recipe.difficulty);
            println!("   Ingredients:");
            for ingredient in &recipe.ingredients {
                println!("     • {} {}", ingredient.amount, ingredient.item);
            }
            println!("   Steps:");
            for step in &recipe.steps {
                println!("     {}. {} ({}min)", step.step_number, step.instruction, step.time_minutes);
            }
        }
        Err(e) => println!("❌ Error parsing recipe: {}", e),
    }
    println!();
}

async fn meeting_summary(llm: &LlmClient, model: &str) {
    banner("📝 Demo 3: Meeting Summary", '─');
    let prompt = meeting_summary_prompt(MEETING_TRANSCRIPT);
    match ask_structured::<MeetingSummary>(llm, model, &prompt).await {
        Ok(summary) => {
            println!("📋 Meeting Summary:");
            println!("   Type: {}", summary.meeting_type);
            println!("   Key Topics: {}", summary.key_topics.join(", "));
            println!("   Decisions Made:");
            for decision in &summary.decisions_made {
                println!("     • {}", decision);
            }
            println!("   Action Items:");
            for item in &summary.action_items {
                println!("     • {}: {} ({} priority)", item.assignee, item.task, item.priority);
            }
        }
        Err(e) => println!("❌ Error parsing meeting summary: {}", e),
    }
    println!();
}
