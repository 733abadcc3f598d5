use genai_core::config::Settings;

use super::{error_line, github_hint, missing_github_token, rule, DemoResult, ModelArgs, REVIEWS};

pub const DEFAULT_MODEL: &str = "Phi-3.5-MoE-instruct";

pub fn sentiment_prompt() -> String {
    let mut prompt = String::from(
        "You will analyze the sentiment of the following product reviews. Each line is its own review. \
         Output the sentiment of each review in a bulleted list and then provide a general sentiment of all reviews.\n",
    );
    for review in REVIEWS {
        prompt.push_str(review);
        prompt.push('\n');
    }
    prompt
}

pub async fn run(args: ModelArgs) -> DemoResult {
    let settings = Settings::load()?;
    let Ok(llm) = settings.github_client(None) else {
        missing_github_token();
        return Ok(());
    };
    let model = args.model_or(DEFAULT_MODEL);

    println!("🤖 Analyzing product review sentiments...\n");
    println!("📝 Reviews to analyze:");
    for review in REVIEWS {
        println!("   • {}", review);
    }
    println!("\n🔄 Sending to AI model...\n");

    match llm.complete(&model, &sentiment_prompt()).await {
        Ok(text) => {
            println!("🎯 AI Analysis Result:");
            println!("{}", rule('=', 50));
            println!("{}", text);
        }
        Err(e) => {
            error_line(&e);
            github_hint();
        }
    }
    Ok(())
}
