use genai_core::config::Settings;
use genai_llm::is_connection_error;

use super::{error_line, DemoResult, ModelArgs, REVIEWS};

pub const DEFAULT_MODEL: &str = "phi4-mini";

pub fn sentiment_prompt() -> String {
    let mut prompt = String::from(
        "You will analyze the sentiment of the following product reviews. Each line is its own review. \
         Output the sentiment of each review in a bulleted list including the original text and the sentiment, \
         and then provide a general sentiment of all reviews.\n\nReviews:\n",
    );
    for review in REVIEWS {
        prompt.push_str(review);
        prompt.push('\n');
    }
    prompt
}

pub async fn run(args: ModelArgs) -> DemoResult {
    let settings = Settings::load()?;
    let model = args.model_or(DEFAULT_MODEL);
    let llm = settings.ollama_client();

    println!("🔧 Local AI Demo with Ollama");
    println!("Using {} model locally via Ollama", model);
    println!();

    let prompt = sentiment_prompt();
    println!("📝 Prompt sent to Ollama:");
    println!("{}", prompt);
    println!("🤖 Ollama Response:");
    println!();

    match llm.complete(&model, &prompt).await {
        Ok(text) => {
            println!("{}", text);
            println!();
            println!("✅ Local AI demo completed successfully!");
            println!("💡 Try modifying the reviews or prompt to experiment with different scenarios");
        }
        Err(e) if is_connection_error(&e) => {
            println!("❌ Error: Could not connect to Ollama server at {}", settings.ollama_base_url());
            println!("Please ensure Ollama is running:");
            println!("  1. Start Ollama: ollama serve");
            println!("  2. Pull the model: ollama pull {}", model);
            println!("  3. Try again");
        }
        Err(e) => {
            error_line(&e);
            println!("Make sure Ollama is properly installed and the {} model is available", model);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_layout() {
        let prompt = sentiment_prompt();
        let lines: Vec<&str> = prompt.lines().collect();
        assert!(lines[0].contains("including the original text and the sentiment"));
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Reviews:");
        assert_eq!(&lines[3..], &REVIEWS);
    }
}
