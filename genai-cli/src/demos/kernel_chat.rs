use genai_core::chat::{is_exit_command, ChatSession};
use genai_core::config::Settings;

use super::{missing_github_token, print_chunk, read_line, DemoResult, ModelArgs};

pub const DEFAULT_MODEL: &str = "Phi-3.5-mini-instruct";
pub const ENDPOINT: &str = "https://models.github.ai/inference";

pub const SYSTEM_PROMPT: &str = "You are a helpful, creative, and friendly AI assistant. You explain things clearly and ask follow-up questions when helpful. Use emojis occasionally to make the conversation more engaging. If you don't know something, say so honestly.";

pub async fn run(args: ModelArgs) -> DemoResult {
    println!("💬 Interactive Chat with Semantic Kernel");
    println!("Type 'exit' or 'quit' to end the conversation");
    println!();

    let settings = Settings::load()?;
    let Ok(llm) = settings.github_client(Some(ENDPOINT)) else {
        println!("❌ Missing GitHub token");
        missing_github_token();
        return Ok(());
    };
    let mut session = ChatSession::new(args.model_or(DEFAULT_MODEL), Some(SYSTEM_PROMPT));

    println!("🤖 AI Assistant ready! How can I help you today?");
    println!();

    loop {
        let input = read_line("👤 You: ")?.unwrap_or_default();
        if is_exit_command(&input, &["exit", "quit"]) {
            println!("👋 Goodbye! Thanks for chatting!");
            break;
        }

        print_chunk("🤖 AI: ");
        match session.send_streaming(&llm, &input, print_chunk).await {
            Ok(_) => {
                println!();
                println!();
            }
            Err(e) => {
                println!();
                println!("❌ Error getting response: {}", e);
                println!("Let's try again!");
                println!();
            }
        }
    }

    println!("📊 Conversation ended. Total messages: {}", session.len());
    Ok(())
}
