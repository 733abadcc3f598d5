use genai_core::chat::{is_exit_command, ChatSession};
use genai_core::config::Settings;

use super::{error_line, github_hint, missing_github_token, print_chunk, read_line, DemoResult, ModelArgs};

pub const DEFAULT_MODEL: &str = "Phi-3.5-MoE-instruct";

pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant specializing in .NET development and programming best practices. Keep your responses concise and practical.";

pub async fn run(args: ModelArgs) -> DemoResult {
    let settings = Settings::load()?;
    let Ok(llm) = settings.github_client(None) else {
        missing_github_token();
        return Ok(());
    };
    let mut session = ChatSession::new(args.model_or(DEFAULT_MODEL), Some(SYSTEM_PROMPT));

    println!("💬 Interactive .NET Programming Assistant");
    println!("=========================================");
    println!("Ask me anything about .NET development! Type 'quit' to exit.\n");

    loop {
        let input = read_line("👤 You: ")?.unwrap_or_default();
        if is_exit_command(&input, &["quit"]) {
            println!("👋 Goodbye! Happy coding!");
            break;
        }

        print_chunk("🤖 Assistant: ");
        if let Err(e) = session.send_streaming(&llm, &input, print_chunk).await {
            println!();
            error_line(&e);
            github_hint();
            break;
        }
        println!("\n");
    }
    Ok(())
}
