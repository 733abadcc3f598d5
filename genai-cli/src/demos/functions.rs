use genai_core::chat::is_exit_command;
use genai_core::config::Settings;
use genai_core::functions::FunctionInvoker;
use genai_core::tools::interactive_tools;

use super::{error_line, github_hint, missing_github_token, read_line, rule, DemoResult, ModelArgs};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub async fn run(args: ModelArgs) -> DemoResult {
    let settings = Settings::load()?;
    let Ok(llm) = settings.github_client(None) else {
        missing_github_token();
        return Ok(());
    };
    let model = args.model_or(DEFAULT_MODEL);
    let invoker = FunctionInvoker::new(interactive_tools());

    println!("🔧 AI Functions & Plugins Demo");
    println!("===============================");
    println!("Ask questions that might require tool usage!");
    println!("Try: 'What's the weather like?' or 'What time is it?' or 'What's 15 + 27?'");
    println!("Type 'quit' to exit.\n");

    loop {
        let question = read_line("👤 You: ")?.unwrap_or_default();
        if is_exit_command(&question, &["quit"]) {
            println!("👋 Goodbye!");
            break;
        }

        println!("\n🤖 Processing: {}", question);
        println!("{}", rule('─', 50));
        match invoker.ask(&llm, &model, &question).await {
            Ok(answer) => println!("💬 Response: {}\n", answer),
            Err(e) => {
                error_line(&e);
                github_hint();
                break;
            }
        }
    }
    Ok(())
}
