use genai_core::config::{Settings, AZURE_OPENAI_MODEL};
use genai_core::functions::FunctionInvoker;
use genai_core::tools::azure_tools;

use super::{error_line, missing_azure_config, print_chunk, DemoResult, ModelArgs};

pub const QUESTIONS: [&str; 5] = [
    "What time is it right now?",
    "What's the weather like today?",
    "Should I bring an umbrella?",
    "How far is it between New York and Los Angeles?",
    "What's the current time and weather? Should I go for a walk?",
];

pub async fn run(args: ModelArgs) -> DemoResult {
    println!("🔧 Azure OpenAI Function Calling Demo");
    println!();

    let settings = Settings::load()?;
    let Ok(mut azure) = settings.azure_openai() else {
        missing_azure_config(&[(AZURE_OPENAI_MODEL, "gpt-4o-mini")]);
        return Ok(());
    };
    if let Some(model) = args.model {
        azure.model = model;
    }
    let llm = azure.chat_client();
    let invoker = FunctionInvoker::new(azure_tools());

    println!("🤖 Using Azure OpenAI model: {}", azure.model);
    println!("🔧 Available functions: {}", invoker.tool_names().join(", "));
    println!();

    for question in QUESTIONS {
        println!("❓ Question: {}", question);
        print_chunk("🤖 Response: ");
        match invoker.ask(&llm, &azure.model, question).await {
            Ok(answer) => println!("{}", answer),
            Err(e) => error_line(&e),
        }
        println!();
    }

    println!("✅ Function calling demo completed!");
    println!("💡 Notice how the AI automatically called the appropriate functions to answer your questions");
    Ok(())
}
