use clap::Args;
use console::style;
use genai_core::config::Settings;
use genai_llm::LlmClient;

use crate::demos::DemoResult;

#[derive(Args, Debug)]
pub struct ProvidersArgs {
    /// Query every configured provider for its models
    #[arg(long)]
    pub models: bool,
}

pub async fn run(args: ProvidersArgs) -> DemoResult {
    let settings = Settings::load()?;
    let values = settings.values();

    for info in LlmClient::list_providers() {
        let configured = info.env_vars.iter().filter(|v| v.required).all(|v| values.contains_key(&v.name));
        let mark = if configured { style("✓").green() } else { style("·").dim() };
        println!("{} {} ({})", mark, style(info.display_name).bold(), info.name);
        for var in &info.env_vars {
            let state = if values.contains_key(&var.name) { "set" } else if var.required { "missing" } else { "unset" };
            println!("    {:<28} {:<8} {}", var.name, state, style(&var.description).dim());
        }

        if args.models && configured {
            list_models(info.name, &settings).await;
        }
        println!();
    }
    Ok(())
}

async fn list_models(provider: &str, settings: &Settings) {
    let llm = match LlmClient::create_provider(provider, &settings.values()) {
        Ok(llm) => llm,
        Err(e) => {
            println!("    ❌ {}", e);
            return;
        }
    };
    match llm.models().await {
        Ok(list) => {
            for model in list.data {
                println!("    - {}", model.id);
            }
        }
        Err(e) => println!("    ❌ could not list models: {}", e),
    }
}
