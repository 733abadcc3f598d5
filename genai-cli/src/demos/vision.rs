use std::path::PathBuf;

use clap::Args;
use genai_core::config::Settings;
use genai_core::vision::{
    analyze_image, find_local_image, load_image, LOCAL_PROMPT_PARTS, LOCAL_SYSTEM_PROMPT, SAMPLE_IMAGE_URL,
    URL_PROMPT_PARTS, URL_SYSTEM_PROMPT,
};
use genai_llm::{ImageInput, LlmClient};

use super::{banner, missing_github_token, rule, DemoResult};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Args, Debug)]
pub struct VisionArgs {
    /// Model to use instead of the demo's default
    #[arg(long, short)]
    pub model: Option<String>,

    /// Image analysed first
    #[arg(long, default_value = SAMPLE_IMAGE_URL)]
    pub url: String,

    /// Directory searched for a local image (defaults to the current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

pub async fn run(args: VisionArgs) -> DemoResult {
    let settings = Settings::load()?;
    let Ok(llm) = settings.github_client(None) else {
        missing_github_token();
        return Ok(());
    };
    let model = args.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string());

    println!("👁️  Multimodal AI Demo - Vision Analysis");
    println!("========================================");
    println!("This demo analyzes images using AI vision capabilities.\n");

    analyze_url(&llm, &model, &args.url).await;

    let dir = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    analyze_local(&llm, &model, &dir).await;

    println!("✨ Vision analysis demo completed!");
    Ok(())
}

async fn analyze_url(llm: &LlmClient, model: &str, url: &str) {
    banner("🖼️  Demo 1: Analyzing Image from URL", '─');
    println!("🔗 Analyzing image: {}", url);
    println!("🤖 AI Analysis:");
    println!("{}", rule('─', 50));

    let image = ImageInput::Url(url.to_string());
    match analyze_image(llm, model, URL_SYSTEM_PROMPT, &URL_PROMPT_PARTS, image).await {
        Ok(text) => println!("{}", text),
        Err(e) => {
            println!("❌ Error analyzing image from URL: {}", e);
            println!("Note: The image URL might not be accessible or the model might not support vision.");
        }
    }
    println!();
}

async fn analyze_local(llm: &LlmClient, model: &str, dir: &std::path::Path) {
    banner("📁 Demo 2: Analyzing Local Image", '─');

    let path = match find_local_image(dir) {
        Ok(Some(path)) => path,
        Ok(None) => {
            println!("💡 No local image files found in current directory.");
            println!("   To test with a local image, place a .jpg, .png, or other image file in this directory.");
            println!();
            return;
        }
        Err(e) => {
            println!("❌ Error analyzing local image: {}", e);
            println!();
            return;
        }
    };

    let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let result = match load_image(&path) {
        Ok(image) => {
            println!("📸 Analyzing local image: {}", file_name);
            println!("🤖 AI Analysis:");
            println!("{}", rule('─', 50));
            analyze_image(llm, model, LOCAL_SYSTEM_PROMPT, &LOCAL_PROMPT_PARTS, image).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(text) => println!("{}", text),
        Err(e) => {
            println!("❌ Error analyzing local image: {}", e);
            println!("Note: The model might not support vision or the image format might not be supported.");
        }
    }
    println!();
}
