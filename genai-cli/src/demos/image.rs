use std::path::PathBuf;

use chrono::Local;
use clap::Args;
use genai_core::config::{Settings, AZURE_OPENAI_IMAGE_MODEL};
use genai_core::imaging::{
    first_image_bytes, image_request, open_in_viewer, output_dir, save_image, DEFAULT_IMAGE_MODEL, IMAGE_PROMPT,
    PROMPT_IDEAS,
};

use super::{missing_azure_config, DemoResult};

#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Image deployment to use instead of AZURE_OPENAI_IMAGE_MODEL
    #[arg(long, short)]
    pub model: Option<String>,

    #[arg(long, default_value = IMAGE_PROMPT)]
    pub prompt: String,

    /// Where the image is written (defaults to the desktop)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Do not open the image once saved
    #[arg(long)]
    pub no_open: bool,
}

pub async fn run(args: ImageArgs) -> DemoResult {
    println!("🎨 Azure OpenAI Image Generation Demo");
    println!();

    let settings = Settings::load()?;
    let Ok(mut azure) = settings.azure_openai() else {
        missing_azure_config(&[(AZURE_OPENAI_IMAGE_MODEL, DEFAULT_IMAGE_MODEL)]);
        return Ok(());
    };
    if let Some(model) = args.model {
        azure.image_model = model;
    }
    let llm = azure.image_client();

    println!("🖼️ Generating image with prompt: {}", args.prompt);
    println!("🤖 Using model: {}", azure.image_model);
    println!();
    println!("⏳ Generating image... This may take a few seconds");

    let generated = match llm.generate_image(image_request(&azure.image_model, &args.prompt)).await {
        Ok(response) => first_image_bytes(&response),
        Err(e) => Err(e.into()),
    };
    let saved = generated.and_then(|bytes| {
        let dir = match &args.output {
            Some(dir) => dir.clone(),
            None => output_dir()?,
        };
        save_image(&bytes, &dir, Local::now())
    });

    let path = match saved {
        Ok(path) => path,
        Err(e) => {
            println!("❌ Error generating image: {}", e);
            println!();
            println!("🔧 Troubleshooting:");
            println!("• Verify your Azure OpenAI endpoint and API key are correct");
            println!("• Ensure your Azure resource has DALL-E models deployed");
            println!("• Check that you have sufficient quota for image generation");
            return Ok(());
        }
    };

    println!("✅ Image generated successfully!");
    println!("📁 Saved to: {}", path.display());
    println!();

    if !args.no_open {
        match open_in_viewer(&path) {
            Ok(()) => println!("🖼️ Image opened in default viewer"),
            Err(_) => println!("📝 Please manually open the image file to view it"),
        }
        println!();
    }

    println!("💡 Try experimenting with different prompts:");
    for idea in PROMPT_IDEAS {
        println!("   - '{}'", idea);
    }
    Ok(())
}
