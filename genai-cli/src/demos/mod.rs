pub mod azure_functions;
pub mod chat;
pub mod completion;
pub mod functions;
pub mod image;
pub mod kernel_chat;
pub mod local;
pub mod rag;
pub mod structured;
pub mod vector_rag;
pub mod vision;

use std::error::Error;
use std::io::{self, BufRead, Write};

use clap::Args;
use console::style;

pub type DemoResult = Result<(), Box<dyn Error>>;

#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Model or deployment to use instead of the demo's default
    #[arg(long, short)]
    pub model: Option<String>,
}

impl ModelArgs {
    pub fn model_or(&self, default: &str) -> String {
        self.model.clone().unwrap_or_else(|| default.to_string())
    }
}

/// Demo title, underlined to its width
pub fn banner(title: &str, underline: char) {
    println!("{}", style(title).bold());
    println!("{}", rule(underline, title.chars().count()));
}

pub fn rule(c: char, width: usize) -> String {
    std::iter::repeat(c).take(width).collect()
}

/// Prompt on stdout and read one line. `None` at end of input.
pub fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

pub fn print_chunk(text: &str) {
    print!("{}", text);
    let _ = io::stdout().flush();
}

pub fn missing_github_token() {
    println!(
        "{}",
        style("Error: GITHUB_TOKEN not found. Please set it as an environment variable or user secret.").red()
    );
    println!("  export GITHUB_TOKEN='your_token_here'");
    println!("  OR");
    println!("  genai secrets set GITHUB_TOKEN 'your_token_here'");
}

/// `optional` lists the extra keys the demo reads, with their defaults
pub fn missing_azure_config(optional: &[(&str, &str)]) {
    println!("❌ Missing Azure OpenAI configuration");
    println!("Please set the following user secrets (or environment variables):");
    println!("  genai secrets set AZURE_OPENAI_ENDPOINT 'https://your-resource.openai.azure.com/'");
    println!("  genai secrets set AZURE_OPENAI_APIKEY 'your-api-key'");
    for (key, default) in optional {
        println!("  genai secrets set {} '{}' (optional)", key, default);
    }
}

pub fn github_hint() {
    println!("Make sure your GITHUB_TOKEN is valid and has access to GitHub Models.");
}

pub fn error_line(e: &dyn std::fmt::Display) {
    println!("{} {}", style("❌ Error:").red(), e);
}

/// Review lines shared by the completion demos
pub const REVIEWS: [&str; 4] = [
    "I bought this product and it's amazing. I love it!",
    "This product is terrible. I hate it.",
    "I'm not sure about this product. It's okay.",
    "I found this product based on the other reviews. It worked for a bit, and then it didn't.",
];
