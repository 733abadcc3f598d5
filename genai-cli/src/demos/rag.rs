use genai_core::chat::is_exit_command;
use genai_core::config::Settings;
use genai_core::rag::{build_context, find_similar_movies, movie_catalog, recommendation_prompt};

use super::{error_line, github_hint, missing_github_token, read_line, rule, DemoResult, ModelArgs};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Matches passed to the model as context
pub const CONTEXT_MOVIES: usize = 3;

pub async fn run(args: ModelArgs) -> DemoResult {
    let settings = Settings::load()?;
    let Ok(llm) = settings.github_client(None) else {
        missing_github_token();
        return Ok(());
    };
    let model = args.model_or(DEFAULT_MODEL);

    println!("🔍 Retrieval-Augmented Generation (RAG) Demo");
    println!("===========================================");
    println!("Setting up movie database with simple similarity search...\n");

    let movies = movie_catalog();
    println!("📚 Movie database loaded:");
    for movie in &movies {
        println!("   ✓ {} ({})", movie.title, movie.year);
    }
    println!("\n🎬 Movie Recommendation System Ready!");
    println!("Ask for movie recommendations and I'll search our database!");
    println!("Type 'quit' to exit.\n");

    loop {
        let query = read_line("👤 What kind of movie are you looking for? ")?.unwrap_or_default();
        if is_exit_command(&query, &["quit"]) {
            println!("👋 Goodbye! Enjoy your movies!");
            break;
        }

        println!("\n🔍 Searching for movies matching: '{}'", query);
        let matches = find_similar_movies(&query, &movies);
        if matches.is_empty() {
            println!("❌ No matching movies found in our database.\n");
            continue;
        }

        let context = build_context(&matches, CONTEXT_MOVIES);
        println!("🤖 AI Recommendation:");
        println!("{}", rule('─', 50));
        match llm.complete(&model, &recommendation_prompt(&query, &context)).await {
            Ok(text) => println!("{}\n", text),
            Err(e) => {
                error_line(&e);
                github_hint();
                break;
            }
        }
    }
    Ok(())
}
