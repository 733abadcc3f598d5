use genai_core::config::Settings;
use genai_core::rag::{movie_vectors, EmbeddingGenerator, LlmEmbeddingGenerator, MovieVector, VectorCollection, SEARCH_QUERIES};
use genai_core::DemoError;

use super::{error_line, DemoResult, ModelArgs};

pub const DEFAULT_MODEL: &str = "all-minilm";
pub const TOP_MATCHES: usize = 3;

pub async fn run(args: ModelArgs) -> DemoResult {
    println!("🔍 Advanced RAG with Vector Search Demo");
    println!();

    let settings = Settings::load()?;
    let model = args.model_or(DEFAULT_MODEL);
    let generator = LlmEmbeddingGenerator::new(settings.ollama_client(), model.as_str());

    match search_movies(&generator).await {
        Ok(()) => {
            println!("✅ RAG Vector Search demo completed!");
            println!();
            println!("💡 Key concepts demonstrated:");
            println!("  • Vector embeddings for semantic search");
            println!("  • In-memory vector storage");
            println!("  • Similarity scoring and ranking");
            println!("  • Knowledge retrieval for AI enhancement");
        }
        Err(e) if e.is_unreachable() => {
            println!("❌ Could not connect to Ollama at {}. Please ensure:", settings.ollama_base_url());
            println!("  1. Ollama is running: ollama serve");
            println!("  2. The embedding model is available: ollama pull {}", model);
        }
        Err(e) => {
            error_line(&e);
            println!();
            println!("🔧 Troubleshooting:");
            println!("• Ensure Ollama is running with the {} model", model);
        }
    }
    Ok(())
}

async fn search_movies(generator: &LlmEmbeddingGenerator) -> Result<(), DemoError> {
    let mut collection: VectorCollection<MovieVector> = VectorCollection::new("movies");
    println!("📚 Setting up knowledge base with movie information...");

    let movies = movie_vectors();
    println!("📽️ Processing {} movies...", movies.len());
    for mut movie in movies {
        println!("  Embedding: {}", movie.title);
        movie.vector = Some(generator.generate_one(&movie.description).await?);
        collection.upsert(movie);
    }
    println!("✅ Embedded with {} via Ollama", generator.model());
    println!();
    println!("🔍 Vector store ready! Let's search for movies...");
    println!();

    for query in SEARCH_QUERIES {
        println!("🔎 Query: \"{}\"", query);
        println!("📊 Top matches:");

        let embedding = generator.generate_one(query).await?;
        for (i, result) in collection.search(&embedding, TOP_MATCHES).iter().enumerate() {
            println!("  {}. {} (Score: {:.3})", i + 1, result.record.title, result.score);
            println!("     {}", result.record.description);
            println!();
        }
        println!("---");
        println!();
    }
    Ok(())
}
