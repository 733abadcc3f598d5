use async_trait::async_trait;

use super::*;
use crate::error::DemoError;
use crate::testing::ScriptedProvider;

fn titles(matches: &[MovieMatch<'_>]) -> Vec<String> {
    matches.iter().map(|m| m.movie.title.clone()).collect()
}

#[test]
fn test_keyword_weights() {
    let movies = movie_catalog();
    let matches = find_similar_movies("ogre", &movies);
    assert_eq!(titles(&matches), vec!["Shrek"]);
    // keyword +3, description +2
    assert_eq!(matches[0].score, 5);

    let matches = find_similar_movies("LION", &movies);
    // keyword +3, description +2, title +4
    assert_eq!(matches[0].score, 9);
}

#[test]
fn test_ranking_keeps_catalog_order_on_ties() {
    let movies = movie_catalog();
    let matches = find_similar_movies("family adventure", &movies);
    assert_eq!(titles(&matches), vec!["The Lion King", "Finding Nemo", "Shrek"]);
    assert_eq!(matches.iter().map(|m| m.score).collect::<Vec<_>>(), vec![10, 10, 5]);
}

#[test]
fn test_no_match() {
    let movies = movie_catalog();
    assert!(find_similar_movies("xyzzy", &movies).is_empty());
    assert!(find_similar_movies("   ", &movies).is_empty());
}

#[test]
fn test_context_takes_top_three() {
    let movies = movie_catalog();
    let matches = find_similar_movies("technology family", &movies);
    assert!(matches.len() > 3);

    let context = build_context(&matches, 3);
    assert!(context.starts_with("Based on your request, here are some relevant movies from our database:\n"));
    assert_eq!(context.lines().filter(|l| l.starts_with("- ")).count(), 3);
    assert!(context.contains("- The Lion King (1994): A young lion named Simba"));
    // technology only scores 3, below the three family movies
    assert!(!context.contains("Inception"));
}

#[test]
fn test_recommendation_prompt() {
    let prompt = recommendation_prompt("space", "CONTEXT\n");
    assert!(prompt.starts_with("User Query: space\n\nMovie Database Context:\nCONTEXT\n"));
    assert!(prompt.ends_with("Explain why these movies match what they're looking for."));
}

#[test]
fn test_cosine_similarity() {
    assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    assert!((cosine_similarity(&[1.0, 1.0], &[-1.0, -1.0]) + 1.0).abs() < 1e-6);
    assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
}

fn movie(key: u32, vector: Option<Vec<f32>>) -> MovieVector {
    MovieVector { key, title: format!("movie {}", key), description: String::new(), vector }
}

#[test]
fn test_upsert_replaces_by_key() {
    let mut collection = VectorCollection::new("movies");
    collection.upsert(movie(1, None));
    collection.upsert(movie(2, None));
    collection.upsert(MovieVector { title: "replaced".to_string(), ..movie(1, Some(vec![1.0])) });

    assert_eq!(collection.name(), "movies");
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.get(&1).map(|m| m.title.as_str()), Some("replaced"));
}

#[test]
fn test_search_ranks_and_truncates() {
    let mut collection = VectorCollection::new("movies");
    collection.upsert(movie(1, Some(vec![1.0, 0.0])));
    collection.upsert(movie(2, Some(vec![0.0, 1.0])));
    collection.upsert(movie(3, Some(vec![0.7, 0.7])));
    collection.upsert(movie(4, None));

    let results = collection.search(&[1.0, 0.1], 2);
    let keys: Vec<u32> = results.iter().map(|r| r.record.key).collect();
    assert_eq!(keys, vec![1, 3]);
    assert!(results[0].score > results[1].score);

    assert_eq!(collection.search(&[1.0, 0.0], 10).len(), 3);
}

#[test]
fn test_movie_vector_catalog() {
    let movies = movie_vectors();
    assert_eq!(movies.len(), 10);
    assert_eq!(movies[0].key, 1);
    assert_eq!(movies[0].title, "Shrek");
    assert_eq!(movies[9].key, 10);
    assert_eq!(movies[9].title, "Back to the Future");
    assert!(movies.iter().all(|m| m.vector.is_none()));
    assert_eq!(SEARCH_QUERIES.len(), 5);
}

#[tokio::test]
async fn test_llm_embedding_generator() {
    let provider = ScriptedProvider::default();
    let generator = LlmEmbeddingGenerator::new(provider.client(), "all-minilm");

    let vectors = generator.generate(vec!["banana".to_string(), "kiwi".to_string()]).await.unwrap();
    assert_eq!(vectors, vec![vec![6.0, 3.0, 1.0], vec![4.0, 0.0, 1.0]]);
    assert_eq!(generator.generate_one("aa").await.unwrap(), vec![2.0, 2.0, 1.0]);
}

struct Empty;

#[async_trait]
impl EmbeddingGenerator for Empty {
    async fn generate(&self, _texts: Vec<String>) -> Result<Vec<Vec<f32>>, DemoError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_generate_one_without_result() {
    assert!(matches!(Empty.generate_one("x").await, Err(DemoError::InvalidResponse(_))));
}
