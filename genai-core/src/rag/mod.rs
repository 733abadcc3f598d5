pub mod keyword;
pub mod vector;

#[cfg(test)]
mod tests;

pub use keyword::{build_context, find_similar_movies, movie_catalog, recommendation_prompt, Movie, MovieMatch};
pub use vector::{
    cosine_similarity, movie_vectors, EmbeddingGenerator, LlmEmbeddingGenerator, MovieVector, SearchResult,
    VectorCollection, VectorRecord, SEARCH_QUERIES,
};
