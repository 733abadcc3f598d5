use std::cmp::Ordering;

use async_trait::async_trait;
use genai_llm::LlmClient;

use crate::error::DemoError;

/// Cosine of the angle between two vectors, 0 when undefined
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

#[async_trait]
pub trait EmbeddingGenerator: Send + Sync {
    /// One vector per text, in order
    async fn generate(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DemoError>;

    async fn generate_one(&self, text: &str) -> Result<Vec<f32>, DemoError> {
        self.generate(vec![text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DemoError::InvalidResponse("no embedding returned".to_string()))
    }
}

/// Embeddings served by an LLM provider (e.g. Ollama `all-minilm`)
pub struct LlmEmbeddingGenerator {
    llm: LlmClient,
    model: String,
}

impl LlmEmbeddingGenerator {
    pub fn new(llm: LlmClient, model: impl Into<String>) -> Self {
        Self { llm, model: model.into() }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl EmbeddingGenerator for LlmEmbeddingGenerator {
    async fn generate(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DemoError> {
        Ok(self.llm.embed(&self.model, texts).await?)
    }
}

pub trait VectorRecord {
    type Key: PartialEq;

    fn key(&self) -> Self::Key;
    fn vector(&self) -> Option<&[f32]>;
}

#[derive(Debug)]
pub struct SearchResult<'a, R> {
    pub record: &'a R,
    pub score: f32,
}

/// Named in-memory record set searched by cosine similarity
#[derive(Debug, Clone)]
pub struct VectorCollection<R> {
    name: String,
    records: Vec<R>,
}

impl<R: VectorRecord> VectorCollection<R> {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), records: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert, or replace the record with the same key in place
    pub fn upsert(&mut self, record: R) {
        let key = record.key();
        match self.records.iter_mut().find(|r| r.key() == key) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    pub fn get(&self, key: &R::Key) -> Option<&R> {
        self.records.iter().find(|r| r.key() == *key)
    }

    /// `top` best matches, records without a vector are skipped
    pub fn search(&self, query: &[f32], top: usize) -> Vec<SearchResult<'_, R>> {
        let mut results: Vec<SearchResult<'_, R>> = self
            .records
            .iter()
            .filter_map(|record| {
                record.vector().map(|vector| SearchResult { record, score: cosine_similarity(query, vector) })
            })
            .collect();
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(top);

        tracing::debug!(target: "genai::rag", collection = %self.name, results = results.len(), "vector search");
        results
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieVector {
    pub key: u32,
    pub title: String,
    pub description: String,
    pub vector: Option<Vec<f32>>,
}

impl VectorRecord for MovieVector {
    type Key = u32;

    fn key(&self) -> u32 {
        self.key
    }

    fn vector(&self) -> Option<&[f32]> {
        self.vector.as_deref()
    }
}

pub fn movie_vectors() -> Vec<MovieVector> {
    [
        ("Shrek", "An ogre embarks on a quest to rescue a princess from a dragon-guarded tower, discovering friendship and love along the way. Family-friendly animated comedy with fairy tale characters."),
        ("Star Wars", "Epic space opera featuring rebels fighting against an evil galactic empire, with Jedi knights, lightsabers, and the Force. Classic science fiction adventure."),
        ("The Matrix", "A hacker discovers reality is a simulation and joins a rebellion against machines that have enslaved humanity. Cyberpunk action with philosophical themes."),
        ("Toy Story", "Animated tale of toys that come to life when humans aren't around, focusing on friendship and loyalty. Pixar's groundbreaking computer-animated family film."),
        ("Groundhog Day", "A weatherman gets trapped in a time loop, reliving the same day repeatedly until he learns to become a better person. Romantic comedy with fantasy elements."),
        ("The Avengers", "Superheroes team up to save Earth from an alien invasion, featuring Iron Man, Captain America, Thor, and Hulk. Action-packed Marvel superhero ensemble."),
        ("Finding Nemo", "A clownfish searches the ocean for his lost son with the help of a forgetful blue tang fish. Heartwarming Pixar animated adventure about family."),
        ("Inception", "A thief who steals secrets from dreams is tasked with planting an idea instead. Mind-bending science fiction thriller about reality and dreams."),
        ("The Lion King", "A young lion prince flees his kingdom after his father's death, later returning to reclaim his throne. Disney animated musical about courage and responsibility."),
        ("Back to the Future", "A teenager accidentally travels back in time and must ensure his parents fall in love to secure his existence. Science fiction comedy about time travel."),
    ]
    .iter()
    .zip(1u32..)
    .map(|((title, description), key)| MovieVector {
        key,
        title: title.to_string(),
        description: description.to_string(),
        vector: None,
    })
    .collect()
}

pub const SEARCH_QUERIES: [&str; 5] = [
    "A family friendly movie that includes ogres and dragons",
    "Science fiction with space battles and robots",
    "A romantic comedy with time travel",
    "Action movie with superheroes saving the world",
    "Animated movie about talking toys",
];
