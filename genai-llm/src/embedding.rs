use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingRequest {
    pub model: String,
    pub input: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, input: Vec<String>) -> Self {
        Self {
            model: model.into(),
            input,
            dimensions: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingData {
    #[serde(default)]
    pub index: usize,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingResponse {
    #[serde(default)]
    pub model: String,
    pub data: Vec<EmbeddingData>,
}

impl EmbeddingResponse {
    /// Order vectors by their input index, servers are free to reorder them
    pub fn sorted(mut self) -> Self {
        self.data.sort_by_key(|d| d.index);
        self
    }

    pub fn into_vectors(self) -> Vec<Vec<f32>> {
        self.data.into_iter().map(|d| d.embedding).collect()
    }
}
