pub mod inference;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use inference::InferenceClient;

/// Decoding knobs forwarded to the model with every prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    pub max_length: usize,
    pub num_return_sequences: usize,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: usize,
    pub repetition_penalty: f64,
}

/// The fixed parameters used for blog posts.
pub const BLOG_PARAMS: GenerationParams = GenerationParams {
    max_length: 300,
    num_return_sequences: 1,
    temperature: 0.8,
    top_p: 0.9,
    top_k: 50,
    repetition_penalty: 1.8,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSequence {
    pub generated_text: String,
}

impl GeneratedSequence {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            generated_text: text.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Message reported by the model backend itself.
    #[error("{0}")]
    Model(String),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error("model returned no sequences")]
    Empty,
}

/// A text-generation capability: prompt + params in, continuations out.
///
/// Implementations are built once at startup and shared across requests,
/// so `generate` takes `&self` and must be safe to call concurrently.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Vec<GeneratedSequence>, GenerationError>;
}
