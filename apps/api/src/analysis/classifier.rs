//! Post classification source.
//!
//! Batch-shaped contract: one result per input, in input order. A `None`
//! marks a failed classification; failed items are never persisted, so a
//! transient model error cannot poison the cache.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::analysis::prompts::classification_prompt;
use crate::filtering::taxonomy::Taxonomy;
use crate::llm_client::LlmClient;
use crate::models::analysis::{Classification, EMBEDDING_DIM};

/// The classification source trait. Implement this to swap backends without
/// touching handlers. Carried in `AppState` as `Arc<dyn PostClassifier>`.
#[async_trait]
pub trait PostClassifier: Send + Sync {
    async fn classify(&self, texts: &[String]) -> Vec<Option<Classification>>;
}

/// Category triple as the model returns it.
#[derive(Debug, Deserialize)]
struct RawCategories {
    content_category: String,
    expression_category: String,
    style_stance_category: String,
}

/// Gemini-backed classifier: one generation call for the whole batch, one
/// embedding call for the whole batch.
pub struct GeminiClassifier {
    llm: LlmClient,
    taxonomy: Arc<Taxonomy>,
}

impl GeminiClassifier {
    pub fn new(llm: LlmClient, taxonomy: Arc<Taxonomy>) -> Self {
        GeminiClassifier { llm, taxonomy }
    }
}

#[async_trait]
impl PostClassifier for GeminiClassifier {
    async fn classify(&self, texts: &[String]) -> Vec<Option<Classification>> {
        if texts.is_empty() {
            return Vec::new();
        }

        let prompt = classification_prompt(&self.taxonomy, texts);
        let raw: Vec<RawCategories> = match self.llm.generate_json(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Batch classification failed: {e}");
                return vec![None; texts.len()];
            }
        };

        if raw.len() != texts.len() {
            warn!(
                "Classification count mismatch: sent {}, received {}",
                texts.len(),
                raw.len()
            );
            return vec![None; texts.len()];
        }

        // Embeddings ride along with the categories. If the embedding call
        // fails, the categories still serve this request's filtering but the
        // results cannot be cached.
        let embeddings: Vec<Option<Vec<f32>>> = match self.llm.embed_batch(texts).await {
            Ok(vectors) => vectors.into_iter().map(check_dimension).collect(),
            Err(e) => {
                warn!("Batch embedding failed: {e}; results will not be cached");
                vec![None; texts.len()]
            }
        };

        raw.into_iter()
            .zip(embeddings)
            .map(|(categories, embedding)| {
                Some(Classification {
                    content_category: categories.content_category,
                    expression_category: categories.expression_category,
                    style_stance_category: categories.style_stance_category,
                    embedding,
                })
            })
            .collect()
    }
}

/// Drops vectors of the wrong dimensionality before they can reach the cache.
fn check_dimension(vector: Vec<f32>) -> Option<Vec<f32>> {
    if vector.len() == EMBEDDING_DIM {
        Some(vector)
    } else {
        warn!(
            "Dropping embedding with dimension {} (expected {EMBEDDING_DIM})",
            vector.len()
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dimension_accepts_expected_size() {
        let vector = vec![0.0; EMBEDDING_DIM];
        assert!(check_dimension(vector).is_some());
    }

    #[test]
    fn test_check_dimension_drops_wrong_size() {
        assert!(check_dimension(vec![0.0; 512]).is_none());
    }
}
