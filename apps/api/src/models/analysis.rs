use chrono::{DateTime, Utc};
use pgvector::Vector;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Fixed dimensionality of cached post embeddings. Changing this requires a
/// cache wipe, not a migration.
pub const EMBEDDING_DIM: usize = 768;

/// Cached analysis row, keyed by post URI. At most one row exists per URI.
#[derive(Debug, Clone, FromRow)]
pub struct PostAnalysisRow {
    pub post_uri: String,
    pub content_category: String,
    pub expression_category: String,
    pub style_stance_category: String,
    pub embedding: Option<Vector>,
    pub analyzed_at: DateTime<Utc>,
}

/// Three-axis category assignment plus optional embedding for one post.
///
/// A classification without an embedding is valid for category filtering but
/// cannot participate in similarity matching and is never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub content_category: String,
    pub expression_category: String,
    pub style_stance_category: String,
    pub embedding: Option<Vec<f32>>,
}

impl From<PostAnalysisRow> for Classification {
    fn from(row: PostAnalysisRow) -> Self {
        Classification {
            content_category: row.content_category,
            expression_category: row.expression_category,
            style_stance_category: row.style_stance_category,
            embedding: row.embedding.map(|v| v.to_vec()),
        }
    }
}

/// Category-only view of a classification, for API responses (embeddings
/// stay server-side).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Categories {
    pub content_category: String,
    pub expression_category: String,
    pub style_stance_category: String,
}

impl From<&Classification> for Categories {
    fn from(analysis: &Classification) -> Self {
        Categories {
            content_category: analysis.content_category.clone(),
            expression_category: analysis.expression_category.clone(),
            style_stance_category: analysis.style_stance_category.clone(),
        }
    }
}
