//! Analysis cache — at-most-once storage of per-post classifications.

use std::collections::HashMap;

use chrono::Utc;
use pgvector::Vector;
use sqlx::PgPool;
use tracing::debug;

use crate::models::analysis::{Classification, PostAnalysisRow};

/// Returns the cached classifications for the given URIs. URIs with no row
/// are simply absent from the map: they need classification, not an error.
pub async fn get_cached(
    pool: &PgPool,
    uris: &[String],
) -> Result<HashMap<String, Classification>, sqlx::Error> {
    if uris.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<PostAnalysisRow> = sqlx::query_as(
        r#"
        SELECT post_uri, content_category, expression_category,
               style_stance_category, embedding, analyzed_at
        FROM post_analysis_cache
        WHERE post_uri = ANY($1)
        "#,
    )
    .bind(uris)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let uri = row.post_uri.clone();
            (uri, Classification::from(row))
        })
        .collect())
}

/// Persists one classification. First writer wins: a second insert for the
/// same URI is a silent no-op, so cached results never change retroactively
/// and concurrent writers need no locking.
///
/// Classifications without an embedding are not persisted at all; a cached
/// row must be able to serve similarity matching later. Returns whether a
/// row was written.
pub async fn save_analysis(
    pool: &PgPool,
    post_uri: &str,
    analysis: &Classification,
) -> Result<bool, sqlx::Error> {
    let Some(embedding) = &analysis.embedding else {
        debug!("Skipping cache write for {post_uri}: no embedding");
        return Ok(false);
    };

    let result = sqlx::query(
        r#"
        INSERT INTO post_analysis_cache
            (post_uri, content_category, expression_category,
             style_stance_category, embedding, analyzed_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (post_uri) DO NOTHING
        "#,
    )
    .bind(post_uri)
    .bind(&analysis.content_category)
    .bind(&analysis.expression_category)
    .bind(&analysis.style_stance_category)
    .bind(Vector::from(embedding.clone()))
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
