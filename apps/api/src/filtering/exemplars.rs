//! Unpleasant exemplar store: the posts a user explicitly reported.

use std::collections::HashSet;

use chrono::Utc;
use pgvector::Vector;
use sqlx::PgPool;
use tracing::info;

/// Records an unpleasant report. Duplicate reports for the same
/// (user, post) pair are no-ops. Returns whether a new row was written.
pub async fn report_unpleasant(
    pool: &PgPool,
    user_did: &str,
    post_uri: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO unpleasant_feedback (user_did, post_uri, reported_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_did, post_uri) DO NOTHING
        "#,
    )
    .bind(user_did)
    .bind(post_uri)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let inserted = result.rows_affected() > 0;
    if inserted {
        info!("Recorded unpleasant report for {post_uri} by {user_did}");
    }
    Ok(inserted)
}

/// URIs of every post this user has reported.
pub async fn reported_uris(pool: &PgPool, user_did: &str) -> Result<HashSet<String>, sqlx::Error> {
    let uris: Vec<String> =
        sqlx::query_scalar("SELECT post_uri FROM unpleasant_feedback WHERE user_did = $1")
            .bind(user_did)
            .fetch_all(pool)
            .await?;
    Ok(uris.into_iter().collect())
}

/// Embeddings of this user's reported posts, joined live against the
/// analysis cache. Reports whose post has no cached embedding are silently
/// dropped here; a later backfill makes them available without re-reporting.
pub async fn exemplar_vectors(
    pool: &PgPool,
    user_did: &str,
) -> Result<Vec<Vec<f32>>, sqlx::Error> {
    let vectors: Vec<Vector> = sqlx::query_scalar(
        r#"
        SELECT cache.embedding
        FROM unpleasant_feedback AS feedback
        JOIN post_analysis_cache AS cache ON feedback.post_uri = cache.post_uri
        WHERE feedback.user_did = $1 AND cache.embedding IS NOT NULL
        "#,
    )
    .bind(user_did)
    .fetch_all(pool)
    .await?;

    Ok(vectors.into_iter().map(|v| v.to_vec()).collect())
}
