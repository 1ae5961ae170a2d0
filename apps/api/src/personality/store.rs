//! Persistence for diagnostic results.

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;

use crate::models::profile::{HexacoResultRow, TraitScores};

/// Saves one diagnostic submission. The user row is upserted (handles can
/// change), while results append: history is kept, never overwritten.
pub async fn save_result(
    pool: &PgPool,
    user_did: &str,
    handle: &str,
    scores: &TraitScores,
) -> Result<(), sqlx::Error> {
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO users (user_did, handle, created_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_did) DO UPDATE SET handle = EXCLUDED.handle
        "#,
    )
    .bind(user_did)
    .bind(handle)
    .bind(now)
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO hexaco_results (user_did, h, e, x, a, c, o, diagnosed_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(user_did)
    .bind(scores.h)
    .bind(scores.e)
    .bind(scores.x)
    .bind(scores.a)
    .bind(scores.c)
    .bind(scores.o)
    .bind(now)
    .execute(pool)
    .await?;

    info!("Saved diagnostic result for {user_did}");
    Ok(())
}

/// The user's current profile: the most recent submission, if any.
pub async fn latest_scores(
    pool: &PgPool,
    user_did: &str,
) -> Result<Option<TraitScores>, sqlx::Error> {
    let row: Option<HexacoResultRow> = sqlx::query_as(
        r#"
        SELECT result_id, user_did, h, e, x, a, c, o, diagnosed_at
        FROM hexaco_results
        WHERE user_did = $1
        ORDER BY diagnosed_at DESC
        LIMIT 1
        "#,
    )
    .bind(user_did)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(TraitScores::from))
}
