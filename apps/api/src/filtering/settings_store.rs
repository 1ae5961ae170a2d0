//! Persistence for per-user filter settings.

use chrono::Utc;
use sqlx::PgPool;

use crate::models::settings::{FilterSettings, FilterSettingsRow};

/// Loads a user's settings, falling back to the documented defaults when no
/// row exists yet. Settings are created lazily on first save, not here.
pub async fn get_filter_settings(
    pool: &PgPool,
    user_did: &str,
) -> Result<FilterSettings, sqlx::Error> {
    let row: Option<FilterSettingsRow> = sqlx::query_as(
        r#"
        SELECT user_did, hidden_content_categories, auto_filter_enabled,
               similarity_filter_enabled, filter_strength, similarity_threshold,
               updated_at
        FROM filter_settings
        WHERE user_did = $1
        "#,
    )
    .bind(user_did)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(FilterSettings::from).unwrap_or_default())
}

/// Saves settings wholesale: every field is replaced on each save, so the
/// row always reflects one coherent submission.
pub async fn save_filter_settings(
    pool: &PgPool,
    user_did: &str,
    settings: &FilterSettings,
) -> Result<(), sqlx::Error> {
    let mut categories: Vec<String> = settings
        .hidden_content_categories
        .iter()
        .cloned()
        .collect();
    categories.sort();

    sqlx::query(
        r#"
        INSERT INTO filter_settings
            (user_did, hidden_content_categories, auto_filter_enabled,
             similarity_filter_enabled, filter_strength, similarity_threshold,
             updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (user_did) DO UPDATE SET
            hidden_content_categories = EXCLUDED.hidden_content_categories,
            auto_filter_enabled = EXCLUDED.auto_filter_enabled,
            similarity_filter_enabled = EXCLUDED.similarity_filter_enabled,
            filter_strength = EXCLUDED.filter_strength,
            similarity_threshold = EXCLUDED.similarity_threshold,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(user_did)
    .bind(&categories)
    .bind(settings.auto_filter_enabled)
    .bind(settings.similarity_filter_enabled)
    .bind(settings.filter_strength.as_i32())
    .bind(settings.similarity_threshold)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}
