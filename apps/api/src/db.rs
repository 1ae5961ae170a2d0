use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Idempotent schema bootstrap, run once at startup.
///
/// The embedding column is pgvector's `vector(768)`; a different embedding
/// model means wiping `post_analysis_cache`, not altering the column.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
        .execute(pool)
        .await?;

    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema verified");
    Ok(())
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_did TEXT PRIMARY KEY,
        handle TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS hexaco_results (
        result_id SERIAL PRIMARY KEY,
        user_did TEXT NOT NULL,
        h DOUBLE PRECISION NOT NULL,
        e DOUBLE PRECISION NOT NULL,
        x DOUBLE PRECISION NOT NULL,
        a DOUBLE PRECISION NOT NULL,
        c DOUBLE PRECISION NOT NULL,
        o DOUBLE PRECISION NOT NULL,
        diagnosed_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS filter_settings (
        setting_id SERIAL PRIMARY KEY,
        user_did TEXT NOT NULL UNIQUE,
        hidden_content_categories TEXT[] NOT NULL,
        auto_filter_enabled BOOLEAN NOT NULL DEFAULT TRUE,
        similarity_filter_enabled BOOLEAN NOT NULL DEFAULT TRUE,
        filter_strength INTEGER NOT NULL DEFAULT 2,
        similarity_threshold REAL NOT NULL DEFAULT 0.80,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS post_analysis_cache (
        post_uri TEXT PRIMARY KEY,
        content_category TEXT NOT NULL,
        expression_category TEXT NOT NULL,
        style_stance_category TEXT NOT NULL,
        embedding vector(768),
        analyzed_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS unpleasant_feedback (
        feedback_id SERIAL PRIMARY KEY,
        user_did TEXT NOT NULL,
        post_uri TEXT NOT NULL,
        reported_at TIMESTAMPTZ NOT NULL,
        UNIQUE (user_did, post_uri)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS filter_feedback (
        feedback_id SERIAL PRIMARY KEY,
        user_did TEXT NOT NULL,
        post_uri TEXT NOT NULL,
        filter_type TEXT NOT NULL,
        feedback TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
];
