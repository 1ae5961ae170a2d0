#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A known user, keyed by their decentralized identifier. Upserted whenever
/// a diagnostic result is saved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_did: String,
    pub handle: String,
    pub created_at: DateTime<Utc>,
}
