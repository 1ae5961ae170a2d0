//! Per-user evaluation inputs, prefetched so engine calls stay pure.

use std::collections::HashSet;

use sqlx::PgPool;

use crate::filtering::{exemplars, settings_store};
use crate::models::profile::TraitScores;
use crate::models::settings::FilterSettings;
use crate::personality;

/// Everything known about one user at evaluation time.
#[derive(Debug, Clone)]
pub struct UserFilterContext {
    pub settings: FilterSettings,
    /// `None` until the user submits the diagnostic questionnaire.
    pub profile: Option<TraitScores>,
    /// Posts this user explicitly reported as unpleasant.
    pub reported_uris: HashSet<String>,
    /// Embeddings of reported posts that have one cached.
    pub exemplar_vectors: Vec<Vec<f32>>,
}

impl UserFilterContext {
    pub async fn load(pool: &PgPool, user_did: &str) -> Result<Self, sqlx::Error> {
        let settings = settings_store::get_filter_settings(pool, user_did).await?;
        let profile = personality::store::latest_scores(pool, user_did).await?;
        let reported_uris = exemplars::reported_uris(pool, user_did).await?;
        let exemplar_vectors = exemplars::exemplar_vectors(pool, user_did).await?;

        Ok(UserFilterContext {
            settings,
            profile,
            reported_uris,
            exemplar_vectors,
        })
    }
}
