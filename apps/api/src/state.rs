use std::sync::Arc;

use sqlx::PgPool;

use crate::analysis::classifier::PostClassifier;
use crate::config::Config;
use crate::filtering::engine::FilterEngine;
use crate::filtering::taxonomy::Taxonomy;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable classification source. Default: `GeminiClassifier`.
    pub classifier: Arc<dyn PostClassifier>,
    /// The decision engine, constructed once with the static rule table.
    pub engine: Arc<FilterEngine>,
    /// Closed category lists for the three classification axes.
    pub taxonomy: Arc<Taxonomy>,
    pub config: Config,
}
