use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::cache;
use crate::errors::AppError;
use crate::filtering::context::UserFilterContext;
use crate::filtering::engine::FilterReason;
use crate::models::analysis::Categories;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PostItem {
    pub uri: String,
    pub text: String,
}

#[derive(Deserialize)]
pub struct AnalyzeBatchRequest {
    pub user_did: String,
    pub items: Vec<PostItem>,
}

#[derive(Serialize)]
pub struct AnalyzedPost {
    pub uri: String,
    pub is_hidden: bool,
    pub reason: Option<FilterReason>,
    /// Absent when classification failed for this post.
    pub categories: Option<Categories>,
}

#[derive(Serialize)]
pub struct AnalyzeBatchResponse {
    pub results: Vec<AnalyzedPost>,
}

/// POST /api/v1/analysis/batch
///
/// Classifies the posts that miss the cache, persists the results
/// (first-writer-wins), then evaluates every submitted post against the
/// caller's filters.
pub async fn handle_analyze_batch(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeBatchRequest>,
) -> Result<Json<AnalyzeBatchResponse>, AppError> {
    let uris: Vec<String> = req.items.iter().map(|item| item.uri.clone()).collect();
    let mut analyses = cache::get_cached(&state.db, &uris).await?;

    // Only cache misses with non-empty text go to the model.
    let missing: Vec<&PostItem> = req
        .items
        .iter()
        .filter(|item| !analyses.contains_key(&item.uri) && !item.text.trim().is_empty())
        .collect();

    if !missing.is_empty() {
        let texts: Vec<String> = missing.iter().map(|item| item.text.clone()).collect();
        info!(
            "Classifying {} of {} submitted posts",
            missing.len(),
            req.items.len()
        );

        let classified = state.classifier.classify(&texts).await;
        for (item, result) in missing.iter().zip(classified) {
            if let Some(analysis) = result {
                cache::save_analysis(&state.db, &item.uri, &analysis).await?;
                analyses.insert(item.uri.clone(), analysis);
            }
        }
    }

    let user = UserFilterContext::load(&state.db, &req.user_did).await?;

    let mut results = Vec::with_capacity(req.items.len());
    for item in &req.items {
        let analysis = analyses.get(&item.uri);
        let verdict = state.engine.evaluate(&item.uri, analysis, &user)?;
        results.push(AnalyzedPost {
            uri: item.uri.clone(),
            is_hidden: verdict.is_hidden,
            reason: verdict.reason,
            categories: analysis.map(Categories::from),
        });
    }

    Ok(Json(AnalyzeBatchResponse { results }))
}
