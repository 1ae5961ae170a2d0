use std::collections::{BTreeSet, HashMap};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analysis::cache;
use crate::errors::AppError;
use crate::filtering::context::UserFilterContext;
use crate::filtering::engine::FilterReason;
use crate::filtering::rules::RuleAxis;
use crate::filtering::taxonomy::CategoryGroup;
use crate::filtering::{exemplars, feedback, settings_store};
use crate::models::feedback::FeedbackVerdict;
use crate::models::settings::{FilterSettings, FilterStrength};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserDidQuery {
    pub user_did: String,
}

#[derive(Serialize)]
pub struct SettingsResponse {
    pub settings: FilterSettings,
    /// Every selectable content category, grouped for display.
    pub content_taxonomy: Vec<CategoryGroup>,
    /// Categories the personality rules currently hide for this user, per
    /// axis. Absent until the user has a profile.
    pub active_rules: Option<HashMap<RuleAxis, BTreeSet<String>>>,
}

/// GET /api/v1/settings
pub async fn handle_get_settings(
    State(state): State<AppState>,
    Query(params): Query<UserDidQuery>,
) -> Result<Json<SettingsResponse>, AppError> {
    let settings = settings_store::get_filter_settings(&state.db, &params.user_did).await?;
    let profile = crate::personality::store::latest_scores(&state.db, &params.user_did).await?;

    let active_rules = profile.map(|scores| {
        state
            .engine
            .rules()
            .active_categories(&scores, settings.filter_strength)
    });

    Ok(Json(SettingsResponse {
        settings,
        content_taxonomy: state.taxonomy.content_groups.clone(),
        active_rules,
    }))
}

#[derive(Deserialize)]
pub struct SaveSettingsRequest {
    pub user_did: String,
    pub hidden_content_categories: Vec<String>,
    pub auto_filter_enabled: bool,
    pub similarity_filter_enabled: bool,
    pub filter_strength: i32,
    pub similarity_threshold: f32,
}

/// PUT /api/v1/settings
pub async fn handle_save_settings(
    State(state): State<AppState>,
    Json(req): Json<SaveSettingsRequest>,
) -> Result<Json<FilterSettings>, AppError> {
    let filter_strength = FilterStrength::from_i32(req.filter_strength)
        .ok_or_else(|| AppError::Validation("filter_strength must be 1, 2 or 3".to_string()))?;

    if !(req.similarity_threshold > 0.0 && req.similarity_threshold < 1.0) {
        return Err(AppError::Validation(
            "similarity_threshold must be strictly between 0 and 1".to_string(),
        ));
    }

    let settings = FilterSettings {
        hidden_content_categories: req.hidden_content_categories.into_iter().collect(),
        auto_filter_enabled: req.auto_filter_enabled,
        similarity_filter_enabled: req.similarity_filter_enabled,
        filter_strength,
        similarity_threshold: req.similarity_threshold,
    };

    settings_store::save_filter_settings(&state.db, &req.user_did, &settings).await?;
    Ok(Json(settings))
}

#[derive(Deserialize)]
pub struct EvaluateRequest {
    pub user_did: String,
    pub uris: Vec<String>,
}

#[derive(Serialize)]
pub struct EvaluatedPost {
    pub uri: String,
    pub is_hidden: bool,
    pub reason: Option<FilterReason>,
    /// True when the post has no cached classification yet; the client
    /// should submit it to `/api/v1/analysis/batch`.
    pub needs_analysis: bool,
}

#[derive(Serialize)]
pub struct EvaluateResponse {
    pub results: Vec<EvaluatedPost>,
    pub hidden_count: usize,
    pub total_count: usize,
}

/// POST /api/v1/timeline/evaluate
///
/// Cache-only evaluation: posts without a cached classification come back
/// shown with `needs_analysis`, never blocking on the pipeline.
pub async fn handle_evaluate_timeline(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let user = UserFilterContext::load(&state.db, &req.user_did).await?;
    let analyses = cache::get_cached(&state.db, &req.uris).await?;

    let total_count = req.uris.len();
    let mut results = Vec::with_capacity(total_count);
    let mut hidden_count = 0;

    for uri in req.uris {
        let verdict = state.engine.evaluate(&uri, analyses.get(&uri), &user)?;
        if verdict.is_hidden {
            hidden_count += 1;
        }
        results.push(EvaluatedPost {
            uri,
            is_hidden: verdict.is_hidden,
            needs_analysis: verdict.needs_analysis(),
            reason: verdict.reason,
        });
    }

    Ok(Json(EvaluateResponse {
        results,
        hidden_count,
        total_count,
    }))
}

#[derive(Deserialize)]
pub struct ReportRequest {
    pub user_did: String,
    pub post_uri: String,
}

/// POST /api/v1/reports
pub async fn handle_report_unpleasant(
    State(state): State<AppState>,
    Json(req): Json<ReportRequest>,
) -> Result<StatusCode, AppError> {
    exemplars::report_unpleasant(&state.db, &req.user_did, &req.post_uri).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct FeedbackRequest {
    pub user_did: String,
    pub post_uri: String,
    pub filter_type: String,
    pub feedback: FeedbackVerdict,
}

/// POST /api/v1/feedback
pub async fn handle_record_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Result<StatusCode, AppError> {
    feedback::record_filter_feedback(
        &state.db,
        &req.user_did,
        &req.post_uri,
        &req.filter_type,
        req.feedback,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/feedback/summary
pub async fn handle_feedback_summary(
    State(state): State<AppState>,
) -> Result<Json<feedback::FeedbackSummary>, AppError> {
    Ok(Json(feedback::feedback_summary(&state.db).await?))
}
