use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::filtering::handlers::UserDidQuery;
use crate::models::profile::{HexacoTrait, TraitLevel, TraitScores};
use crate::personality::{quiz, store};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct QuizSubmission {
    pub user_did: String,
    pub handle: String,
    /// One 1-5 answer per questionnaire item, in item order.
    pub answers: Vec<u8>,
}

#[derive(Serialize)]
pub struct TraitLevelEntry {
    pub letter: char,
    pub level: TraitLevel,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub scores: TraitScores,
    pub levels: Vec<TraitLevelEntry>,
}

impl ProfileResponse {
    fn from_scores(scores: TraitScores) -> Self {
        let levels = HexacoTrait::ORDER
            .into_iter()
            .map(|dimension| TraitLevelEntry {
                letter: dimension.letter(),
                level: scores.level(dimension),
            })
            .collect();
        ProfileResponse { scores, levels }
    }
}

/// POST /api/v1/quiz
pub async fn handle_submit_quiz(
    State(state): State<AppState>,
    Json(req): Json<QuizSubmission>,
) -> Result<Json<ProfileResponse>, AppError> {
    let scores =
        quiz::calculate_scores(&req.answers).map_err(|e| AppError::Validation(e.to_string()))?;

    store::save_result(&state.db, &req.user_did, &req.handle, &scores).await?;
    Ok(Json(ProfileResponse::from_scores(scores)))
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserDidQuery>,
) -> Result<Json<ProfileResponse>, AppError> {
    let scores = store::latest_scores(&state.db, &params.user_did)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No personality profile for {}", params.user_did))
        })?;

    Ok(Json(ProfileResponse::from_scores(scores)))
}
