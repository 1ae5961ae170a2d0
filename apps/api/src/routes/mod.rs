pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::filtering::handlers as filtering_handlers;
use crate::personality::handlers as personality_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Personality diagnostics
        .route("/api/v1/quiz", post(personality_handlers::handle_submit_quiz))
        .route("/api/v1/profile", get(personality_handlers::handle_get_profile))
        // Filter settings
        .route(
            "/api/v1/settings",
            get(filtering_handlers::handle_get_settings)
                .put(filtering_handlers::handle_save_settings),
        )
        // Timeline evaluation (cache-only) and batch analysis
        .route(
            "/api/v1/timeline/evaluate",
            post(filtering_handlers::handle_evaluate_timeline),
        )
        .route(
            "/api/v1/analysis/batch",
            post(analysis_handlers::handle_analyze_batch),
        )
        // Unpleasant reports and filter feedback
        .route(
            "/api/v1/reports",
            post(filtering_handlers::handle_report_unpleasant),
        )
        .route(
            "/api/v1/feedback",
            post(filtering_handlers::handle_record_feedback),
        )
        .route(
            "/api/v1/feedback/summary",
            get(filtering_handlers::handle_feedback_summary),
        )
        .with_state(state)
}
