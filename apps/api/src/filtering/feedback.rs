//! Filter feedback recorder and offline accuracy aggregation.
//!
//! Feedback is raw material for precision/recall reporting; the decision
//! engine never reads it back.

use chrono::Utc;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::models::feedback::FeedbackVerdict;

/// Unconditional append. `filter_type` is a free-form label matching one of
/// the engine's reason kinds by convention; it is not validated here.
pub async fn record_filter_feedback(
    pool: &PgPool,
    user_did: &str,
    post_uri: &str,
    filter_type: &str,
    feedback: FeedbackVerdict,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO filter_feedback (user_did, post_uri, filter_type, feedback, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(user_did)
    .bind(post_uri)
    .bind(filter_type)
    .bind(feedback.as_str())
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}

/// Correct/incorrect counts for one filter type.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FilterTypeCounts {
    pub filter_type: String,
    pub correct: i64,
    pub incorrect: i64,
}

/// Aggregate filter accuracy across all users.
///
/// "correct" feedback counts as a true positive (rightly hidden),
/// "incorrect" as a false positive (wrongly hidden), and unpleasant reports
/// as false negatives (unpleasant posts the filters let through).
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackSummary {
    pub true_positives: i64,
    pub false_positives: i64,
    pub false_negatives: i64,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub by_filter_type: Vec<FilterTypeCounts>,
}

impl FeedbackSummary {
    fn compute(
        true_positives: i64,
        false_positives: i64,
        false_negatives: i64,
        by_filter_type: Vec<FilterTypeCounts>,
    ) -> Self {
        FeedbackSummary {
            true_positives,
            false_positives,
            false_negatives,
            precision: ratio(true_positives, true_positives + false_positives),
            recall: ratio(true_positives, true_positives + false_negatives),
            by_filter_type,
        }
    }
}

/// `None` when the denominator is zero (no data rather than 0%).
fn ratio(numerator: i64, denominator: i64) -> Option<f64> {
    if denominator > 0 {
        Some(numerator as f64 / denominator as f64)
    } else {
        None
    }
}

pub async fn feedback_summary(pool: &PgPool) -> Result<FeedbackSummary, sqlx::Error> {
    let true_positives: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM filter_feedback WHERE feedback = 'correct'")
            .fetch_one(pool)
            .await?;

    let false_positives: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM filter_feedback WHERE feedback = 'incorrect'")
            .fetch_one(pool)
            .await?;

    let false_negatives: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM unpleasant_feedback")
        .fetch_one(pool)
        .await?;

    let by_filter_type: Vec<FilterTypeCounts> = sqlx::query_as(
        r#"
        SELECT filter_type,
               COUNT(*) FILTER (WHERE feedback = 'correct') AS correct,
               COUNT(*) FILTER (WHERE feedback = 'incorrect') AS incorrect
        FROM filter_feedback
        GROUP BY filter_type
        ORDER BY filter_type
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(FeedbackSummary::compute(
        true_positives,
        false_positives,
        false_negatives,
        by_filter_type,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_and_recall() {
        let summary = FeedbackSummary::compute(8, 2, 8, vec![]);
        assert_eq!(summary.precision, Some(0.8));
        assert_eq!(summary.recall, Some(0.5));
    }

    #[test]
    fn test_no_hidden_posts_means_no_precision() {
        let summary = FeedbackSummary::compute(0, 0, 5, vec![]);
        assert_eq!(summary.precision, None);
        assert_eq!(summary.recall, Some(0.0));
    }

    #[test]
    fn test_no_unpleasant_posts_means_no_recall() {
        let summary = FeedbackSummary::compute(0, 3, 0, vec![]);
        assert_eq!(summary.precision, Some(0.0));
        assert_eq!(summary.recall, None);
    }
}
