//! The filtering decision engine.
//!
//! Decides per-post visibility from prefetched inputs only: it performs no
//! I/O, no retries and no model calls. Checks run in a fixed priority order
//! and stop at the first match.

use serde::Serialize;

use crate::filtering::context::UserFilterContext;
use crate::filtering::rules::RuleTable;
use crate::filtering::similarity::{is_similar, SimilarityError};
use crate::models::analysis::Classification;

/// Why a verdict came out the way it did. `kind` doubles as the
/// `filter_type` label recorded by the feedback endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterReason {
    #[serde(rename = "type")]
    pub kind: ReasonKind,
    /// The matched category, for the checks that hide by category.
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonKind {
    /// The user explicitly reported this exact post.
    Reported,
    /// Cosine-similar to a post the user reported.
    Similarity,
    /// Content category on the user's manual block-list.
    ManualCategory,
    /// Matched a personality-conditioned rule.
    PersonalityRule,
    /// No cached classification yet; shown pending analysis.
    NotAnalyzed,
}

/// Per-post visibility verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostVerdict {
    pub is_hidden: bool,
    pub reason: Option<FilterReason>,
}

impl PostVerdict {
    fn show() -> Self {
        PostVerdict {
            is_hidden: false,
            reason: None,
        }
    }

    fn show_pending_analysis() -> Self {
        PostVerdict {
            is_hidden: false,
            reason: Some(FilterReason {
                kind: ReasonKind::NotAnalyzed,
                category: None,
            }),
        }
    }

    fn hide(kind: ReasonKind, category: Option<String>) -> Self {
        PostVerdict {
            is_hidden: true,
            reason: Some(FilterReason { kind, category }),
        }
    }

    /// Whether the caller should queue this post for classification.
    pub fn needs_analysis(&self) -> bool {
        matches!(
            self.reason,
            Some(FilterReason {
                kind: ReasonKind::NotAnalyzed,
                ..
            })
        )
    }
}

pub struct FilterEngine {
    rules: RuleTable,
}

impl FilterEngine {
    /// The rule table is fixed for the life of the process; build it once
    /// and hand it over here.
    pub fn new(rules: RuleTable) -> Self {
        FilterEngine { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Decides visibility for one post, in priority order:
    ///
    /// 1. directly reported by this user (wins over everything, even with
    ///    both filter toggles off);
    /// 2. not yet analyzed → shown, deferred to the classification pipeline;
    /// 3. similar to a reported post;
    /// 4. content category on the manual block-list;
    /// 5. personality rules at the configured strength.
    ///
    /// Missing data never errors: no profile skips step 5, no embedding or
    /// no exemplars skip step 3. The only error is a dimension mismatch
    /// between stored embeddings.
    pub fn evaluate(
        &self,
        post_uri: &str,
        analysis: Option<&Classification>,
        user: &UserFilterContext,
    ) -> Result<PostVerdict, SimilarityError> {
        if user.reported_uris.contains(post_uri) {
            return Ok(PostVerdict::hide(ReasonKind::Reported, None));
        }

        let Some(analysis) = analysis else {
            return Ok(PostVerdict::show_pending_analysis());
        };

        if user.settings.similarity_filter_enabled {
            if let Some(embedding) = &analysis.embedding {
                if !user.exemplar_vectors.is_empty()
                    && is_similar(
                        embedding,
                        &user.exemplar_vectors,
                        user.settings.similarity_threshold,
                    )?
                {
                    return Ok(PostVerdict::hide(ReasonKind::Similarity, None));
                }
            }
        }

        if user
            .settings
            .hidden_content_categories
            .contains(&analysis.content_category)
        {
            return Ok(PostVerdict::hide(
                ReasonKind::ManualCategory,
                Some(analysis.content_category.clone()),
            ));
        }

        if user.settings.auto_filter_enabled {
            if let Some(profile) = &user.profile {
                if let Some(category) =
                    self.rules
                        .first_match(profile, user.settings.filter_strength, analysis)
                {
                    return Ok(PostVerdict::hide(
                        ReasonKind::PersonalityRule,
                        Some(category.to_string()),
                    ));
                }
            }
        }

        Ok(PostVerdict::show())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::filtering::rules::{FilterRule, RuleAxis};
    use crate::models::profile::{HexacoTrait, TraitLevel, TraitScores};
    use crate::models::settings::{FilterSettings, FilterStrength};

    const URI: &str = "at://did:plc:someone/app.bsky.feed.post/1";

    fn make_classification(content: &str, expression: &str, style: &str) -> Classification {
        Classification {
            content_category: content.to_string(),
            expression_category: expression.to_string(),
            style_stance_category: style.to_string(),
            embedding: None,
        }
    }

    fn with_embedding(mut analysis: Classification, embedding: Vec<f32>) -> Classification {
        analysis.embedding = Some(embedding);
        analysis
    }

    fn make_context() -> UserFilterContext {
        UserFilterContext {
            settings: FilterSettings::default(),
            profile: None,
            reported_uris: HashSet::new(),
            exemplar_vectors: Vec::new(),
        }
    }

    fn politics_rule() -> FilterRule {
        FilterRule {
            dimension: HexacoTrait::Openness,
            level: TraitLevel::High,
            axis: RuleAxis::Content,
            weak: vec![],
            standard: vec!["politics".to_string()],
            strong: vec!["politics".to_string()],
        }
    }

    fn open_profile() -> TraitScores {
        TraitScores {
            h: 2.0,
            e: 2.0,
            x: 2.0,
            a: 2.0,
            c: 2.0,
            o: 4.0,
        }
    }

    fn engine() -> FilterEngine {
        FilterEngine::new(RuleTable::new(vec![politics_rule()]))
    }

    #[test]
    fn test_unreported_uncached_post_shows_pending_analysis() {
        let verdict = engine().evaluate(URI, None, &make_context()).unwrap();
        assert!(!verdict.is_hidden);
        assert!(verdict.needs_analysis());
        assert_eq!(verdict.reason.unwrap().kind, ReasonKind::NotAnalyzed);
    }

    #[test]
    fn test_reported_post_hidden_even_with_all_filters_off() {
        let mut user = make_context();
        user.settings.auto_filter_enabled = false;
        user.settings.similarity_filter_enabled = false;
        user.reported_uris.insert(URI.to_string());

        let verdict = engine().evaluate(URI, None, &user).unwrap();
        assert!(verdict.is_hidden);
        assert_eq!(verdict.reason.unwrap().kind, ReasonKind::Reported);
    }

    #[test]
    fn test_reported_wins_over_similarity() {
        let mut user = make_context();
        user.reported_uris.insert(URI.to_string());
        user.exemplar_vectors = vec![vec![1.0, 0.0]];
        let analysis = with_embedding(
            make_classification("cooking", "positive-or-neutral", "other"),
            vec![1.0, 0.0],
        );

        let verdict = engine().evaluate(URI, Some(&analysis), &user).unwrap();
        assert_eq!(verdict.reason.unwrap().kind, ReasonKind::Reported);
    }

    #[test]
    fn test_similarity_match_hides() {
        let mut user = make_context();
        user.exemplar_vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        // cosine ≈ 0.990 against the first exemplar
        let analysis = with_embedding(
            make_classification("cooking", "positive-or-neutral", "other"),
            vec![0.99, 0.14],
        );

        let verdict = engine().evaluate(URI, Some(&analysis), &user).unwrap();
        assert!(verdict.is_hidden);
        assert_eq!(verdict.reason.unwrap().kind, ReasonKind::Similarity);
    }

    #[test]
    fn test_similarity_exactly_at_threshold_shows() {
        let mut user = make_context();
        user.settings.similarity_threshold = 1.0;
        user.exemplar_vectors = vec![vec![1.0, 0.0]];
        let analysis = with_embedding(
            make_classification("cooking", "positive-or-neutral", "other"),
            vec![1.0, 0.0],
        );

        let verdict = engine().evaluate(URI, Some(&analysis), &user).unwrap();
        assert!(!verdict.is_hidden);
    }

    #[test]
    fn test_similarity_skipped_when_disabled() {
        let mut user = make_context();
        user.settings.similarity_filter_enabled = false;
        user.exemplar_vectors = vec![vec![1.0, 0.0]];
        let analysis = with_embedding(
            make_classification("cooking", "positive-or-neutral", "other"),
            vec![1.0, 0.0],
        );

        let verdict = engine().evaluate(URI, Some(&analysis), &user).unwrap();
        assert!(!verdict.is_hidden);
    }

    #[test]
    fn test_similarity_skipped_without_embedding() {
        let mut user = make_context();
        user.exemplar_vectors = vec![vec![1.0, 0.0]];
        let analysis = make_classification("cooking", "positive-or-neutral", "other");

        let verdict = engine().evaluate(URI, Some(&analysis), &user).unwrap();
        assert!(!verdict.is_hidden);
    }

    #[test]
    fn test_similarity_skipped_without_exemplars() {
        let user = make_context();
        let analysis = with_embedding(
            make_classification("cooking", "positive-or-neutral", "other"),
            vec![1.0, 0.0],
        );

        let verdict = engine().evaluate(URI, Some(&analysis), &user).unwrap();
        assert!(!verdict.is_hidden);
    }

    #[test]
    fn test_manual_category_hides_with_category_in_reason() {
        let mut user = make_context();
        user.settings
            .hidden_content_categories
            .insert("politics".to_string());
        let analysis = make_classification("politics", "positive-or-neutral", "other");

        let verdict = engine().evaluate(URI, Some(&analysis), &user).unwrap();
        assert!(verdict.is_hidden);
        let reason = verdict.reason.unwrap();
        assert_eq!(reason.kind, ReasonKind::ManualCategory);
        assert_eq!(reason.category.as_deref(), Some("politics"));
    }

    #[test]
    fn test_similarity_wins_over_manual_category() {
        let mut user = make_context();
        user.settings
            .hidden_content_categories
            .insert("cooking".to_string());
        user.exemplar_vectors = vec![vec![1.0, 0.0]];
        let analysis = with_embedding(
            make_classification("cooking", "positive-or-neutral", "other"),
            vec![0.99, 0.14],
        );

        let verdict = engine().evaluate(URI, Some(&analysis), &user).unwrap();
        assert_eq!(verdict.reason.unwrap().kind, ReasonKind::Similarity);
    }

    #[test]
    fn test_personality_rule_hides_politics_for_high_openness() {
        let mut user = make_context();
        user.profile = Some(open_profile());
        let analysis = make_classification("politics", "positive-or-neutral", "other");

        let verdict = engine().evaluate(URI, Some(&analysis), &user).unwrap();
        assert!(verdict.is_hidden);
        let reason = verdict.reason.unwrap();
        assert_eq!(reason.kind, ReasonKind::PersonalityRule);
        assert_eq!(reason.category.as_deref(), Some("politics"));
    }

    #[test]
    fn test_personality_rule_passes_unmatched_category() {
        let mut user = make_context();
        user.profile = Some(open_profile());
        let analysis = make_classification("cooking", "positive-or-neutral", "other");

        let verdict = engine().evaluate(URI, Some(&analysis), &user).unwrap();
        assert!(!verdict.is_hidden);
        assert_eq!(verdict.reason, None);
    }

    #[test]
    fn test_personality_skipped_without_profile() {
        // auto filter on, no profile: step 5 is skipped entirely rather than
        // read as "all traits low".
        let user = make_context();
        let analysis = make_classification("politics", "positive-or-neutral", "other");

        let verdict = engine().evaluate(URI, Some(&analysis), &user).unwrap();
        assert!(!verdict.is_hidden);
    }

    #[test]
    fn test_personality_skipped_when_auto_filter_disabled() {
        let mut user = make_context();
        user.settings.auto_filter_enabled = false;
        user.profile = Some(open_profile());
        let analysis = make_classification("politics", "positive-or-neutral", "other");

        let verdict = engine().evaluate(URI, Some(&analysis), &user).unwrap();
        assert!(!verdict.is_hidden);
    }

    #[test]
    fn test_manual_category_wins_over_personality() {
        let mut user = make_context();
        user.profile = Some(open_profile());
        user.settings
            .hidden_content_categories
            .insert("politics".to_string());
        let analysis = make_classification("politics", "positive-or-neutral", "other");

        let verdict = engine().evaluate(URI, Some(&analysis), &user).unwrap();
        assert_eq!(verdict.reason.unwrap().kind, ReasonKind::ManualCategory);
    }

    #[test]
    fn test_dimension_mismatch_propagates() {
        let mut user = make_context();
        user.exemplar_vectors = vec![vec![1.0, 0.0, 0.0]];
        let analysis = with_embedding(
            make_classification("cooking", "positive-or-neutral", "other"),
            vec![1.0, 0.0],
        );

        assert!(engine().evaluate(URI, Some(&analysis), &user).is_err());
    }

    #[test]
    fn test_strength_gates_personality_rules() {
        let mut user = make_context();
        user.profile = Some(open_profile());
        user.settings.filter_strength = FilterStrength::Weak;
        // The politics rule is empty at weak strength.
        let analysis = make_classification("politics", "positive-or-neutral", "other");

        let verdict = engine().evaluate(URI, Some(&analysis), &user).unwrap();
        assert!(!verdict.is_hidden);
    }
}
