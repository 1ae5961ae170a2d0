//! Personality-conditioned filter rules.
//!
//! The rule set is an ordered list of typed records, loaded at process start
//! and never mutated. Evaluation is a single pass with early return, in the
//! fixed trait order H, E, X, A, C, O encoded by the table's construction.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::models::analysis::Classification;
use crate::models::profile::{HexacoTrait, TraitLevel, TraitScores};
use crate::models::settings::FilterStrength;

/// Which classification axis a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAxis {
    Content,
    Expression,
    Style,
}

impl RuleAxis {
    pub fn category_of(self, analysis: &Classification) -> &str {
        match self {
            RuleAxis::Content => &analysis.content_category,
            RuleAxis::Expression => &analysis.expression_category,
            RuleAxis::Style => &analysis.style_stance_category,
        }
    }
}

/// One rule: for users whose `dimension` reads `level`, hide posts whose
/// `axis` category appears in the set for the active filter strength.
#[derive(Debug, Clone)]
pub struct FilterRule {
    pub dimension: HexacoTrait,
    pub level: TraitLevel,
    pub axis: RuleAxis,
    pub weak: Vec<String>,
    pub standard: Vec<String>,
    pub strong: Vec<String>,
}

impl FilterRule {
    /// Categories hidden by this rule at `strength`. May be empty.
    pub fn categories_at(&self, strength: FilterStrength) -> &[String] {
        match strength {
            FilterStrength::Weak => &self.weak,
            FilterStrength::Standard => &self.standard,
            FilterStrength::Strong => &self.strong,
        }
    }

    fn applies_to(&self, scores: &TraitScores) -> bool {
        scores.level(self.dimension) == self.level
    }
}

/// The ordered rule table.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<FilterRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<FilterRule>) -> Self {
        RuleTable { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// First category hidden for this profile, strength and classification,
    /// scanning rules in table order. `None` means no personality rule fires.
    pub fn first_match<'a>(
        &self,
        scores: &TraitScores,
        strength: FilterStrength,
        analysis: &'a Classification,
    ) -> Option<&'a str> {
        for rule in &self.rules {
            if !rule.applies_to(scores) {
                continue;
            }
            let category = rule.axis.category_of(analysis);
            if rule.categories_at(strength).iter().any(|c| c == category) {
                return Some(category);
            }
        }
        None
    }

    /// Union of hidden categories per axis for this profile at `strength`.
    ///
    /// Pure function of its inputs; safe to call concurrently and to memoize
    /// per (profile, strength) since the table never changes in-process.
    pub fn active_categories(
        &self,
        scores: &TraitScores,
        strength: FilterStrength,
    ) -> HashMap<RuleAxis, BTreeSet<String>> {
        let mut active: HashMap<RuleAxis, BTreeSet<String>> = HashMap::new();
        for rule in self.rules.iter().filter(|r| r.applies_to(scores)) {
            let categories = rule.categories_at(strength);
            if categories.is_empty() {
                continue;
            }
            active
                .entry(rule.axis)
                .or_default()
                .extend(categories.iter().cloned());
        }
        active
    }

    /// The built-in table. Rules are grouped by trait in H, E, X, A, C, O
    /// order; within a trait, style rules precede expression rules.
    pub fn builtin() -> Self {
        use HexacoTrait::*;
        use RuleAxis::*;
        use TraitLevel::*;

        RuleTable::new(vec![
            // H high: sensitive to insincerity and self-promotion
            rule(
                HonestyHumility,
                High,
                Style,
                &["stealth-marketing"],
                &["stealth-marketing", "clickbait-exaggeration"],
                &["stealth-marketing", "clickbait-exaggeration", "bragging"],
            ),
            // H low: put off by preachy or self-effacing tones
            rule(
                HonestyHumility,
                Low,
                Style,
                &[],
                &["moralizing"],
                &["moralizing", "excessive-self-deprecation"],
            ),
            // E high: shocking material lands hard
            rule(
                Emotionality,
                High,
                Expression,
                &["shocking"],
                &["shocking"],
                &["shocking", "negative-or-critical"],
            ),
            rule(
                Emotionality,
                High,
                Style,
                &[],
                &["conflict-baiting"],
                &["conflict-baiting", "combative-criticism"],
            ),
            // E low: unmoved by appeals to sentiment
            rule(
                Emotionality,
                Low,
                Style,
                &[],
                &["emotional-appeal"],
                &["emotional-appeal", "sentimental-poetry"],
            ),
            // X high: drained by quiet, inward-looking posts
            rule(
                Extraversion,
                High,
                Style,
                &[],
                &["quiet-introspection"],
                &["quiet-introspection", "long-form-technical"],
            ),
            // X low: drained by loud, crowd-oriented posts
            rule(
                Extraversion,
                Low,
                Style,
                &["attention-seeking"],
                &["attention-seeking", "group-socializing"],
                &["attention-seeking", "group-socializing"],
            ),
            // A high: averse to conflict
            rule(
                Agreeableness,
                High,
                Style,
                &["conflict-baiting"],
                &["conflict-baiting", "combative-criticism"],
                &["conflict-baiting", "combative-criticism"],
            ),
            rule(
                Agreeableness,
                High,
                Expression,
                &[],
                &[],
                &["negative-or-critical"],
            ),
            // A low: impatient with bland or evasive posts
            rule(
                Agreeableness,
                Low,
                Style,
                &[],
                &["bland-inoffensive"],
                &["bland-inoffensive", "evasive-insincere"],
            ),
            // C high: irritated by sloppiness
            rule(
                Conscientiousness,
                High,
                Style,
                &["inaccurate-or-illogical"],
                &["inaccurate-or-illogical", "sloppy-writing"],
                &["inaccurate-or-illogical", "sloppy-writing"],
            ),
            // C low: bored by minutiae
            rule(
                Conscientiousness,
                Low,
                Style,
                &[],
                &["procedural-minutiae"],
                &["procedural-minutiae", "dense-data-analysis"],
            ),
            // O high: bored by the mundane
            rule(
                Openness,
                High,
                Style,
                &[],
                &["mundane-life-update"],
                &["mundane-life-update", "unoriginal-content"],
            ),
            // O low: puzzled by the abstract
            rule(
                Openness,
                Low,
                Style,
                &[],
                &["abstract-artistic"],
                &["abstract-artistic", "eccentric-ideas"],
            ),
        ])
    }
}

fn rule(
    dimension: HexacoTrait,
    level: TraitLevel,
    axis: RuleAxis,
    weak: &[&str],
    standard: &[&str],
    strong: &[&str],
) -> FilterRule {
    let owned = |values: &[&str]| values.iter().map(|v| v.to_string()).collect();
    FilterRule {
        dimension,
        level,
        axis,
        weak: owned(weak),
        standard: owned(standard),
        strong: owned(strong),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_scores(h: f64, e: f64, x: f64, a: f64, c: f64, o: f64) -> TraitScores {
        TraitScores { h, e, x, a, c, o }
    }

    fn make_classification(content: &str, expression: &str, style: &str) -> Classification {
        Classification {
            content_category: content.to_string(),
            expression_category: expression.to_string(),
            style_stance_category: style.to_string(),
            embedding: None,
        }
    }

    #[test]
    fn test_active_categories_is_pure() {
        let table = RuleTable::builtin();
        let scores = make_scores(4.0, 2.0, 3.5, 1.5, 4.5, 2.5);
        let first = table.active_categories(&scores, FilterStrength::Standard);
        let second = table.active_categories(&scores, FilterStrength::Standard);
        assert_eq!(first, second);
    }

    #[test]
    fn test_active_categories_grow_with_strength() {
        let table = RuleTable::builtin();
        let scores = make_scores(4.0, 4.0, 4.0, 4.0, 4.0, 4.0);
        let weak = table.active_categories(&scores, FilterStrength::Weak);
        let strong = table.active_categories(&scores, FilterStrength::Strong);
        let count = |m: &HashMap<RuleAxis, BTreeSet<String>>| {
            m.values().map(BTreeSet::len).sum::<usize>()
        };
        assert!(count(&weak) < count(&strong));
    }

    #[test]
    fn test_active_categories_omit_empty_axes() {
        let table = RuleTable::new(vec![rule(
            HexacoTrait::Openness,
            TraitLevel::High,
            RuleAxis::Content,
            &[],
            &["politics"],
            &["politics"],
        )]);
        let scores = make_scores(2.0, 2.0, 2.0, 2.0, 2.0, 4.0);
        let weak = table.active_categories(&scores, FilterStrength::Weak);
        assert!(weak.is_empty());
    }

    #[test]
    fn test_first_match_respects_trait_level() {
        let table = RuleTable::builtin();
        // Low emotionality: the shocking-expression rule (E high) must not fire.
        let scores = make_scores(2.0, 2.0, 2.0, 2.0, 2.0, 2.0);
        let analysis = make_classification("cooking", "shocking", "other");
        assert_eq!(
            table.first_match(&scores, FilterStrength::Standard, &analysis),
            None
        );
    }

    #[test]
    fn test_first_match_scans_in_table_order() {
        let table = RuleTable::new(vec![
            rule(
                HexacoTrait::HonestyHumility,
                TraitLevel::High,
                RuleAxis::Style,
                &["bragging"],
                &["bragging"],
                &["bragging"],
            ),
            rule(
                HexacoTrait::Openness,
                TraitLevel::High,
                RuleAxis::Content,
                &["cooking"],
                &["cooking"],
                &["cooking"],
            ),
        ]);
        let scores = make_scores(4.0, 2.0, 2.0, 2.0, 2.0, 4.0);
        // Both rules would fire; the H rule comes first in the table.
        let analysis = make_classification("cooking", "positive-or-neutral", "bragging");
        assert_eq!(
            table.first_match(&scores, FilterStrength::Weak, &analysis),
            Some("bragging")
        );
    }

    #[test]
    fn test_unrecognized_category_matches_no_rule() {
        let table = RuleTable::builtin();
        let scores = make_scores(4.0, 4.0, 4.0, 4.0, 4.0, 4.0);
        let analysis = make_classification("not-a-category", "not-a-category", "not-a-category");
        assert_eq!(
            table.first_match(&scores, FilterStrength::Strong, &analysis),
            None
        );
    }
}
