//! Closed category taxonomies for the three classification axes.
//!
//! Built once at startup and shared immutably; the classifier prompt and the
//! settings UI both read from the same lists so the model can only answer
//! with categories the filter understands.

use serde::Serialize;

/// A display grouping of content categories (settings page sections).
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    pub name: String,
    pub categories: Vec<String>,
}

/// The three closed category axes.
#[derive(Debug, Clone, Serialize)]
pub struct Taxonomy {
    pub content_groups: Vec<CategoryGroup>,
    pub expression: Vec<String>,
    pub style_stance: Vec<String>,
}

impl Taxonomy {
    pub fn builtin() -> Self {
        Taxonomy {
            content_groups: vec![
                group(
                    "Life & Living",
                    &[
                        "cooking",
                        "home-and-living",
                        "travel",
                        "health-and-wellness",
                        "beauty-and-fashion",
                        "shopping",
                        "family-and-parenting",
                        "pets",
                    ],
                ),
                group(
                    "Hobbies & Interests",
                    &[
                        "arts-and-culture",
                        "gaming",
                        "sports",
                        "creative-work",
                        "outdoors",
                        "learning",
                    ],
                ),
                group(
                    "Work & Society",
                    &[
                        "work-and-career",
                        "study-and-skills",
                        "technology",
                        "economy-and-finance",
                        "politics",
                        "relationships",
                    ],
                ),
            ],
            expression: owned(&["positive-or-neutral", "negative-or-critical", "shocking"]),
            style_stance: owned(&[
                // Honesty-Humility
                "clickbait-exaggeration",
                "bragging",
                "stealth-marketing",
                "moralizing",
                "excessive-self-deprecation",
                // Emotionality
                "sentimental-poetry",
                "emotional-appeal",
                // eXtraversion
                "long-form-technical",
                "quiet-introspection",
                "attention-seeking",
                "group-socializing",
                // Agreeableness
                "combative-criticism",
                "conflict-baiting",
                "evasive-insincere",
                "bland-inoffensive",
                // Conscientiousness
                "inaccurate-or-illogical",
                "sloppy-writing",
                "procedural-minutiae",
                "dense-data-analysis",
                // Openness
                "mundane-life-update",
                "unoriginal-content",
                "abstract-artistic",
                "eccentric-ideas",
                // General
                "other",
            ]),
        }
    }

    /// All content categories, flattened across display groups.
    pub fn content_categories(&self) -> impl Iterator<Item = &str> {
        self.content_groups
            .iter()
            .flat_map(|g| g.categories.iter().map(String::as_str))
    }
}

fn group(name: &str, categories: &[&str]) -> CategoryGroup {
    CategoryGroup {
        name: name.to_string(),
        categories: owned(categories),
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_content_categories_are_unique() {
        let taxonomy = Taxonomy::builtin();
        let all: Vec<&str> = taxonomy.content_categories().collect();
        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
        assert_eq!(all.len(), 20);
    }

    #[test]
    fn test_expression_axis_has_three_values() {
        assert_eq!(Taxonomy::builtin().expression.len(), 3);
    }

    #[test]
    fn test_style_axis_includes_fallback() {
        let taxonomy = Taxonomy::builtin();
        assert!(taxonomy.style_stance.iter().any(|c| c == "other"));
    }
}
