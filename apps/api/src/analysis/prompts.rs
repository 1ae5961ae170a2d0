//! Prompt construction for batch post classification.

use crate::filtering::taxonomy::Taxonomy;

/// Builds the batch classification prompt: one numbered block per post, the
/// closed category lists from the taxonomy, and strict JSON-list output
/// instructions (one object per post, in input order).
pub fn classification_prompt(taxonomy: &Taxonomy, texts: &[String]) -> String {
    let content_list = quote_list(taxonomy.content_categories());
    let expression_list = quote_list(taxonomy.expression.iter().map(String::as_str));
    let style_list = quote_list(taxonomy.style_stance.iter().map(String::as_str));

    let mut posts = String::new();
    for (i, text) in texts.iter().enumerate() {
        posts.push_str(&format!("Post {}:\n---\n{}\n---\n", i + 1, text));
    }

    format!(
        r#"Analyze the following list of {count} social media posts. For each post, pick exactly one category per axis:

1. content_category: the post's main topic
2. expression_category: the post's overall emotional tone
3. style_stance_category: the post's most prominent style or stance

Constraints:
- Each category MUST come from the corresponding list:
  - content_category: [{content_list}]
  - expression_category: [{expression_list}]
  - style_stance_category: [{style_list}]
- Respond with a JSON list only, one object per post, in post order.
- Every object must contain exactly the keys "content_category", "expression_category" and "style_stance_category".
- Do not include any explanation or text outside the JSON list.

Posts:
{posts}
Output format (JSON list):
[
  {{
    "content_category": "(content category of post 1)",
    "expression_category": "(expression category of post 1)",
    "style_stance_category": "(style/stance category of post 1)"
  }},
  ...
]"#,
        count = texts.len(),
    )
}

fn quote_list<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_numbers_posts_in_order() {
        let taxonomy = Taxonomy::builtin();
        let texts = vec!["first post".to_string(), "second post".to_string()];
        let prompt = classification_prompt(&taxonomy, &texts);

        let first = prompt.find("Post 1:").unwrap();
        let second = prompt.find("Post 2:").unwrap();
        assert!(first < second);
        assert!(prompt.contains("first post"));
        assert!(prompt.contains("second post"));
    }

    #[test]
    fn test_prompt_includes_all_axes() {
        let taxonomy = Taxonomy::builtin();
        let prompt = classification_prompt(&taxonomy, &["a post".to_string()]);

        assert!(prompt.contains("\"politics\""));
        assert!(prompt.contains("\"shocking\""));
        assert!(prompt.contains("\"clickbait-exaggeration\""));
    }
}
