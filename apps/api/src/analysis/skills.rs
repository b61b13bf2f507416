use std::collections::BTreeSet;

/// Keywords searched for in résumé text. Deliberately separate from the role vocabulary:
/// e.g. "node" here versus "node.js" in the role table.
pub const SKILL_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "react",
    "node",
    "sql",
    "machine learning",
    "data science",
    "next.js",
    "html",
    "css",
];

/// Returns every keyword that occurs as a substring of the lowercased text.
///
/// No word boundaries are enforced, so "java" is also found inside "javascript".
pub fn extract_skills(text: &str) -> BTreeSet<String> {
    extract_with(text, SKILL_KEYWORDS)
}

pub fn extract_with(text: &str, keywords: &[&str]) -> BTreeSet<String> {
    let text_lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|kw| text_lower.contains(*kw))
        .map(|kw| kw.to_string())
        .collect()
}
