use std::collections::HashSet;

use crate::analysis::catalog::GlobalVocabulary;

/// Binary indicator vector over the global vocabulary.
pub type SkillVector = Vec<u8>;

/// Encodes a skill set against the vocabulary: entry `i` is 1 iff vocabulary skill `i` is
/// present. Training and inference must share the same `GlobalVocabulary`.
pub fn vectorize<S: AsRef<str>>(
    skills: impl IntoIterator<Item = S>,
    vocabulary: &GlobalVocabulary,
) -> SkillVector {
    let present: HashSet<String> = skills
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();
    vocabulary
        .iter()
        .map(|skill| u8::from(present.contains(skill)))
        .collect()
}
