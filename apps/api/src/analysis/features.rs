use std::collections::BTreeSet;

/// Standard résumé section headers. Each one counts at most once.
pub const SECTION_HEADERS: &[&str] = &["education", "skills", "experience", "projects", "internship"];

/// Coarse structural signals derived from a résumé.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResumeFeatures {
    pub word_count: usize,
    pub skill_count: usize,
    /// Number of `SECTION_HEADERS` present, 0–5.
    pub section_score: usize,
}

pub fn compute_features(text: &str, skills: &BTreeSet<String>) -> ResumeFeatures {
    let text_lower = text.to_lowercase();
    ResumeFeatures {
        word_count: text.split_whitespace().count(),
        skill_count: skills.len(),
        section_score: SECTION_HEADERS
            .iter()
            .filter(|h| text_lower.contains(*h))
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_zero_features() {
        let f = compute_features("", &BTreeSet::new());
        assert_eq!(f, ResumeFeatures::default());
    }

    #[test]
    fn test_word_count_splits_on_any_whitespace() {
        let f = compute_features("one  two\tthree\nfour\r\n five ", &BTreeSet::new());
        assert_eq!(f.word_count, 5);
    }

    #[test]
    fn test_skill_count_is_set_cardinality() {
        let skills: BTreeSet<String> = ["python", "sql"].iter().map(|s| s.to_string()).collect();
        let f = compute_features("whatever", &skills);
        assert_eq!(f.skill_count, 2);
    }

    #[test]
    fn test_section_headers_count_once_each() {
        let text = "EDUCATION ... Education again ... Skills ... skills";
        let f = compute_features(text, &BTreeSet::new());
        assert_eq!(f.section_score, 2);
    }

    #[test]
    fn test_all_sections_detected() {
        let text = "Education Skills Experience Projects Internship";
        let f = compute_features(text, &BTreeSet::new());
        assert_eq!(f.section_score, 5);
    }

    #[test]
    fn test_headers_match_as_substrings() {
        // "internships" contains "internship"
        let f = compute_features("Internships: two summers", &BTreeSet::new());
        assert_eq!(f.section_score, 1);
    }
}
