use crate::analysis::features::ResumeFeatures;

pub const MAX_SCORE: u32 = 100;
pub const SKILL_POINTS: u32 = 5;
pub const SKILL_CAP: u32 = 40;
pub const SECTION_POINTS: u32 = 7;

/// Word-count tiers as (minimum words, points), highest first. Below every tier: 10.
const WORD_TIERS: &[(usize, u32)] = &[(400, 30), (250, 20)];
const WORD_TIER_FLOOR: u32 = 10;

/// Heuristic résumé quality score in 0–100:
/// word tier + min(5 × skills, 40) + 7 × sections, clamped to 100.
pub fn calculate_score(features: &ResumeFeatures) -> u32 {
    let tier = WORD_TIERS
        .iter()
        .find(|(min_words, _)| features.word_count >= *min_words)
        .map(|(_, points)| *points)
        .unwrap_or(WORD_TIER_FLOOR);

    let skill_bonus = saturating_u32(features.skill_count)
        .saturating_mul(SKILL_POINTS)
        .min(SKILL_CAP);
    let section_bonus = saturating_u32(features.section_score).saturating_mul(SECTION_POINTS);

    tier.saturating_add(skill_bonus)
        .saturating_add(section_bonus)
        .min(MAX_SCORE)
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(word_count: usize, skill_count: usize, section_score: usize) -> ResumeFeatures {
        ResumeFeatures {
            word_count,
            skill_count,
            section_score,
        }
    }

    #[test]
    fn test_empty_resume_scores_floor_tier() {
        assert_eq!(calculate_score(&features(0, 0, 0)), 10);
    }

    #[test]
    fn test_word_tier_boundaries_are_exact() {
        assert_eq!(calculate_score(&features(249, 0, 0)), 10);
        assert_eq!(calculate_score(&features(250, 0, 0)), 20);
        assert_eq!(calculate_score(&features(399, 0, 0)), 20);
        assert_eq!(calculate_score(&features(400, 0, 0)), 30);
    }

    #[test]
    fn test_skill_bonus_caps_at_40() {
        assert_eq!(calculate_score(&features(0, 8, 0)), 10 + 40);
        assert_eq!(calculate_score(&features(0, 11, 0)), 10 + 40);
    }

    #[test]
    fn test_score_monotonic_in_skill_count() {
        let mut previous = 0;
        for skills in 0..=20 {
            let score = calculate_score(&features(300, skills, 2));
            assert!(score >= previous, "score dropped at {skills} skills");
            previous = score;
        }
    }

    #[test]
    fn test_three_skills_two_sections_300_words() {
        // 20 + 15 + 14
        assert_eq!(calculate_score(&features(300, 3, 2)), 49);
    }

    #[test]
    fn test_total_clamped_to_100() {
        // 30 + 40 + 35 = 105
        assert_eq!(calculate_score(&features(1000, 11, 5)), 100);
    }

    #[test]
    fn test_score_always_in_range() {
        for words in [0, 100, 250, 399, 400, 5000] {
            for skills in [0, 1, 7, 8, 50] {
                for sections in 0..=5 {
                    let score = calculate_score(&features(words, skills, sections));
                    assert!((10..=100).contains(&score), "out of range: {score}");
                }
            }
        }
    }

    #[test]
    fn test_huge_counts_do_not_overflow() {
        assert_eq!(calculate_score(&features(usize::MAX, usize::MAX, usize::MAX)), 100);
    }
}
