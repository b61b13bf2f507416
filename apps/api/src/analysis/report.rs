use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::features::ResumeFeatures;
use crate::analysis::predictor::PredictionResult;

/// Label used when the caller has no name for the document.
pub const DEFAULT_FILE_NAME: &str = "Uploaded Resume";

/// Final analysis output, returned verbatim by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub file_name: String,
    pub score: u32,
    pub skills: Vec<String>,
    pub insights: Vec<String>,
    pub career_primary: String,
    pub career_alternatives: Vec<String>,
    pub predictions: Vec<PredictionResult>,
}

pub fn assemble_report(
    file_name: Option<&str>,
    score: u32,
    skills: BTreeSet<String>,
    features: &ResumeFeatures,
    predictions: Vec<PredictionResult>,
) -> AnalysisReport {
    let mut careers = predictions.iter().map(|p| p.career.clone());
    let career_primary = careers.next().unwrap_or_default();
    let career_alternatives = careers.collect();

    AnalysisReport {
        file_name: file_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string(),
        score,
        skills: skills.into_iter().collect(),
        insights: build_insights(features),
        career_primary,
        career_alternatives,
        predictions,
    }
}

fn build_insights(features: &ResumeFeatures) -> Vec<String> {
    vec![
        format!("Word count: {}", features.word_count),
        format!("Number of skills detected: {}", features.skill_count),
        format!("Sections found: {}", features.section_score),
    ]
}
