//! Résumé Analyzer — the full text → score/skills/careers pipeline.
//!
//! Built once at startup from the role catalog, then shared read-only across requests.

use std::sync::Arc;

use crate::analysis::catalog::{GlobalVocabulary, RoleCatalog};
use crate::analysis::classifier::{CareerClassifier, ClassifierBackend, ClassifierError};
use crate::analysis::features::compute_features;
use crate::analysis::predictor::predict_top_roles;
use crate::analysis::report::{assemble_report, AnalysisReport};
use crate::analysis::scoring::calculate_score;
use crate::analysis::skills::extract_skills;
use crate::analysis::trainer::train_classifier;
use crate::analysis::vectorizer::vectorize;

pub struct ResumeAnalyzer {
    catalog: RoleCatalog,
    vocabulary: GlobalVocabulary,
    classifier: Arc<dyn CareerClassifier>,
}

impl ResumeAnalyzer {
    /// Derives the vocabulary and fits the classifier. Nothing is mutated afterwards.
    pub fn build(catalog: RoleCatalog, backend: ClassifierBackend) -> Result<Self, ClassifierError> {
        let vocabulary = catalog.vocabulary();
        let classifier = train_classifier(backend, &catalog, &vocabulary)?;
        Ok(Self {
            catalog,
            vocabulary,
            classifier,
        })
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    pub fn vocabulary(&self) -> &GlobalVocabulary {
        &self.vocabulary
    }

    pub fn backend(&self) -> ClassifierBackend {
        self.classifier.backend()
    }

    /// Analyzes already-extracted résumé text.
    ///
    /// Empty text is valid input: it lands in the lowest word tier with no skills.
    pub fn analyze(
        &self,
        text: &str,
        file_name: Option<&str>,
    ) -> Result<AnalysisReport, ClassifierError> {
        let skills = extract_skills(text);
        let features = compute_features(text, &skills);
        let score = calculate_score(&features);

        let resume_vector = vectorize(&skills, &self.vocabulary);
        let predictions = predict_top_roles(self.classifier.as_ref(), &resume_vector)?;

        tracing::debug!(
            word_count = features.word_count,
            skill_count = features.skill_count,
            section_score = features.section_score,
            "Resume features computed"
        );

        let report = assemble_report(file_name, score, skills, &features, predictions);
        tracing::info!(
            file_name = %report.file_name,
            score = report.score,
            career = %report.career_primary,
            "Resume analyzed"
        );
        Ok(report)
    }
}
