use std::sync::Arc;

use crate::analysis::catalog::{GlobalVocabulary, RoleCatalog};
use crate::analysis::classifier::{
    CareerClassifier, ClassifierBackend, ClassifierError, SimilarityClassifier, SoftmaxClassifier,
    SolverConfig, TrainingSample,
};
use crate::analysis::vectorizer::vectorize;

/// One sample per role: the role's reference skill vector, labelled with the role name.
pub fn build_training_set(
    catalog: &RoleCatalog,
    vocabulary: &GlobalVocabulary,
) -> Vec<TrainingSample> {
    catalog
        .roles()
        .iter()
        .map(|role| TrainingSample {
            vector: vectorize(&role.skills, vocabulary),
            label: role.name.clone(),
        })
        .collect()
}

/// Fits the selected backend on the catalog. The returned model is frozen.
pub fn train_classifier(
    backend: ClassifierBackend,
    catalog: &RoleCatalog,
    vocabulary: &GlobalVocabulary,
) -> Result<Arc<dyn CareerClassifier>, ClassifierError> {
    let samples = build_training_set(catalog, vocabulary);

    let model: Arc<dyn CareerClassifier> = match backend {
        ClassifierBackend::Softmax => {
            let model = SoftmaxClassifier::fit(&samples, SolverConfig::default())?;
            tracing::info!(
                samples = samples.len(),
                features = vocabulary.len(),
                iterations = model.iterations(),
                "Softmax classifier trained"
            );
            Arc::new(model)
        }
        ClassifierBackend::Similarity => {
            let model = SimilarityClassifier::fit(&samples)?;
            tracing::info!(
                samples = samples.len(),
                features = vocabulary.len(),
                "Similarity classifier prepared"
            );
            Arc::new(model)
        }
    };

    Ok(model)
}
