use serde::{Deserialize, Serialize};

use crate::analysis::classifier::{CareerClassifier, ClassifierError};

/// Roles reported per analysis: one primary plus two alternatives.
pub const TOP_N: usize = 3;

const PROBABILITY_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub career: String,
    /// Probability in [0, 1].
    pub confidence: f64,
}

/// Ranks every role for a résumé vector and keeps the best `TOP_N`.
///
/// Ordering is by descending probability; equal probabilities keep catalog order.
pub fn predict_top_roles(
    classifier: &dyn CareerClassifier,
    vector: &[u8],
) -> Result<Vec<PredictionResult>, ClassifierError> {
    let labels = classifier.labels();
    if labels.len() < TOP_N {
        return Err(ClassifierError::TooFewClasses {
            needed: TOP_N,
            found: labels.len(),
        });
    }

    let probs = classifier.predict_proba(vector)?;
    if probs.len() != labels.len() {
        return Err(ClassifierError::DimensionMismatch {
            expected: labels.len(),
            found: probs.len(),
        });
    }
    let total: f64 = probs.iter().sum();
    if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(ClassifierError::Unnormalized(total));
    }

    let mut ranked: Vec<usize> = (0..probs.len()).collect();
    // sort_by is stable, so ties stay in catalog order
    ranked.sort_by(|&a, &b| probs[b].total_cmp(&probs[a]));

    Ok(ranked
        .into_iter()
        .take(TOP_N)
        .map(|idx| PredictionResult {
            career: labels[idx].clone(),
            confidence: probs[idx].clamp(0.0, 1.0),
        })
        .collect())
}
