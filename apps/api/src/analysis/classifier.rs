//! Career Classifier — pluggable, trait-based models that turn a skill vector into a
//! probability distribution over career roles.
//!
//! Default: `SoftmaxClassifier` (L2-regularised multinomial logistic regression).
//! Alternative: `SimilarityClassifier` (cosine similarity to each role's reference vector).
//!
//! `ResumeAnalyzer` holds an `Arc<dyn CareerClassifier>`, chosen at startup via config.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::analysis::vectorizer::SkillVector;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("no training samples")]
    EmptyTrainingSet,

    #[error("feature vector has length {found}, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("solver did not converge after {iterations} iterations (gradient norm {gradient_norm:.3e})")]
    NotConverged { iterations: usize, gradient_norm: f64 },

    #[error("classifier produced non-finite values")]
    Degenerate,

    #[error("probabilities sum to {0}, expected 1")]
    Unnormalized(f64),

    #[error("need at least {needed} classes to rank, model has {found}")]
    TooFewClasses { needed: usize, found: usize },
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A fitted, immutable model. Implementations are shared across request handlers,
/// so they must never mutate after construction.
pub trait CareerClassifier: Send + Sync {
    /// Backend name, reported in health output and logs.
    fn backend(&self) -> ClassifierBackend;

    /// Class labels, in the order `predict_proba` reports them.
    fn labels(&self) -> &[String];

    /// Probability of every class for one skill vector. Sums to 1.
    fn predict_proba(&self, vector: &[u8]) -> Result<Vec<f64>, ClassifierError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassifierBackend {
    #[default]
    Softmax,
    Similarity,
}

impl fmt::Display for ClassifierBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Softmax => f.write_str("softmax"),
            Self::Similarity => f.write_str("similarity"),
        }
    }
}

impl FromStr for ClassifierBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "softmax" => Ok(Self::Softmax),
            "similarity" => Ok(Self::Similarity),
            other => Err(format!(
                "unknown classifier backend '{other}' (expected 'softmax' or 'similarity')"
            )),
        }
    }
}

/// One labelled training example.
#[derive(Debug, Clone)]
pub struct TrainingSample {
    pub vector: SkillVector,
    pub label: String,
}

// ────────────────────────────────────────────────────────────────────────────
// SoftmaxClassifier — default backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Inverse regularisation strength.
    pub c: f64,
    pub max_iter: usize,
    /// Stop once the gradient's L2 norm drops below this.
    pub tol: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 2000,
            tol: 1e-6,
        }
    }
}

/// Multinomial logistic regression.
///
/// Minimises `½‖W‖² + C·Σ cross_entropy(softmax(W·x + b), y)`. Only the weights are
/// penalised; the intercepts are free. Solved with accelerated gradient descent (step `1/L`)
/// and gradient-based momentum restart, starting from zero, so the fit is deterministic.
#[derive(Debug, Clone)]
pub struct SoftmaxClassifier {
    labels: Vec<String>,
    n_features: usize,
    /// Row-major, one row of `n_features + 1` per class; the last column is the intercept.
    theta: Vec<f64>,
    iterations: usize,
}

impl SoftmaxClassifier {
    pub fn fit(samples: &[TrainingSample], config: SolverConfig) -> Result<Self, ClassifierError> {
        let first = samples.first().ok_or(ClassifierError::EmptyTrainingSet)?;
        let n_features = first.vector.len();
        for sample in samples {
            check_dimension(n_features, sample.vector.len())?;
        }

        let mut labels: Vec<String> = Vec::new();
        let mut targets = Vec::with_capacity(samples.len());
        for sample in samples {
            let class = match labels.iter().position(|l| *l == sample.label) {
                Some(idx) => idx,
                None => {
                    labels.push(sample.label.clone());
                    labels.len() - 1
                }
            };
            targets.push(class);
        }

        // Sparse view of the design matrix: skill vectors are mostly zeros.
        let rows: Vec<Vec<(usize, f64)>> = samples
            .iter()
            .map(|s| sparse_row(&s.vector))
            .collect();

        let problem = Problem {
            rows: &rows,
            targets: &targets,
            n_classes: labels.len(),
            stride: n_features + 1,
            c: config.c,
        };

        // Smoothness bound: the softmax Hessian block has norm ≤ ½ and ‖X‖₂² ≤ ‖X‖_F².
        let frobenius: f64 = rows
            .iter()
            .map(|r| r.iter().map(|(_, x)| x * x).sum::<f64>() + 1.0)
            .sum();
        let lipschitz = 1.0 + 0.5 * config.c * frobenius;
        let step = 1.0 / lipschitz;

        let dim = problem.n_classes * problem.stride;
        let mut x_prev = vec![0.0; dim];
        let mut y = vec![0.0; dim];
        let mut t = 1.0_f64;
        let mut gradient_norm = f64::INFINITY;

        for iteration in 0..config.max_iter {
            let grad = problem.gradient(&y);
            gradient_norm = grad.iter().map(|g| g * g).sum::<f64>().sqrt();
            if !gradient_norm.is_finite() {
                return Err(ClassifierError::Degenerate);
            }
            if gradient_norm < config.tol {
                tracing::debug!(iteration, gradient_norm, "softmax solver converged");
                return Ok(Self {
                    labels,
                    n_features,
                    theta: y,
                    iterations: iteration,
                });
            }

            let x_next: Vec<f64> = y.iter().zip(&grad).map(|(yi, gi)| yi - step * gi).collect();

            // The intercepts are unpenalised, so the objective is only locally strongly
            // convex: drop the momentum whenever it points uphill.
            let uphill: f64 = grad
                .iter()
                .zip(x_next.iter().zip(&x_prev))
                .map(|(g, (xn, xp))| g * (xn - xp))
                .sum();
            if uphill > 0.0 {
                t = 1.0;
            }
            let t_next = (1.0 + (1.0 + 4.0 * t * t).sqrt()) / 2.0;
            let momentum = (t - 1.0) / t_next;
            t = t_next;

            y = x_next
                .iter()
                .zip(&x_prev)
                .map(|(xn, xp)| xn + momentum * (xn - xp))
                .collect();
            x_prev = x_next;
        }

        Err(ClassifierError::NotConverged {
            iterations: config.max_iter,
            gradient_norm,
        })
    }

    /// Solver iterations spent during `fit`.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    fn logits(&self, row: &[(usize, f64)]) -> Vec<f64> {
        class_logits(&self.theta, self.labels.len(), self.n_features + 1, row)
    }
}

impl CareerClassifier for SoftmaxClassifier {
    fn backend(&self) -> ClassifierBackend {
        ClassifierBackend::Softmax
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn predict_proba(&self, vector: &[u8]) -> Result<Vec<f64>, ClassifierError> {
        check_dimension(self.n_features, vector.len())?;
        let probs = softmax(&self.logits(&sparse_row(vector)));
        ensure_finite(probs)
    }
}

/// The training objective, borrowed from the caller's data.
struct Problem<'a> {
    rows: &'a [Vec<(usize, f64)>],
    targets: &'a [usize],
    n_classes: usize,
    stride: usize,
    c: f64,
}

impl Problem<'_> {
    fn gradient(&self, theta: &[f64]) -> Vec<f64> {
        // ∇(½‖W‖²) = W; intercepts carry no penalty
        let mut grad = theta.to_vec();
        let bias_col = self.stride - 1;
        for k in 0..self.n_classes {
            grad[k * self.stride + bias_col] = 0.0;
        }

        for (row, &target) in self.rows.iter().zip(self.targets) {
            let probs = softmax(&class_logits(theta, self.n_classes, self.stride, row));
            for (k, p) in probs.iter().enumerate() {
                let indicator = if k == target { 1.0 } else { 0.0 };
                let residual = self.c * (p - indicator);
                let base = k * self.stride;
                grad[base + bias_col] += residual;
                for &(j, x) in row {
                    grad[base + j] += residual * x;
                }
            }
        }
        grad
    }
}

fn class_logits(theta: &[f64], n_classes: usize, stride: usize, row: &[(usize, f64)]) -> Vec<f64> {
    (0..n_classes)
        .map(|k| {
            let base = k * stride;
            let bias = theta[base + stride - 1];
            row.iter().fold(bias, |acc, &(j, x)| acc + theta[base + j] * x)
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// SimilarityClassifier — nearest-profile backend
// ────────────────────────────────────────────────────────────────────────────

/// Scales cosine similarity before normalisation; higher means a sharper distribution.
pub const SIMILARITY_SHARPNESS: f64 = 10.0;

/// Ranks roles by cosine similarity between the résumé vector and each role's reference
/// vector, then normalises the similarities with a softmax into pseudo-probabilities.
#[derive(Debug, Clone)]
pub struct SimilarityClassifier {
    labels: Vec<String>,
    n_features: usize,
    references: Vec<Vec<(usize, f64)>>,
}

impl SimilarityClassifier {
    pub fn fit(samples: &[TrainingSample]) -> Result<Self, ClassifierError> {
        let first = samples.first().ok_or(ClassifierError::EmptyTrainingSet)?;
        let n_features = first.vector.len();

        let mut labels = Vec::with_capacity(samples.len());
        let mut references = Vec::with_capacity(samples.len());
        for sample in samples {
            check_dimension(n_features, sample.vector.len())?;
            labels.push(sample.label.clone());
            references.push(sparse_row(&sample.vector));
        }

        Ok(Self {
            labels,
            n_features,
            references,
        })
    }
}

impl CareerClassifier for SimilarityClassifier {
    fn backend(&self) -> ClassifierBackend {
        ClassifierBackend::Similarity
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn predict_proba(&self, vector: &[u8]) -> Result<Vec<f64>, ClassifierError> {
        check_dimension(self.n_features, vector.len())?;
        let query = sparse_row(vector);
        let scaled: Vec<f64> = self
            .references
            .iter()
            .map(|r| SIMILARITY_SHARPNESS * cosine(&query, r))
            .collect();
        ensure_finite(softmax(&scaled))
    }
}

/// Cosine similarity of two sorted sparse rows. Zero when either side is empty.
fn cosine(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let norm = |r: &[(usize, f64)]| r.iter().map(|(_, x)| x * x).sum::<f64>().sqrt();
    let (na, nb) = (norm(a), norm(b));
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }

    let (mut i, mut j, mut dot) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot / (na * nb)
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

/// Numerically stable softmax.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|z| (z - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

fn sparse_row(vector: &[u8]) -> Vec<(usize, f64)> {
    vector
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v != 0)
        .map(|(j, &v)| (j, f64::from(v)))
        .collect()
}

fn check_dimension(expected: usize, found: usize) -> Result<(), ClassifierError> {
    if expected != found {
        return Err(ClassifierError::DimensionMismatch { expected, found });
    }
    Ok(())
}

fn ensure_finite(probs: Vec<f64>) -> Result<Vec<f64>, ClassifierError> {
    if probs.iter().all(|p| p.is_finite()) {
        Ok(probs)
    } else {
        Err(ClassifierError::Degenerate)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(vector: &[u8], label: &str) -> TrainingSample {
        TrainingSample {
            vector: vector.to_vec(),
            label: label.to_string(),
        }
    }

    fn toy_samples() -> Vec<TrainingSample> {
        vec![
            sample(&[1, 1, 0, 0, 0], "frontend"),
            sample(&[0, 0, 1, 1, 0], "data"),
            sample(&[0, 0, 0, 1, 1], "ops"),
        ]
    }

    fn argmax(probs: &[f64]) -> usize {
        probs
            .iter()
            .enumerate()
            .fold(0, |best, (i, p)| if *p > probs[best] { i } else { best })
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0, -4.0]);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
    }

    #[test]
    fn test_softmax_handles_large_logits() {
        let probs = softmax(&[1000.0, 1000.0]);
        assert!((probs[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_fit_converges_and_recovers_training_labels() {
        let samples = toy_samples();
        let model = SoftmaxClassifier::fit(&samples, SolverConfig::default()).unwrap();
        assert!(model.iterations() < SolverConfig::default().max_iter);
        assert_eq!(model.labels(), &["frontend", "data", "ops"]);

        for (idx, s) in samples.iter().enumerate() {
            let probs = model.predict_proba(&s.vector).unwrap();
            assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-6);
            assert_eq!(argmax(&probs), idx, "sample {} misclassified", s.label);
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let a = SoftmaxClassifier::fit(&toy_samples(), SolverConfig::default()).unwrap();
        let b = SoftmaxClassifier::fit(&toy_samples(), SolverConfig::default()).unwrap();
        let query = [1, 0, 0, 1, 0];
        assert_eq!(a.predict_proba(&query).unwrap(), b.predict_proba(&query).unwrap());
    }

    #[test]
    fn test_partial_overlap_prefers_closest_role() {
        let model = SoftmaxClassifier::fit(&toy_samples(), SolverConfig::default()).unwrap();
        let probs = model.predict_proba(&[1, 0, 0, 0, 0]).unwrap();
        assert_eq!(argmax(&probs), 0);
    }

    #[test]
    fn test_zero_vector_gives_valid_distribution() {
        let model = SoftmaxClassifier::fit(&toy_samples(), SolverConfig::default()).unwrap();
        let probs = model.predict_proba(&[0, 0, 0, 0, 0]).unwrap();
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-6);
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_fit_rejects_empty_training_set() {
        let err = SoftmaxClassifier::fit(&[], SolverConfig::default()).unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyTrainingSet));
    }

    #[test]
    fn test_fit_rejects_ragged_vectors() {
        let samples = vec![sample(&[1, 0], "a"), sample(&[1, 0, 1], "b")];
        let err = SoftmaxClassifier::fit(&samples, SolverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::DimensionMismatch {
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_predict_rejects_wrong_length() {
        let model = SoftmaxClassifier::fit(&toy_samples(), SolverConfig::default()).unwrap();
        assert!(matches!(
            model.predict_proba(&[1, 0]),
            Err(ClassifierError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_iteration_budget_exhaustion_is_an_error() {
        let config = SolverConfig {
            max_iter: 2,
            ..SolverConfig::default()
        };
        let err = SoftmaxClassifier::fit(&toy_samples(), config).unwrap_err();
        assert!(matches!(err, ClassifierError::NotConverged { iterations: 2, .. }));
    }

    #[test]
    fn test_repeated_labels_share_a_class() {
        let samples = vec![
            sample(&[1, 0, 0], "a"),
            sample(&[1, 1, 0], "a"),
            sample(&[0, 0, 1], "b"),
        ];
        let model = SoftmaxClassifier::fit(&samples, SolverConfig::default()).unwrap();
        assert_eq!(model.labels().len(), 2);
    }

    #[test]
    fn test_similarity_exact_match_ranks_first() {
        let model = SimilarityClassifier::fit(&toy_samples()).unwrap();
        let probs = model.predict_proba(&[0, 0, 0, 1, 1]).unwrap();
        assert_eq!(argmax(&probs), 2);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_zero_vector_is_uniform() {
        let model = SimilarityClassifier::fit(&toy_samples()).unwrap();
        let probs = model.predict_proba(&[0, 0, 0, 0, 0]).unwrap();
        for p in &probs {
            assert!((p - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cosine_of_disjoint_rows_is_zero() {
        assert_eq!(cosine(&[(0, 1.0)], &[(1, 1.0)]), 0.0);
        assert!((cosine(&[(0, 1.0), (1, 1.0)], &[(0, 1.0), (1, 1.0)]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_backend_parses_from_config_strings() {
        assert_eq!("softmax".parse::<ClassifierBackend>().unwrap(), ClassifierBackend::Softmax);
        assert_eq!(
            " Similarity ".parse::<ClassifierBackend>().unwrap(),
            ClassifierBackend::Similarity
        );
        assert!("svm".parse::<ClassifierBackend>().is_err());
        assert_eq!(ClassifierBackend::Similarity.to_string(), "similarity");
    }
}
