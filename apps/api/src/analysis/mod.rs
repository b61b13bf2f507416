// Résumé Analysis Engine
// Implements: role catalog, skill extraction, structural scoring, skill vectorization,
// career classification and report assembly. PDF parsing stays at the edge (pdf_text).

pub mod analyzer;
pub mod catalog;
pub mod classifier;
pub mod features;
pub mod handlers;
pub mod pdf_text;
pub mod predictor;
pub mod report;
pub mod scoring;
pub mod skills;
pub mod trainer;
pub mod vectorizer;
