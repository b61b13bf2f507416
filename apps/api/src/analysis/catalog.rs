//! Role Catalog — the static table of career roles and their reference skills.
//!
//! The table is a versioned JSON document. The default table is compiled into the binary;
//! a replacement can be loaded from disk at startup. Either way it is loaded once and never
//! mutated afterwards.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default role table shipped with the service.
const DEFAULT_CATALOG_JSON: &str = include_str!("../../config/career_roles.json");

/// The predictor always reports a primary role plus two alternatives.
pub const MIN_ROLES: usize = 3;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read role catalog '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed role catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("role catalog needs at least 3 roles, found {0}")]
    TooFewRoles(usize),

    #[error("role at position {0} has an empty name")]
    EmptyRoleName(usize),

    #[error("duplicate role name '{0}'")]
    DuplicateRole(String),

    #[error("role '{0}' has no skills")]
    EmptySkills(String),
}

/// A named job category with its ordered reference skill set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerRole {
    pub name: String,
    pub skills: Vec<String>,
}

/// On-disk shape of the catalog document.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    version: String,
    roles: Vec<CareerRole>,
}

/// Validated, immutable role table. Role order is the order of the source document and is
/// used as the tie-breaker when ranking predictions.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    version: String,
    roles: Vec<CareerRole>,
}

impl RoleCatalog {
    /// Loads the compiled-in default table.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_CATALOG_JSON)
    }

    /// Loads a catalog document from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(raw)?;
        Self::new(doc.version, doc.roles)
    }

    /// Validates and normalizes a role table.
    ///
    /// Skills are trimmed and lowercased; repeated skills inside one role keep their first
    /// position only.
    pub fn new(version: impl Into<String>, roles: Vec<CareerRole>) -> Result<Self, CatalogError> {
        if roles.len() < MIN_ROLES {
            return Err(CatalogError::TooFewRoles(roles.len()));
        }

        let mut seen_names = HashSet::new();
        let mut normalized = Vec::with_capacity(roles.len());

        for (idx, role) in roles.into_iter().enumerate() {
            let name = role.name.trim().to_string();
            if name.is_empty() {
                return Err(CatalogError::EmptyRoleName(idx));
            }
            if !seen_names.insert(name.clone()) {
                return Err(CatalogError::DuplicateRole(name));
            }

            let mut seen_skills = HashSet::new();
            let skills: Vec<String> = role
                .skills
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .filter(|s| seen_skills.insert(s.clone()))
                .collect();
            if skills.is_empty() {
                return Err(CatalogError::EmptySkills(name));
            }

            normalized.push(CareerRole { name, skills });
        }

        Ok(Self {
            version: version.into(),
            roles: normalized,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn roles(&self) -> &[CareerRole] {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Derives the global vocabulary: every distinct skill across all roles, sorted.
    pub fn vocabulary(&self) -> GlobalVocabulary {
        let skills: BTreeSet<&str> = self
            .roles
            .iter()
            .flat_map(|r| r.skills.iter().map(String::as_str))
            .collect();
        GlobalVocabulary {
            skills: skills.into_iter().map(String::from).collect(),
        }
    }
}

/// Sorted union of all role skills. Index `i` of every skill vector refers to `skills[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalVocabulary {
    skills: Vec<String>,
}

impl GlobalVocabulary {
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }
}
