//! Expression manifest and the lookup the quick-swap palette draws from.
//!
//! The manifest is static JSON shipped next to the founder images. The overlay
//! controller never loads it; it is handed an [`ExpressionLookup`], so tests
//! and alternate hosts can supply alternatives without any I/O.

#[cfg(test)]
#[path = "manifest_test.rs"]
mod manifest_test;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One expression image for a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub id: String,
    pub label: String,
    /// Path relative to the asset base.
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub portrait: String,
    #[serde(default)]
    pub expressions: Vec<Expression>,
}

/// The `_manifest.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub expression_types: Vec<String>,
}

impl Manifest {
    /// Parse a manifest document.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Json`] when `raw` is not a valid manifest.
    pub fn from_json(raw: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(raw)?)
    }

    #[must_use]
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }
}

/// An alternate image offered for a person, with its full asset path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionAsset {
    pub expression_id: String,
    pub label: String,
    pub image: String,
}

/// Source of alternate expression images, keyed by person id.
///
/// A person with no entry yields an empty list.
pub trait ExpressionLookup {
    fn expressions(&self, person_id: &str) -> Vec<ExpressionAsset>;
}

/// A manifest bound to the directory its file names are relative to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLookup {
    manifest: Manifest,
    asset_base: String,
}

impl ManifestLookup {
    #[must_use]
    pub fn new(manifest: Manifest, asset_base: impl Into<String>) -> Self {
        Self { manifest, asset_base: asset_base.into().trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Full asset path for a manifest-relative file name.
    #[must_use]
    pub fn asset_path(&self, file: &str) -> String {
        format!("{}/{}", self.asset_base, file)
    }
}

impl ExpressionLookup for ManifestLookup {
    fn expressions(&self, person_id: &str) -> Vec<ExpressionAsset> {
        let Some(person) = self.manifest.person(person_id) else {
            warn!(person_id, "no manifest entry for person");
            return Vec::new();
        };
        person
            .expressions
            .iter()
            .map(|e| ExpressionAsset {
                expression_id: e.id.clone(),
                label: e.label.clone(),
                image: self.asset_path(&e.file),
            })
            .collect()
    }
}

/// A lookup with nothing in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExpressions;

impl ExpressionLookup for NoExpressions {
    fn expressions(&self, _person_id: &str) -> Vec<ExpressionAsset> {
        Vec::new()
    }
}

impl<F> ExpressionLookup for F
where
    F: Fn(&str) -> Vec<ExpressionAsset>,
{
    fn expressions(&self, person_id: &str) -> Vec<ExpressionAsset> {
        self(person_id)
    }
}
