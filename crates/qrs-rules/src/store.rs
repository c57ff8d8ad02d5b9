//! The classification rule store.
//!
//! Loaded once per run from a JSON resource and shared by reference; the
//! lookup is keyed on the exact (category1, category2) pair and a miss is
//! not an error, callers fall back to the `Others` label.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::error::{Result, RulesError};

/// One classification rule: (category1, category2) → (coarse, fine).
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct ClassificationEntry {
    #[serde(rename = "药品类别一")]
    pub category1: String,
    #[serde(rename = "药品类别二")]
    pub category2: String,
    #[serde(rename = "类别(粗分)")]
    pub coarse: String,
    #[serde(rename = "详细列（细分）")]
    pub fine: String,
}

#[derive(Debug, serde::Deserialize)]
struct RulesConfig {
    classification_mapping: Vec<ClassificationEntry>,
    disease_area_mapping: serde_json::Map<String, serde_json::Value>,
}

/// Immutable classification and disease-area mappings for one run.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    classification: HashMap<(String, String), (String, String)>,
    disease_areas: Vec<(String, String)>,
}

impl RuleStore {
    /// Load the store from a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RulesError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|source| RulesError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RulesConfig =
            serde_json::from_str(&raw).map_err(|source| RulesError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut disease_areas = Vec::with_capacity(config.disease_area_mapping.len());
        for (english, keyword) in &config.disease_area_mapping {
            let Some(keyword) = keyword.as_str() else {
                return Err(RulesError::Invalid {
                    path: path.to_path_buf(),
                    message: format!("disease_area_mapping['{english}'] is not a string"),
                });
            };
            disease_areas.push((english.clone(), keyword.to_string()));
        }

        let store = Self::from_parts(config.classification_mapping, disease_areas);
        info!(
            path = %path.display(),
            classification_rules = store.classification.len(),
            disease_areas = store.disease_areas.len(),
            "rules configuration loaded"
        );
        Ok(store)
    }

    /// Build a store directly from its parts.
    pub fn from_parts(
        entries: Vec<ClassificationEntry>,
        disease_areas: Vec<(String, String)>,
    ) -> Self {
        let classification = entries
            .into_iter()
            .map(|entry| {
                (
                    (entry.category1, entry.category2),
                    (entry.coarse, entry.fine),
                )
            })
            .collect();
        Self {
            classification,
            disease_areas,
        }
    }

    /// Exact-pair lookup; `None` means no rule (caller applies the fallback).
    pub fn classify(&self, category1: &str, category2: &str) -> Option<(&str, &str)> {
        self.classification
            .get(&(category1.to_string(), category2.to_string()))
            .map(|(coarse, fine)| (coarse.as_str(), fine.as_str()))
    }

    /// Ordered (English label, Chinese keyword) disease-area pairs.
    pub fn disease_areas(&self) -> &[(String, String)] {
        &self.disease_areas
    }
}
