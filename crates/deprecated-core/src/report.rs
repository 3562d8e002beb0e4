//! Per-document scan results
//!
//! Every detector runs once per document; the cached sets feed both the
//! console report and the removers.

use std::collections::BTreeMap;

use lopdf::Document;
use serde_json::{json, Value};

use crate::detect::{self, FindingSet};
use crate::error::DeprecatedError;
use crate::feature::Feature;
use crate::remove;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    findings: BTreeMap<Feature, FindingSet>,
}

impl ScanReport {
    pub fn scan(doc: &Document) -> Self {
        let findings = Feature::ALL
            .into_iter()
            .filter_map(|feature| detect::detect(doc, feature).map(|set| (feature, set)))
            .collect();
        Self { findings }
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn get(&self, feature: Feature) -> Option<&FindingSet> {
        self.findings.get(&feature)
    }

    /// Populated features in report order
    pub fn findings(&self) -> impl Iterator<Item = (Feature, &FindingSet)> + '_ {
        self.findings.iter().map(|(feature, set)| (*feature, set))
    }

    /// One console line per populated feature
    pub fn lines(&self) -> Vec<String> {
        self.findings()
            .map(|(feature, set)| format!("{} is in these objects: {}", feature, set))
            .collect()
    }

    pub fn to_json(&self, path: &str) -> Value {
        let findings: serde_json::Map<String, Value> = self
            .findings()
            .map(|(feature, set)| (feature.label().to_string(), json!(set)))
            .collect();
        json!({ "path": path, "findings": findings })
    }

    /// Runs the remover of every populated feature, in report order.
    /// Returns the total number of entries removed.
    pub fn apply(&self, doc: &mut Document) -> Result<usize, DeprecatedError> {
        let mut removed = 0;
        for (feature, set) in self.findings() {
            removed += remove::remove(doc, feature, set)?;
        }
        Ok(removed)
    }
}
