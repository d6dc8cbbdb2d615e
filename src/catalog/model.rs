//! Deserializable representation of a repository index file.
//!
//! Index files follow the helm layout: an `entries` map from chart name to
//! the list of published versions. Both YAML (`index.yaml`) and JSON renderings
//! are accepted; every file is validated against the embedded repository index
//! schema before it is turned into typed entries.

use crate::schema_loader::validate_repo_index;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
/// One published chart version as handed to the catalog.
pub struct ChartEntry {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
/// Full repository index as stored on disk.
pub struct RepoIndex {
    #[serde(default, rename = "apiVersion", alias = "api_version")]
    pub api_version: Option<String>,
    #[serde(default)]
    pub generated: Option<String>,
    #[serde(default)]
    pub entries: BTreeMap<String, Vec<ChartEntry>>,
}

impl ChartEntry {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            url: url.into(),
            keywords: Vec::new(),
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

impl RepoIndex {
    /// Iterates every chart version, chart names in sorted order.
    pub fn iter_entries(&self) -> impl Iterator<Item = &ChartEntry> {
        self.entries.values().flatten()
    }

    /// Total number of chart versions across all charts.
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl FromIterator<ChartEntry> for RepoIndex {
    fn from_iter<T: IntoIterator<Item = ChartEntry>>(iter: T) -> Self {
        let mut entries: BTreeMap<String, Vec<ChartEntry>> = BTreeMap::new();
        for entry in iter {
            entries.entry(entry.name.clone()).or_default().push(entry);
        }
        Self {
            api_version: None,
            generated: None,
            entries,
        }
    }
}

/// Read, schema-validate, and parse a repository index file.
///
/// Files ending in `.json` are parsed as JSON; anything else is treated as
/// YAML, which also accepts plain JSON content.
pub fn load_repo_index_from_path(path: &Path) -> Result<RepoIndex> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading index {}", path.display()))?;
    let value = parse_index_value(path, &data)?;
    validate_repo_index(&value, path)?;
    let index: RepoIndex = serde_json::from_value(value)
        .with_context(|| format!("decoding index {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        charts = index.entries.len(),
        versions = index.entry_count(),
        "loaded repository index"
    );
    Ok(index)
}

fn parse_index_value(path: &Path, data: &str) -> Result<Value> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(data).with_context(|| format!("parsing index {}", path.display()))
    } else {
        serde_yaml::from_str(data).with_context(|| format!("parsing index {}", path.display()))
    }
}
