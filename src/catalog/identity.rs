use crate::ranking::SEPARATOR;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name a repository was registered under (e.g., `stable`).
///
/// The name prefixes every qualified key built from the repository's entries,
/// which is what keeps keys unique when several repositories ship the same
/// chart.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoName(pub String);

/// Catalog key of one chart version: `<repo>/<chart>-<version>`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifiedKey(pub String);

impl RepoName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reject names that would make qualified keys or match lines ambiguous.
    ///
    /// A usable name is non-blank and contains neither `/` nor the match-line
    /// separator.
    pub fn validate(&self) -> Result<()> {
        if self.0.trim().is_empty() {
            bail!("repository name must not be empty");
        }
        if self.0.contains('/') {
            bail!("repository name '{}' must not contain '/'", self.0);
        }
        if self.0.contains(SEPARATOR) {
            bail!(
                "repository name {:?} must not contain the match-line separator",
                self.0
            );
        }
        Ok(())
    }
}

impl QualifiedKey {
    /// Build the key for `chart` at `version` inside `repo`.
    ///
    /// No validation happens here; empty parts yield keys like `repo/-`.
    pub fn new(repo: &RepoName, chart: &str, version: &str) -> Self {
        Self(format!("{}/{}-{}", repo.0, chart, version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for QualifiedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RepoName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
