//! Holds one or more repository indexes for lookup by name.
//!
//! The set keeps each repository's parsed index under the name it was
//! registered with and turns the whole collection into a [`ChartIndex`].
//! A repositories file lists `name -> index file` pairs so a caller can load
//! every configured repository in one step.

use crate::catalog::identity::RepoName;
use crate::catalog::index::ChartIndex;
use crate::catalog::model::{ChartEntry, RepoIndex, load_repo_index_from_path};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Default)]
/// In-memory store for repository indexes keyed by `RepoName`.
pub struct RepositorySet {
    repos: BTreeMap<RepoName, RepoIndex>,
}

#[derive(Clone, Debug, Deserialize)]
/// On-disk list of configured repositories.
pub struct RepositoriesFile {
    #[serde(default)]
    pub repositories: Vec<RepositoryRef>,
}

#[derive(Clone, Debug, Deserialize)]
/// One configured repository and the index file that describes it.
pub struct RepositoryRef {
    pub name: RepoName,
    pub index: PathBuf,
}

impl RepositorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an index under `name`, replacing any earlier registration.
    pub fn register(&mut self, name: RepoName, index: RepoIndex) {
        self.repos.insert(name, index);
    }

    /// Load the index file at `path` and register it under `name`.
    pub fn load(&mut self, name: RepoName, path: &Path) -> Result<()> {
        let index = load_repo_index_from_path(path)
            .with_context(|| format!("loading repository '{name}'"))?;
        self.register(name, index);
        Ok(())
    }

    /// Load every repository listed in a repositories file.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let file = RepositoriesFile::load(path)?;
        for repo in file.repositories {
            self.load(repo.name, &repo.index)?;
        }
        Ok(())
    }

    /// Fetch an index by repository name, if present.
    pub fn get(&self, name: &RepoName) -> Option<&RepoIndex> {
        self.repos.get(name)
    }

    /// Iterates repository names in stable order.
    pub fn names(&self) -> impl Iterator<Item = &RepoName> {
        self.repos.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Build a searchable index over every registered repository.
    pub fn build_index(&self, fold_case: bool) -> ChartIndex {
        let mut index = ChartIndex::with_fold_case(fold_case);
        for (name, repo) in &self.repos {
            index.add_repo_index(name, repo);
        }
        index
    }
}

impl RepositoriesFile {
    /// Read a repositories file (YAML or JSON).
    ///
    /// Relative index paths are resolved against the file's directory.
    /// Duplicate or empty repository names are rejected so a typo cannot
    /// silently shadow another repository.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading repositories file {}", path.display()))?;
        let mut file: RepositoriesFile = serde_yaml::from_str(&data)
            .with_context(|| format!("parsing repositories file {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let mut seen = BTreeSet::new();
        for repo in &mut file.repositories {
            repo.name
                .validate()
                .with_context(|| format!("invalid repository in {}", path.display()))?;
            if !seen.insert(repo.name.clone()) {
                bail!(
                    "{} lists repository '{}' more than once",
                    path.display(),
                    repo.name
                );
            }
            if repo.index.is_relative() {
                repo.index = base.join(&repo.index);
            }
        }
        Ok(file)
    }
}
