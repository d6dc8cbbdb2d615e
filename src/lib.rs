//! Shared library for the chart-search tool.
//!
//! The crate exposes the chart catalog (repository index loading and the
//! searchable `ChartIndex`), result ranking, configuration and rendering.
//! Public functions here form the contract the `chart-search` binary depends
//! on: build an index from repository files, run a query, and order the
//! results deterministically.

use anyhow::{Result, bail};
use std::path::PathBuf;

pub mod catalog;
pub mod config;
pub mod error;
pub mod output;
pub mod ranking;
pub mod schema_loader;

pub use catalog::{
    ChartEntry, ChartIndex, QualifiedKey, RepoIndex, RepoName, RepositoriesFile, RepositoryRef,
    RepositorySet, load_repo_index_from_path,
};
pub use config::SearchConfig;
pub use error::QueryError;
pub use ranking::{
    SEPARATOR, SearchResult, calc_score, compare_results, retain_latest_versions, sort_by_score,
};

/// How a query is run and post-processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Results scoring above this are dropped.
    pub max_score: usize,
    /// Treat the query as a regular expression.
    pub regexp: bool,
    /// Keep every version instead of only the newest per chart.
    pub all_versions: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            max_score: config::DEFAULT_MAX_SCORE,
            regexp: false,
            all_versions: false,
        }
    }
}

/// Run `query` against `index` and return results in presentation order.
///
/// With no query (or a blank one) every chart is listed. Unless
/// `all_versions` is set, only the newest version of each chart per
/// repository survives.
pub fn ranked_search<'a>(
    index: &'a ChartIndex,
    query: Option<&str>,
    options: &QueryOptions,
) -> Result<Vec<SearchResult<'a>>, QueryError> {
    let mut results = match query.filter(|q| !q.trim().is_empty()) {
        Some(q) => index.search(q, options.max_score, options.regexp)?,
        None => index.all(),
    };
    if !options.all_versions {
        results = retain_latest_versions(results);
    }
    sort_by_score(&mut results);
    Ok(results)
}

/// Split a `NAME=INDEX` command-line value into a repository name and path.
pub fn parse_repo_arg(raw: &str) -> Result<(RepoName, PathBuf)> {
    let Some((name, path)) = raw.split_once('=') else {
        bail!("expected NAME=INDEX, got '{raw}'");
    };
    let name = name.trim();
    let path = path.trim();
    if name.is_empty() || path.is_empty() {
        bail!("expected NAME=INDEX, got '{raw}'");
    }
    let name = RepoName::new(name);
    name.validate()?;
    Ok((name, PathBuf::from(path)))
}
