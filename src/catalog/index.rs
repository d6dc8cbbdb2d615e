//! Searchable view over every loaded repository.
//!
//! The index copies chart entries in, keyed by `<repo>/<chart>-<version>`,
//! and precomputes one match line per entry. Queries scan those lines and
//! never mutate the index; ordering is left to [`crate::ranking`].

use crate::catalog::{ChartEntry, QualifiedKey, RepoIndex, RepoName};
use crate::error::QueryError;
use crate::ranking::{SEPARATOR, SearchResult, calc_score};
use regex::RegexBuilder;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct IndexedChart {
    repo: RepoName,
    entry: ChartEntry,
    line: String,
}

#[derive(Debug, Default)]
/// Chart versions from all repositories plus their derived match lines.
pub struct ChartIndex {
    charts: BTreeMap<QualifiedKey, IndexedChart>,
    fold_case: bool,
}

impl ChartIndex {
    /// Empty index with case-sensitive matching.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty index that matches without regard to case when `fold_case` is set.
    ///
    /// Match lines and literal queries are lowercased; regular expressions are
    /// compiled case-insensitively.
    pub fn with_fold_case(fold_case: bool) -> Self {
        Self {
            charts: BTreeMap::new(),
            fold_case,
        }
    }

    /// Merge one repository's entries into the index.
    ///
    /// Entries are not validated. A key that already exists is overwritten.
    pub fn add_repo<'e, I>(&mut self, repo: &RepoName, entries: I)
    where
        I: IntoIterator<Item = &'e ChartEntry>,
    {
        let before = self.charts.len();
        let mut added = 0usize;
        for entry in entries {
            let key = QualifiedKey::new(repo, &entry.name, &entry.version);
            let line = self.match_line(&key, entry);
            self.charts.insert(
                key,
                IndexedChart {
                    repo: repo.clone(),
                    entry: entry.clone(),
                    line,
                },
            );
            added += 1;
        }
        tracing::debug!(
            repo = %repo,
            entries = added,
            replaced = before + added - self.charts.len(),
            "indexed repository"
        );
    }

    /// Merge every version listed in a loaded index file.
    pub fn add_repo_index(&mut self, repo: &RepoName, index: &RepoIndex) {
        self.add_repo(repo, index.iter_entries());
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Look up a single chart version by qualified key.
    pub fn get(&self, key: &QualifiedKey) -> Option<&ChartEntry> {
        self.charts.get(key).map(|chart| &chart.entry)
    }

    /// Iterates qualified keys in stable order.
    pub fn keys(&self) -> impl Iterator<Item = &QualifiedKey> {
        self.charts.keys()
    }

    /// Every chart version with a score of 0, in key order.
    pub fn all(&self) -> Vec<SearchResult<'_>> {
        self.charts
            .iter()
            .map(|(key, chart)| to_result(key, chart, 0))
            .collect()
    }

    /// Run a query against every entry.
    ///
    /// Results scoring above `threshold` are dropped. The returned order is
    /// unspecified; callers sort with [`crate::ranking::sort_by_score`]. An
    /// invalid regular expression fails the whole call.
    pub fn search(
        &self,
        query: &str,
        threshold: usize,
        use_regexp: bool,
    ) -> Result<Vec<SearchResult<'_>>, QueryError> {
        let results = if use_regexp {
            self.search_regexp(query, threshold)?
        } else {
            self.search_literal(query, threshold)
        };
        tracing::debug!(
            query,
            regexp = use_regexp,
            threshold,
            hits = results.len(),
            "searched chart index"
        );
        Ok(results)
    }

    /// Substring search over match lines.
    pub fn search_literal(&self, term: &str, threshold: usize) -> Vec<SearchResult<'_>> {
        let term = if self.fold_case {
            term.to_lowercase()
        } else {
            term.to_string()
        };
        self.collect_matches(threshold, |line| line.find(&term))
    }

    /// Regular-expression search over match lines.
    pub fn search_regexp(
        &self,
        pattern: &str,
        threshold: usize,
    ) -> Result<Vec<SearchResult<'_>>, QueryError> {
        let matcher = RegexBuilder::new(pattern)
            .case_insensitive(self.fold_case)
            .build()
            .map_err(|source| {
                tracing::warn!(pattern, error = %source, "rejected search pattern");
                QueryError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                }
            })?;
        Ok(self.collect_matches(threshold, |line| matcher.find(line).map(|m| m.start())))
    }

    fn collect_matches<F>(&self, threshold: usize, mut find: F) -> Vec<SearchResult<'_>>
    where
        F: FnMut(&str) -> Option<usize>,
    {
        let mut results = Vec::new();
        for (key, chart) in &self.charts {
            let Some(position) = find(&chart.line) else {
                continue;
            };
            let score = calc_score(position, &chart.line);
            if score > threshold {
                continue;
            }
            results.push(to_result(key, chart, score));
        }
        results
    }

    fn match_line(&self, key: &QualifiedKey, entry: &ChartEntry) -> String {
        let mut line = String::with_capacity(key.0.len() + entry.description.len() + 1);
        line.push_str(&key.0);
        line.push(SEPARATOR);
        line.push_str(&entry.description);
        if !entry.keywords.is_empty() {
            line.push(SEPARATOR);
            line.push_str(&entry.keywords.join(" "));
        }
        if self.fold_case {
            line.to_lowercase()
        } else {
            line
        }
    }
}

fn to_result<'a>(key: &QualifiedKey, chart: &'a IndexedChart, score: usize) -> SearchResult<'a> {
    SearchResult {
        name: key.0.clone(),
        score,
        repo: &chart.repo,
        chart: &chart.entry,
    }
}
