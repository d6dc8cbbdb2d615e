//! Result scoring and ordering.
//!
//! A match line is a chart's qualified key followed by its description (and
//! keywords, when present), joined by [`SEPARATOR`]. The score of a match is
//! the index of the field it starts in, so a hit in the name always beats a
//! hit in the description. Scores are coarse on purpose: ties fall back to
//! name order, which keeps output stable across runs.

use crate::catalog::{ChartEntry, RepoName};
use semver::Version;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Field separator inside match lines. Never appears in chart names.
pub const SEPARATOR: char = '\u{0B}';

/// One chart version matched by a query.
#[derive(Clone, Debug)]
pub struct SearchResult<'a> {
    /// Qualified key, `<repo>/<chart>-<version>`.
    pub name: String,
    /// Lower is better; 0 means the match starts in the qualified key.
    pub score: usize,
    pub repo: &'a RepoName,
    pub chart: &'a ChartEntry,
}

/// Score a match starting at byte offset `match_index` of `match_line`.
///
/// Counts the separators strictly before the match. Offsets past the end of
/// the line count every separator.
pub fn calc_score(match_index: usize, match_line: &str) -> usize {
    let bytes = match_line.as_bytes();
    let end = match_index.min(bytes.len());
    bytes[..end]
        .iter()
        .filter(|&&b| b == SEPARATOR as u8)
        .count()
}

/// Total order over results: score ascending, then name ascending.
pub fn compare_results(a: &SearchResult<'_>, b: &SearchResult<'_>) -> Ordering {
    a.score
        .cmp(&b.score)
        .then_with(|| a.name.cmp(&b.name))
}

/// Sort results in place into presentation order.
pub fn sort_by_score(results: &mut [SearchResult<'_>]) {
    results.sort_by(compare_results);
}

/// Keep only the newest version of each chart within each repository.
///
/// Relative order of the surviving results is preserved. Versions compare as
/// semver when both parse (a leading `v` is ignored); a parsed version always
/// outranks an unparsed one, and two unparsed versions compare as strings.
pub fn retain_latest_versions(results: Vec<SearchResult<'_>>) -> Vec<SearchResult<'_>> {
    let mut newest: BTreeMap<(&RepoName, &str), usize> = BTreeMap::new();
    for (idx, result) in results.iter().enumerate() {
        let key = (result.repo, result.chart.name.as_str());
        match newest.get(&key) {
            Some(&current)
                if compare_versions(&results[current].chart.version, &result.chart.version)
                    != Ordering::Less => {}
            _ => {
                newest.insert(key, idx);
            }
        }
    }

    let mut keep = vec![false; results.len()];
    for idx in newest.into_values() {
        keep[idx] = true;
    }
    results
        .into_iter()
        .zip(keep)
        .filter_map(|(result, kept)| kept.then_some(result))
        .collect()
}

fn compare_versions(a: &str, b: &str) -> Ordering {
    match (parse_version(a), parse_version(b)) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(trimmed).ok()
}
