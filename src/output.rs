//! Rendering of search results for the terminal.
//!
//! Two formats: an aligned `NAME VERSION DESCRIPTION` table for people and a
//! JSON array for scripts. Both expect results already in presentation order.

use crate::ranking::SearchResult;
use anyhow::Result;
use serde::Serialize;

/// Cells wider than this are cut and end in `...`.
pub const MAX_COLUMN_WIDTH: usize = 50;

pub const NO_RESULTS: &str = "No results found";

const HEADER: [&str; 3] = ["NAME", "VERSION", "DESCRIPTION"];
const COLUMN_GAP: usize = 2;

#[derive(Debug, Serialize)]
/// JSON shape of one result.
pub struct ResultRecord<'a> {
    pub name: &'a str,
    pub version: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub score: usize,
}

impl<'a> From<&'a SearchResult<'a>> for ResultRecord<'a> {
    fn from(result: &'a SearchResult<'a>) -> Self {
        Self {
            name: &result.name,
            version: &result.chart.version,
            description: &result.chart.description,
            url: &result.chart.url,
            score: result.score,
        }
    }
}

/// Render results as an aligned table, or [`NO_RESULTS`] when empty.
pub fn render_table(results: &[SearchResult<'_>]) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    let rows: Vec<[String; 3]> = results
        .iter()
        .map(|r| {
            [
                truncate(&r.name),
                truncate(&r.chart.version),
                truncate(&r.chart.description),
            ]
        })
        .collect();

    let mut widths = HEADER.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADER.map(str::to_string), &widths);
    for row in &rows {
        out.push('\n');
        push_row(&mut out, row, &widths);
    }
    out
}

/// Render results as a pretty-printed JSON array.
pub fn render_json(results: &[SearchResult<'_>]) -> Result<String> {
    let records: Vec<ResultRecord<'_>> = results.iter().map(ResultRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

fn push_row(out: &mut String, row: &[String; 3], widths: &[usize; 3]) {
    let last = row.len() - 1;
    for (idx, cell) in row.iter().enumerate() {
        out.push_str(cell);
        if idx < last {
            let pad = widths[idx] - cell.chars().count() + COLUMN_GAP;
            out.extend(std::iter::repeat_n(' ', pad));
        }
    }
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_COLUMN_WIDTH {
        return cell.to_string();
    }
    let mut cut: String = cell.chars().take(MAX_COLUMN_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ChartEntry, RepoName};
    use serde_json::Value;

    #[test]
    fn empty_results_print_placeholder() {
        assert_eq!(render_table(&[]), "No results found");
    }

    #[test]
    fn table_aligns_columns() {
        let repo = RepoName::new("testing");
        let santa = ChartEntry::new("santa-maria", "1.2.3", "Three boat", "");
        let nina = ChartEntry::new("nina", "0.1.0", "One boat", "");
        let results = vec![
            SearchResult {
                name: "testing/nina-0.1.0".into(),
                score: 0,
                repo: &repo,
                chart: &nina,
            },
            SearchResult {
                name: "testing/santa-maria-1.2.3".into(),
                score: 0,
                repo: &repo,
                chart: &santa,
            },
        ];

        let table = render_table(&results);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "NAME                       VERSION  DESCRIPTION");
        assert_eq!(lines[1], "testing/nina-0.1.0         0.1.0    One boat");
        assert_eq!(lines[2], "testing/santa-maria-1.2.3  1.2.3    Three boat");
    }

    #[test]
    fn long_cells_are_truncated() {
        let long = "x".repeat(80);
        let cut = truncate(&long);
        assert_eq!(cut.chars().count(), MAX_COLUMN_WIDTH);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn json_carries_chart_fields() -> Result<()> {
        let repo = RepoName::new("ztesting");
        let pinta = ChartEntry::new(
            "pinta",
            "2.0.0",
            "Two ship, version two",
            "http://example.com/charts/pinta-2.0.0.tgz",
        );
        let results = vec![SearchResult {
            name: "ztesting/pinta-2.0.0".into(),
            score: 1,
            repo: &repo,
            chart: &pinta,
        }];

        let value: Value = serde_json::from_str(&render_json(&results)?)?;
        let first = &value[0];
        assert_eq!(first["name"], "ztesting/pinta-2.0.0");
        assert_eq!(first["version"], "2.0.0");
        assert_eq!(first["url"], "http://example.com/charts/pinta-2.0.0.tgz");
        assert_eq!(first["score"], 1);
        Ok(())
    }
}
