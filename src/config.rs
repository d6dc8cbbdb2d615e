//! Search configuration sourced from the environment.
//!
//! [`SearchConfig`] carries the knobs the binary exposes: the score cutoff,
//! case folding, and where the repositories file lives. Values come from
//! `CHART_SEARCH_*` variables and are overridden by command-line flags.

use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;

/// Default score cutoff; generous enough to keep keyword matches.
pub const DEFAULT_MAX_SCORE: usize = 25;

pub const MAX_SCORE_VAR: &str = "CHART_SEARCH_MAX_SCORE";
pub const FOLD_CASE_VAR: &str = "CHART_SEARCH_FOLD_CASE";
pub const REPOSITORIES_VAR: &str = "CHART_SEARCH_REPOSITORIES";
pub const HOME_VAR: &str = "CHART_SEARCH_HOME";

const REPOSITORIES_FILE: &str = "repositories.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Results scoring above this are dropped.
    pub max_score: usize,
    /// Match without regard to case.
    pub fold_case: bool,
    /// Repositories file to load when none is given on the command line.
    pub repositories: Option<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_score: DEFAULT_MAX_SCORE,
            fold_case: false,
            repositories: None,
        }
    }
}

impl SearchConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// `CHART_SEARCH_REPOSITORIES` wins over `CHART_SEARCH_HOME`; the latter
    /// points at a directory holding `repositories.yaml`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(MAX_SCORE_VAR) {
            config.max_score = raw.trim().parse().with_context(|| {
                format!("{MAX_SCORE_VAR} must be a non-negative integer, got '{raw}'")
            })?;
        }

        if let Some(raw) = lookup(FOLD_CASE_VAR) {
            config.fold_case = flag_enabled(&raw);
        }

        config.repositories = lookup(REPOSITORIES_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                lookup(HOME_VAR)
                    .filter(|v| !v.trim().is_empty())
                    .map(|home| PathBuf::from(home).join(REPOSITORIES_FILE))
            });

        Ok(config)
    }

    /// Check that a configured repositories file actually exists.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.repositories {
            if !path.is_file() {
                bail!("repositories file not found: {}", path.display());
            }
        }
        Ok(())
    }
}

/// Empty and `0` mean off; any other value means on.
fn flag_enabled(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty() && trimmed != "0"
}
