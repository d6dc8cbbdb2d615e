use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub const TESTING_INDEX: &str = r#"apiVersion: v1
entries:
  niña:
    - name: niña
      version: 0.1.0
      description: One boat
      url: http://example.com/charts/nina-0.1.0.tgz
  pinta:
    - name: pinta
      version: 0.1.0
      description: Two ship
      url: http://example.com/charts/pinta-0.1.0.tgz
  santa-maria:
    - name: santa-maria
      version: 1.2.3
      description: Three boat
      url: http://example.com/charts/santa-maria-1.2.3.tgz
"#;

pub const ZTESTING_INDEX: &str = r#"{
  "apiVersion": "v1",
  "entries": {
    "pinta": [
      {
        "name": "pinta",
        "version": "2.0.0",
        "description": "Two ship, version two",
        "url": "http://example.com/charts/pinta-2.0.0.tgz"
      }
    ]
  }
}
"#;

/// Directory holding both fixture repositories and a repositories file.
pub struct Fixtures {
    pub dir: tempfile::TempDir,
}

impl Fixtures {
    pub fn new() -> Result<Self> {
        let dir = tempfile::TempDir::new().context("failed to allocate fixture dir")?;
        write_file(dir.path(), "testing-index.yaml", TESTING_INDEX)?;
        write_file(dir.path(), "ztesting-index.json", ZTESTING_INDEX)?;
        write_file(
            dir.path(),
            "repositories.yaml",
            "repositories:\n  - name: testing\n    index: testing-index.yaml\n  - name: ztesting\n    index: ztesting-index.json\n",
        )?;
        Ok(Self { dir })
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn repositories(&self) -> PathBuf {
        self.path("repositories.yaml")
    }
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Command for the `chart-search` binary with a clean `CHART_SEARCH_*` environment.
pub fn chart_search() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_chart-search"));
    for var in [
        "CHART_SEARCH_HOME",
        "CHART_SEARCH_REPOSITORIES",
        "CHART_SEARCH_MAX_SCORE",
        "CHART_SEARCH_FOLD_CASE",
        "CHART_SEARCH_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}
