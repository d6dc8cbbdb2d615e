//! Search chart repositories from the command line.
//!
//! Loads one or more repository index files, builds a `ChartIndex`, runs the
//! query, and prints ranked results as a table (or JSON with `--json`).
//! Without a query every chart is listed. Repositories come from `--repo`,
//! `--repositories`, or the `CHART_SEARCH_*` environment.

use anyhow::{Context, Result, bail};
use chartsearch::output::{render_json, render_table};
use chartsearch::{
    QueryOptions, RepoName, RepositorySet, SearchConfig, parse_repo_arg, ranked_search,
};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_VAR: &str = "CHART_SEARCH_LOG";

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse(env::args_os().skip(1))?;
    init_tracing(args.verbose);

    let mut config = SearchConfig::from_env()?;
    if let Some(max_score) = args.max_score {
        config.max_score = max_score;
    }
    if args.fold_case {
        config.fold_case = true;
    }
    if args.repositories.is_some() {
        config.repositories = args.repositories.clone();
    }

    let mut repos = RepositorySet::new();
    for (name, path) in &args.repos {
        repos.load(name.clone(), path)?;
    }
    if args.repos.is_empty() || args.repositories.is_some() {
        config.validate()?;
        if let Some(path) = &config.repositories {
            repos
                .load_file(path)
                .with_context(|| format!("loading repositories from {}", path.display()))?;
        }
    }
    if repos.is_empty() {
        bail!(
            "no repositories configured; pass --repo NAME=INDEX or --repositories FILE, or set CHART_SEARCH_HOME"
        );
    }

    let index = repos.build_index(config.fold_case);
    tracing::debug!(charts = index.len(), "chart index ready");

    let query = (!args.query.is_empty()).then(|| args.query.join(" "));
    let options = QueryOptions {
        max_score: config.max_score,
        regexp: args.regexp,
        all_versions: args.all_versions,
    };
    let results = ranked_search(&index, query.as_deref(), &options)?;

    if args.json {
        println!("{}", render_json(&results)?);
    } else {
        println!("{}", render_table(&results));
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,chartsearch=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Default)]
struct CliArgs {
    regexp: bool,
    all_versions: bool,
    json: bool,
    fold_case: bool,
    max_score: Option<usize>,
    repos: Vec<(RepoName, PathBuf)>,
    repositories: Option<PathBuf>,
    verbose: u8,
    query: Vec<String>,
}

impl CliArgs {
    fn parse<I>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut args = raw.into_iter();
        let mut parsed = CliArgs::default();

        while let Some(arg) = args.next() {
            let arg = arg
                .into_string()
                .map_err(|_| anyhow::anyhow!("arguments must be valid UTF-8"))?;
            match arg.as_str() {
                "-r" | "--regexp" => parsed.regexp = true,
                "--versions" => parsed.all_versions = true,
                "--json" => parsed.json = true,
                "--fold-case" => parsed.fold_case = true,
                "-v" | "--verbose" => parsed.verbose = parsed.verbose.saturating_add(1),
                "--max-score" => {
                    let value = next_value(&mut args, "--max-score")?;
                    parsed.max_score = Some(value.parse().with_context(|| {
                        format!("--max-score expects a non-negative integer, got '{value}'")
                    })?);
                }
                "--repo" => {
                    let value = next_value(&mut args, "--repo")?;
                    parsed.repos.push(parse_repo_arg(&value)?);
                }
                "--repositories" => {
                    let value = next_value(&mut args, "--repositories")?;
                    parsed.repositories = Some(PathBuf::from(value));
                }
                "-h" | "--help" => usage(0),
                "--" => {
                    for rest in args.by_ref() {
                        parsed.query.push(
                            rest.into_string()
                                .map_err(|_| anyhow::anyhow!("arguments must be valid UTF-8"))?,
                        );
                    }
                }
                other if other.starts_with('-') && other.len() > 1 => {
                    bail!("unknown flag '{other}' (see --help)")
                }
                _ => parsed.query.push(arg),
            }
        }

        Ok(parsed)
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    let value = args
        .next()
        .with_context(|| format!("{flag} requires a value"))?;
    value
        .into_string()
        .map_err(|_| anyhow::anyhow!("{flag} value must be valid UTF-8"))
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: chart-search [options] [QUERY...]\n\nOptions:\n  -r, --regexp          Treat QUERY as a regular expression.\n      --versions        Show every version, not just the newest per chart.\n      --json            Print results as JSON.\n      --max-score N     Drop results scoring above N (default 25).\n      --fold-case       Match without regard to case.\n      --repo NAME=INDEX Load a repository index file (repeatable).\n      --repositories F  Load every repository listed in F.\n  -v, --verbose         More logging on stderr (repeatable).\n  -h, --help            Show this help.\n\nEnvironment:\n  CHART_SEARCH_HOME, CHART_SEARCH_REPOSITORIES, CHART_SEARCH_MAX_SCORE,\n  CHART_SEARCH_FOLD_CASE, CHART_SEARCH_LOG\n\nExamples:\n  chart-search --repo stable=./stable-index.yaml nginx\n  chart-search -r 'ngin[x]?' --json"
    );
    std::process::exit(code);
}
